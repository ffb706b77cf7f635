// ABOUTME: Pure HTML and JSON page parsers, one module per page layout.
// ABOUTME: Each takes fetched document text and returns records or raw drafts; nothing here touches the network.

pub mod company;
pub mod credits;
pub mod name;
pub mod search;
pub mod tech_specs;
pub mod title;

use scraper::ElementRef;

/// All text under `el`, untrimmed.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Trimmed text under `el`, or `None` when there is none.
pub(crate) fn trimmed_text(el: ElementRef<'_>) -> Option<String> {
    non_empty(text_of(el).trim())
}

pub(crate) fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
