// ABOUTME: Parser for a title's technical specifications page.
// ABOUTME: Each labelled row is normalised according to its label; unknown labels are ignored.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::dom::fragment_text;
use crate::extract::{collapse_whitespace, remove_tags, split_by_br};
use crate::models::RawTechSpecs;
use crate::pages::{non_empty, text_of};

static CONTENT: Lazy<Selector> = Lazy::new(|| Selector::parse("div#technical_content").unwrap());
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr.even, tr.odd").unwrap());
static LABEL: Lazy<Selector> = Lazy::new(|| Selector::parse("td.label").unwrap());
static VALUE: Lazy<Selector> = Lazy::new(|| Selector::parse("td.label ~ td").unwrap());

static RUNTIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+.*min").unwrap());
static PAREN_RUNTIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\d+.*min\)").unwrap());
static RUNTIME_NOISE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[()\smin]+").unwrap());
static CAMERA_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\band\b|,").unwrap());

pub fn parse_tech_specs(html: &str, title_id: &str) -> RawTechSpecs {
    let doc = Html::parse_document(html);
    let mut raw = RawTechSpecs {
        title_id: title_id.to_string(),
        ..RawTechSpecs::default()
    };
    let Some(content) = doc.select(&CONTENT).next() else {
        return raw;
    };

    for row in content.select(&ROW) {
        let (Some(label), Some(value)) = (row.select(&LABEL).next(), row.select(&VALUE).next())
        else {
            continue;
        };
        let label = text_of(label).trim().to_lowercase();
        let text = text_of(value);

        match label.as_str() {
            "runtime" => raw.runtime = runtime_minutes(&text),
            "sound mix" => {
                raw.sound_mix = collapse_whitespace(&text)
                    .split('|')
                    .filter_map(|s| non_empty(s.trim()))
                    .collect();
            }
            "color" => raw.color = non_empty(&collapse_whitespace(&text)),
            "aspect ratio" => raw.aspect_ratio = br_list(value),
            "camera" => {
                raw.camera = CAMERA_SPLIT_RE
                    .split(&text)
                    .filter_map(|s| non_empty(&collapse_whitespace(s)))
                    .collect();
            }
            "laboratory" => raw.laboratory = br_list(value),
            "negative format" => raw.negative_format = non_empty(text.trim()),
            "cinematographic process" => raw.cinematographic_process = br_list(value),
            "printed film format" => {
                raw.printed_film_format = non_empty(&collapse_whitespace(&text));
            }
            _ => {}
        }
    }

    raw
}

/// Minutes from the runtime cell, preferring the parenthesised total when there is one.
fn runtime_minutes(text: &str) -> Option<String> {
    let re = if text.contains('(') {
        &*PAREN_RUNTIME_RE
    } else {
        &*RUNTIME_RE
    };
    re.find(text)
        .map(|m| RUNTIME_NOISE_RE.replace_all(m.as_str(), "").into_owned())
        .and_then(|s| non_empty(&s))
}

/// One entry per `<br>`-separated line of a cell.
fn br_list(cell: ElementRef<'_>) -> Vec<String> {
    let markup = collapse_whitespace(&remove_tags(&cell.html(), "td"));
    split_by_br(&markup)
        .iter()
        .filter_map(|part| non_empty(&collapse_whitespace(&fragment_text(part))))
        .collect()
}
