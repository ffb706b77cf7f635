// ABOUTME: Parsers for a company's title search listing and a title's company credits page.
// ABOUTME: Search rows yield year ranges and type notes; credit sections yield category and notes.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::dom::next_element_sibling;
use crate::extract::{get_company_id, get_title_id};
use crate::models::{CompanyCreditScrape, CompanyScrape, RawCompany, RawCompanyCredit};
use crate::pages::{non_empty, text_of, trimmed_text};

static HEADER: Lazy<Selector> = Lazy::new(|| Selector::parse("div.article > h1.header").unwrap());
static LISTER: Lazy<Selector> = Lazy::new(|| Selector::parse("div.lister-list").unwrap());
static ITEM_HEADER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.lister-item-header").unwrap());
static SMALL: Lazy<Selector> = Lazy::new(|| Selector::parse("small").unwrap());
static EPISODE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("small ~ a").unwrap());
static EPISODE_YEAR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("small ~ a ~ span.lister-item-year").unwrap());
static ITEM_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("span.lister-item-index ~ span").unwrap());
static ITEM_YEAR: Lazy<Selector> = Lazy::new(|| Selector::parse("span.lister-item-year").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static CREDIT_HEADER: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div#company_credits_content h4.dataHeaderWithBorder").unwrap()
});
static LIST_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li").unwrap());

const SORT_SUFFIX: &str = "(Sorted by Popularity Ascending)";

static YEARS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:\d|–|-)+").unwrap());
static DASHES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[–-]+").unwrap());
static LISTING_NOTES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:[A-Za-z]+\s*)+").unwrap());
static NOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((.*?)\)").unwrap());

/// One page of a company's title search.
#[derive(Debug, Clone, Default)]
pub struct CompanySearchPage {
    /// The page header was present but named no company.
    pub invalid_company: bool,
    /// Listed titles, or `None` once the results run out.
    pub titles: Option<Vec<CompanyScrape>>,
}

pub fn parse_company_search(html: &str, company_id: &str) -> CompanySearchPage {
    let doc = Html::parse_document(html);
    let invalid_company = doc
        .select(&HEADER)
        .next()
        .is_some_and(|h| text_of(h).replace(SORT_SUFFIX, "").trim().is_empty());
    if invalid_company {
        return CompanySearchPage {
            invalid_company,
            titles: None,
        };
    }

    let titles = doc.select(&LISTER).next().map(|list| {
        list.select(&ITEM_HEADER)
            .map(|header| company_listing(header, company_id))
            .collect()
    });
    CompanySearchPage {
        invalid_company,
        titles,
    }
}

fn company_listing(header: ElementRef<'_>, company_id: &str) -> CompanyScrape {
    let is_episode = header
        .select(&SMALL)
        .next()
        .is_some_and(|s| text_of(s).contains("Episode"));

    let (link, year) = if is_episode {
        (
            header.select(&EPISODE_LINK).next(),
            header.select(&EPISODE_YEAR).next(),
        )
    } else {
        let title = header.select(&ITEM_TITLE).next();
        (
            title.and_then(|t| t.select(&LINK).next()),
            title.and_then(|t| t.select(&ITEM_YEAR).next()),
        )
    };

    let mut raw = RawCompany {
        company_id: company_id.to_string(),
        title_id: link.and_then(get_title_id),
        ..RawCompany::default()
    };

    if let Some(year) = year {
        let text = text_of(year);
        let text = text.trim().trim_start_matches('(').trim_end_matches(')');
        if let Some(years) = YEARS_RE.find(text) {
            let mut bounds = DASHES_RE.split(years.as_str());
            raw.start_year = bounds.next().and_then(non_empty);
            raw.end_year = bounds.next().and_then(non_empty);
        }
        raw.notes = LISTING_NOTES_RE
            .find(text)
            .and_then(|m| non_empty(m.as_str().trim()));
    }

    CompanyScrape::from(raw)
}

/// Reads every company credited on a title, grouped under their section headers.
pub fn parse_company_credits(html: &str, title_id: &str) -> Vec<CompanyCreditScrape> {
    let doc = Html::parse_document(html);
    let mut credits = Vec::new();
    for header in doc.select(&CREDIT_HEADER) {
        let category = header.value().id().map(str::to_string);
        let Some(list) = next_element_sibling(header) else {
            continue;
        };
        for item in list.select(&LIST_ITEM) {
            let link = item.select(&LINK).next();
            credits.push(CompanyCreditScrape::from(RawCompanyCredit {
                company_id: link.and_then(get_company_id),
                title_id: title_id.to_string(),
                company_name: link.and_then(trimmed_text),
                category: category.clone(),
                notes: NOTE_RE
                    .captures_iter(&text_of(item))
                    .filter_map(|caps| non_empty(caps[1].trim()))
                    .collect(),
            }));
        }
    }
    credits
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_open_ended_series_listing() {
        let html = r#"<html><body><div class="article"><h1 class="header">Warner Bros. (Sorted by Popularity Ascending)</h1>
            <div class="lister-list"><div class="lister-item">
            <span class="lister-item-header"><span class="lister-item-index">1.</span>
            <span title="x"><a href="/title/tt0944947/">Series</a> <span class="lister-item-year">(2011– ) (TV Series)</span></span>
            </span></div></div></div></body></html>"#;
        let page = parse_company_search(html, "co0002663");
        assert!(!page.invalid_company);
        let titles = page.titles.unwrap();
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].title_id(), Some("tt0944947"));
        assert_eq!(titles[0].start_year(), Some(2011));
        assert_eq!(titles[0].end_year(), None);
        assert_eq!(titles[0].notes(), Some("TV Series"));
    }

    #[test]
    fn test_blank_header_marks_invalid_company() {
        let html = r#"<html><body><div class="article"><h1 class="header"> (Sorted by Popularity Ascending)</h1></div></body></html>"#;
        let page = parse_company_search(html, "co9999999");
        assert!(page.invalid_company);
        assert!(page.titles.is_none());
    }
}
