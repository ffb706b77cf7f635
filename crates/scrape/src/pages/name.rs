// ABOUTME: Parsers for a person's bio page, the known-for strip and the filmography on their main page.
// ABOUTME: Filmography rows keep inline episodes apart from the request needed for the full episode list.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::dom::{fragment_text, remove_tags_and_content};
use crate::extract::{
    collapse_whitespace, get_category, get_ref_marker, get_title_id, split_by_br, trim_year,
};
use crate::models::{NameCreditScrape, RawName, RawNameCredit};
use crate::pages::{non_empty, text_of, trimmed_text};

static DISPLAY_NAME: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div#main > div:nth-of-type(1) > div:nth-of-type(1) > div > h3 > a").unwrap()
});
static OVERVIEW_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#bio_content table#overviewTable tr").unwrap());
static LABEL: Lazy<Selector> = Lazy::new(|| Selector::parse("td.label").unwrap());
static VALUE: Lazy<Selector> = Lazy::new(|| Selector::parse("td ~ td").unwrap());
static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("td > time").unwrap());
static PLACE: Lazy<Selector> = Lazy::new(|| Selector::parse("td > a").unwrap());
static KNOWN_FOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("#knownfor, #knownfor-stacked").unwrap());
static KNOWN_FOR_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(".knownfor-title").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static FILMO_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#filmography div.filmo-row").unwrap());
static YEAR_COLUMN: Lazy<Selector> = Lazy::new(|| Selector::parse("span.year_column").unwrap());
static FILMO_EPISODES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.filmo-episodes").unwrap());
static MORE_EPISODES_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("div > a").unwrap());

static PARENTHESISED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((.*)\)").unwrap());
static NOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((.*?)\)").unwrap());
static HEIGHT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d+\.*\d*)").unwrap());
static EPISODE_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d{4})\)").unwrap());

/// Parses a person's bio page. Known-for titles come from the main page; see [`parse_known_for`].
pub fn parse_bio(html: &str, name_id: &str) -> RawName {
    let doc = Html::parse_document(html);
    let mut raw = RawName {
        name_id: name_id.to_string(),
        display_name: doc.select(&DISPLAY_NAME).next().and_then(trimmed_text),
        ..RawName::default()
    };

    for row in doc.select(&OVERVIEW_ROW) {
        let Some(label) = row.select(&LABEL).next() else {
            continue;
        };
        let label = text_of(label).trim().to_lowercase();
        let value = row.select(&VALUE).next();
        let date = || {
            row.select(&TIME)
                .next()
                .and_then(|t| t.value().attr("datetime"))
                .map(str::to_string)
        };
        let place = || row.select(&PLACE).next().and_then(trimmed_text);

        match label.as_str() {
            "born" => {
                raw.birth_date = date();
                raw.birth_city = place();
            }
            "died" => {
                raw.death_date = date();
                raw.death_city = place();
                raw.death_cause = value.and_then(|v| {
                    PARENTHESISED_RE
                        .captures(&text_of(v))
                        .and_then(|caps| non_empty(caps[1].trim()))
                });
            }
            "birth name" => raw.birth_name = value.and_then(trimmed_text),
            "nicknames" => {
                raw.nicknames = value
                    .map(|v| {
                        split_by_br(&v.inner_html())
                            .iter()
                            .filter_map(|part| non_empty(fragment_text(part).trim()))
                            .collect()
                    })
                    .unwrap_or_default();
            }
            "height" => {
                raw.height = value.and_then(|v| {
                    HEIGHT_RE
                        .captures(&text_of(v))
                        .map(|caps| caps[1].to_string())
                });
            }
            _ => {}
        }
    }

    raw
}

/// Title IDs from the known-for strip of a person's main page.
pub fn parse_known_for(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let Some(strip) = doc.select(&KNOWN_FOR).next() else {
        return Vec::new();
    };
    strip
        .select(&KNOWN_FOR_TITLE)
        .filter_map(|t| t.select(&LINK).next().and_then(get_title_id))
        .collect()
}

/// Where to fetch the complete episode list of one filmography row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodesRequest {
    pub title_id: String,
    pub category: Option<String>,
    pub ref_marker: Option<String>,
}

/// One row of a person's filmography.
#[derive(Debug, Clone)]
pub struct FilmographyRow {
    pub credit: NameCreditScrape,
    /// Episodes listed inline under the row.
    pub episodes: Vec<NameCreditScrape>,
    /// Present when the row only shows part of its episodes.
    pub more_episodes: Option<EpisodesRequest>,
}

/// Reads the filmography of a person's main page, one entry per row.
pub fn parse_filmography(html: &str, name_id: &str) -> Vec<FilmographyRow> {
    let doc = Html::parse_document(html);
    doc.select(&FILMO_ROW)
        .filter_map(|row| filmography_row(row, name_id))
        .collect()
}

fn filmography_row(row: ElementRef<'_>, name_id: &str) -> Option<FilmographyRow> {
    let (category, title_id) = row.value().id()?.rsplit_once('-')?;
    let category = category
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();

    let years = row
        .select(&YEAR_COLUMN)
        .next()
        .map(|y| text_of(y).trim().to_string())
        .unwrap_or_default();
    let (start_year, end_year) = match years.split_once(['-', '–']) {
        Some((start, end)) => (non_empty(start.trim()), non_empty(end.trim())),
        None => (non_empty(&years), None),
    };

    let mut parts = split_by_br(&row.inner_html()).into_iter();
    let title_info = parts.next().unwrap_or_default();
    let role_html = parts.collect::<Vec<_>>().join("<br>");
    let role = non_empty(&collapse_whitespace(&fragment_text(
        &remove_tags_and_content(&role_html, "div"),
    )));
    let title_notes = NOTE_RE
        .captures_iter(&fragment_text(&title_info))
        .filter_map(|caps| non_empty(caps[1].trim()))
        .collect();

    let more_selector = Selector::parse(&format!(
        "div#more-episodes-{title_id}-{category} ~ div.filmo-episodes"
    ))
    .ok();
    let more_node = more_selector
        .as_ref()
        .and_then(|sel| row.select(sel).next());
    let more_episodes = more_node.map(|node| {
        let link = node.select(&MORE_EPISODES_LINK).next();
        EpisodesRequest {
            title_id: title_id.to_string(),
            category: link.and_then(get_category),
            ref_marker: link.and_then(get_ref_marker),
        }
    });

    let episodes = row
        .select(&FILMO_EPISODES)
        .filter(|ep| more_node.map_or(true, |more| more.id() != ep.id()))
        .filter(|ep| {
            !ep.value()
                .id()
                .is_some_and(|id| id.starts_with("more-episodes-"))
        })
        .map(|ep| filmography_episode(ep, name_id, &category))
        .collect();

    let credit = NameCreditScrape::from(RawNameCredit {
        name_id: name_id.to_string(),
        title_id: Some(title_id.to_string()),
        category: Some(category),
        start_year: trim_year(start_year.as_deref()),
        end_year: trim_year(end_year.as_deref()),
        role,
        title_notes,
    });

    Some(FilmographyRow {
        credit,
        episodes,
        more_episodes,
    })
}

/// Reads a complete episode list page for one filmography row.
pub fn parse_episode_list(html: &str, name_id: &str, category: &str) -> Vec<NameCreditScrape> {
    let doc = Html::parse_document(html);
    doc.select(&FILMO_EPISODES)
        .map(|ep| filmography_episode(ep, name_id, category))
        .collect()
}

fn filmography_episode(ep: ElementRef<'_>, name_id: &str, category: &str) -> NameCreditScrape {
    let text = text_of(ep);
    let mut parts = text.trim().split("...");
    let heading = parts.next().unwrap_or_default();
    let role = parts.collect::<Vec<_>>().join("...");
    NameCreditScrape::from(RawNameCredit {
        name_id: name_id.to_string(),
        title_id: ep.select(&LINK).next().and_then(get_title_id),
        category: Some(category.to_string()),
        start_year: EPISODE_YEAR_RE
            .captures(heading)
            .map(|caps| caps[1].to_string()),
        end_year: None,
        role: non_empty(role.trim()),
        title_notes: Vec::new(),
    })
}
