// ABOUTME: Parsers for a title's main page and its taglines page.
// ABOUTME: Reads the heading, subtext, details blocks, top cast table and episode heading into a RawTitle.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::dom::text_without;
use crate::extract::{
    collapse_whitespace, extract_money, get_company_id, get_episode_info, get_name_id,
    get_title_id,
};
use crate::models::{job_title, CreditScrape, RawCredit, RawTitle};
use crate::pages::{non_empty, text_of, trimmed_text};

static TITLE_WRAPPER: Lazy<Selector> = Lazy::new(|| Selector::parse("div.title_wrapper").unwrap());
static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static TITLE_YEAR: Lazy<Selector> = Lazy::new(|| Selector::parse("span#titleYear").unwrap());
static SUBTEXT: Lazy<Selector> = Lazy::new(|| Selector::parse("div.subtext").unwrap());
static SUBTEXT_NOISE: Lazy<Selector> = Lazy::new(|| Selector::parse("span, a, time").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());
static TITLE_PARENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.titleParent > a").unwrap());
static SUMMARY: Lazy<Selector> = Lazy::new(|| Selector::parse("div.summary_text").unwrap());
static STORYLINE: Lazy<Selector> = Lazy::new(|| Selector::parse("div#titleStoryLine").unwrap());
static STORYLINE_TEXT: Lazy<Selector> = Lazy::new(|| Selector::parse("div > p > span").unwrap());
static TEXT_BLOCK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#titleDetails > div.txt-block").unwrap());
static BLOCK_LABEL: Lazy<Selector> = Lazy::new(|| Selector::parse("h4.inline").unwrap());
static CAST_ROW: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("table.cast_list tr.odd, table.cast_list tr.even").unwrap()
});
static CAST_NAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td:nth-of-type(2) > a").unwrap());
static CHARACTER: Lazy<Selector> = Lazy::new(|| Selector::parse("td.character").unwrap());
static TOGGLE_EPISODES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.toggle-episodes").unwrap());
static EPISODE_HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("div.bp_heading").unwrap());
static NO_CONTENT: Lazy<Selector> = Lazy::new(|| Selector::parse("div#no_content").unwrap());
static TAGLINE: Lazy<Selector> = Lazy::new(|| Selector::parse("div.soda").unwrap());

static SERIES_YEARS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}[-–](\d{4})").unwrap());
static RATING_NOISE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s,]+").unwrap());
static RELEASE_DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+?\s*\w+?\s*\d{4}").unwrap());
static SEASON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"season\s*(\d+)").unwrap());
static EPISODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"episode\s*(\d+)").unwrap());

/// Parses a title's main page. Taglines live on their own page; see [`parse_taglines`].
pub fn parse_title_page(html: &str, title_id: &str) -> RawTitle {
    let doc = Html::parse_document(html);
    let mut raw = RawTitle {
        title_id: title_id.to_string(),
        ..RawTitle::default()
    };

    if let Some(wrapper) = doc.select(&TITLE_WRAPPER).next() {
        if let Some(heading) = wrapper.select(&HEADING).next() {
            raw.display_title = non_empty(text_without(heading, &TITLE_YEAR).trim());
        }
        if let Some(subtext) = wrapper.select(&SUBTEXT).next() {
            raw.end_year = series_end_year(subtext);
            let rating = text_without(subtext, &SUBTEXT_NOISE);
            raw.mpaa_rating = non_empty(&RATING_NOISE_RE.replace_all(&rating, ""));
        }
    }

    raw.title_parent_id = doc
        .select(&TITLE_PARENT)
        .next()
        .and_then(get_title_id);
    raw.plot = doc.select(&SUMMARY).next().and_then(trimmed_text);
    raw.storyline = doc
        .select(&STORYLINE)
        .next()
        .and_then(|s| s.select(&STORYLINE_TEXT).next())
        .and_then(trimmed_text);

    for block in doc.select(&TEXT_BLOCK) {
        read_text_block(block, &mut raw);
    }

    raw.top_cast = doc
        .select(&CAST_ROW)
        .filter_map(|row| top_cast_member(row, title_id))
        .collect();

    for heading in doc.select(&EPISODE_HEADING) {
        let text = text_of(heading);
        if !text.contains("Season") {
            continue;
        }
        let lower = text.to_lowercase();
        if let Some(caps) = SEASON_RE.captures(&lower) {
            raw.season_number = Some(caps[1].to_string());
        }
        if let Some(caps) = EPISODE_RE.captures(&lower) {
            raw.episode_number = Some(caps[1].to_string());
        }
    }

    raw
}

/// Every tagline on a title's taglines page; empty when the page says there are none.
pub fn parse_taglines(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    if doc.select(&NO_CONTENT).next().is_some() {
        return Vec::new();
    }
    doc.select(&TAGLINE).filter_map(trimmed_text).collect()
}

fn series_end_year(subtext: ElementRef<'_>) -> Option<String> {
    subtext
        .select(&LINK)
        .filter(|a| {
            a.value()
                .attr("href")
                .is_some_and(|href| href.contains("releaseinfo"))
        })
        .find_map(|a| {
            SERIES_YEARS_RE
                .captures(&text_of(a))
                .map(|caps| caps[1].to_string())
        })
}

fn read_text_block(block: ElementRef<'_>, raw: &mut RawTitle) {
    let Some(label) = block.select(&BLOCK_LABEL).next() else {
        return;
    };
    let label = text_of(label).trim().to_lowercase();
    let text = text_of(block);
    let first_link = || block.select(&LINK).next().and_then(trimmed_text);

    if label.contains("country") {
        raw.country = first_link();
    } else if label.contains("language") {
        raw.language = first_link();
    } else if label.contains("release date") {
        raw.release_date = RELEASE_DATE_RE.find(&text).map(|m| m.as_str().to_string());
    } else if label.contains("production co") {
        raw.production_companies = block.select(&LINK).filter_map(get_company_id).collect();
    } else if label.contains("budget") {
        if let Some(money) = extract_money(&text) {
            raw.budget = Some(money.amount);
            raw.budget_denomination = money.denomination;
        }
    } else if label.contains("opening weekend") {
        raw.opening_weekend_gross = extract_money(&text).map(|m| m.amount);
        raw.opening_weekend_date = block.select(&SPAN).next().and_then(trimmed_text);
    } else if label.contains("gross usa") {
        raw.usa_gross = extract_money(&text).map(|m| m.amount);
    } else if label.contains("worldwide gross") {
        raw.worldwide_gross = extract_money(&text).map(|m| m.amount);
    }
}

fn top_cast_member(row: ElementRef<'_>, title_id: &str) -> Option<CreditScrape> {
    let name_link = row.select(&CAST_NAME).next()?;
    let mut raw = RawCredit {
        name_id: get_name_id(name_link),
        title_id: Some(title_id.to_string()),
        job_title: job_title::ACTOR.to_string(),
        ..RawCredit::default()
    };

    if let Some(character) = row.select(&CHARACTER).next() {
        if let Some(toggle) = character.select(&TOGGLE_EPISODES).next() {
            let info = get_episode_info(toggle);
            raw.episode_count = info.count;
            raw.episode_year_start = info.start_year;
            raw.episode_year_end = info.end_year;
        }
        raw.credit = non_empty(&collapse_whitespace(&text_without(
            character,
            &TOGGLE_EPISODES,
        )));
    }

    Some(CreditScrape::from(raw))
}
