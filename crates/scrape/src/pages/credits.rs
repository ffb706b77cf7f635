// ABOUTME: Parsers for a title's full credits page: the cast table, the crew sections and per-actor episode lists.
// ABOUTME: Cast rows carry the ref marker needed to request an actor's episode list separately.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::dom::text_without;
use crate::extract::{
    collapse_whitespace, get_episode_info, get_name_id, get_ref_marker, get_title_id,
};
use crate::models::{job_title, CreditScrape, RawCredit};
use crate::pages::{non_empty, text_of};

static CAST_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("table.cast_list tr").unwrap());
static ACTOR_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td.primary_photo + td > a").unwrap());
static CHARACTER: Lazy<Selector> = Lazy::new(|| Selector::parse("td.character").unwrap());
static TOGGLE_EPISODES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a.toggle-episodes").unwrap());
static FILMO_EPISODES: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.filmo-episodes").unwrap());
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static CREW_CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#fullcredits_content").unwrap());
static SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CREW_NAME: Lazy<Selector> = Lazy::new(|| Selector::parse("td.name > a").unwrap());
static CREW_CREDIT: Lazy<Selector> = Lazy::new(|| Selector::parse("td.credit").unwrap());

static EPISODE_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d{4})\)").unwrap());
static CREW_EPISODES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((\d+)\s*episodes?,\s*(\d{4})(?:-(\d{4}))?\)").unwrap()
});

/// One row of the cast table.
#[derive(Debug, Clone)]
pub struct CastMember {
    pub credit: CreditScrape,
    /// Set when the row links to an episode list that must be fetched separately.
    pub episodes_ref_marker: Option<String>,
}

/// Reads the cast table of a full credits page.
pub fn parse_full_cast(html: &str, title_id: &str) -> Vec<CastMember> {
    let doc = Html::parse_document(html);
    doc.select(&CAST_ROW)
        .filter_map(|row| cast_member(row, title_id))
        .collect()
}

fn cast_member(row: ElementRef<'_>, title_id: &str) -> Option<CastMember> {
    let actor = row.select(&ACTOR_LINK).next()?;
    let mut raw = RawCredit {
        name_id: get_name_id(actor),
        title_id: Some(title_id.to_string()),
        job_title: job_title::ACTOR.to_string(),
        ..RawCredit::default()
    };
    let mut episodes_ref_marker = None;

    if let Some(character) = row.select(&CHARACTER).next() {
        if let Some(toggle) = character.select(&TOGGLE_EPISODES).next() {
            let info = get_episode_info(toggle);
            raw.episode_count = info.count;
            raw.episode_year_start = info.start_year;
            raw.episode_year_end = info.end_year;
            episodes_ref_marker = get_ref_marker(toggle);
        }
        raw.credit = non_empty(&collapse_whitespace(&text_without(
            character,
            &TOGGLE_EPISODES,
        )));
    }

    Some(CastMember {
        credit: CreditScrape::from(raw),
        episodes_ref_marker,
    })
}

/// Reads an actor's episode list for one series, one credit per episode.
pub fn parse_cast_episodes(html: &str, name_id: Option<&str>) -> Vec<CreditScrape> {
    let doc = Html::parse_document(html);
    doc.select(&FILMO_EPISODES)
        .map(|episode| {
            let text = text_of(episode);
            let mut parts = text.trim().split("...");
            let heading = parts.next().unwrap_or_default();
            let credit = parts.collect::<Vec<_>>().join("...");
            CreditScrape::from(RawCredit {
                name_id: name_id.map(str::to_string),
                title_id: episode.select(&LINK).next().and_then(get_title_id),
                job_title: job_title::ACTOR.to_string(),
                credit: non_empty(credit.trim()),
                episode_year_start: EPISODE_YEAR_RE
                    .captures(heading)
                    .map(|caps| caps[1].to_string()),
                ..RawCredit::default()
            })
        })
        .collect()
}

/// Reads every crew section of a full credits page.
///
/// Sections are an `h4` heading followed directly by a table. Headings are
/// mapped onto the shared job titles; unknown ones are kept as written.
pub fn parse_full_crew(html: &str, title_id: &str) -> Vec<CreditScrape> {
    let doc = Html::parse_document(html);
    let Some(content) = doc.select(&CREW_CONTENT).next() else {
        return Vec::new();
    };

    let mut credits = Vec::new();
    let mut heading: Option<String> = None;
    for el in content.children().filter_map(ElementRef::wrap) {
        let Some(job) = heading.take() else {
            heading = crew_heading(el, title_id);
            continue;
        };
        if el.value().name() != "table" {
            continue;
        }
        for row in el.select(&ROW) {
            if let Some(name) = row.select(&CREW_NAME).next() {
                credits.push(crew_credit(row, name, title_id, &job));
            }
        }
    }
    credits
}

fn crew_heading(el: ElementRef<'_>, title_id: &str) -> Option<String> {
    if el.value().name() != "h4" || el.value().id() == Some("cast") {
        return None;
    }
    let text = text_without(el, &SPAN).trim().to_lowercase();
    if text.is_empty() {
        return None;
    }
    let heading = text.replace("series", "").trim().to_string();
    match job_title::for_heading(&heading) {
        Some(job) => Some(job.to_string()),
        None => {
            warn!(title_id, heading = %heading, "unknown crew heading");
            Some(heading)
        }
    }
}

fn crew_credit(
    row: ElementRef<'_>,
    name: ElementRef<'_>,
    title_id: &str,
    job: &str,
) -> CreditScrape {
    let mut raw = RawCredit {
        name_id: get_name_id(name),
        title_id: Some(title_id.to_string()),
        job_title: job.to_string(),
        ..RawCredit::default()
    };

    if let Some(cell) = row.select(&CREW_CREDIT).next() {
        let mut credit = text_of(cell).trim().to_string();
        if let Some(caps) = CREW_EPISODES_RE.captures(&credit) {
            raw.episode_count = Some(caps[1].to_string());
            raw.episode_year_start = Some(caps[2].to_string());
            raw.episode_year_end = caps.get(3).map(|m| m.as_str().to_string());
        }
        credit = CREW_EPISODES_RE.replace_all(&credit, "").trim().to_string();
        if let Some(rest) = credit.strip_suffix("and") {
            credit = rest.trim().to_string();
        }
        if credit.starts_with('(') && credit.ends_with(')') {
            credit = credit
                .trim_start_matches('(')
                .trim_end_matches(')')
                .trim()
                .to_string();
        }
        raw.credit = non_empty(&credit);
    }

    CreditScrape::from(raw)
}
