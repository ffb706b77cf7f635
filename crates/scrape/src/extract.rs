// ABOUTME: Field extractors shared by the page parsers: IDs from hrefs, onclick parameters, money and years.
// ABOUTME: Pure functions over scraper elements and markup strings; absent input yields None, never an error.

use marquee_core::{get_denomination, is_money_string, trim_money_string, Currency};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

/// Position of the category literal inside an `onclick` handler.
pub const CATEGORY_INDEX: usize = 3;
/// Position of the ref-marker literal inside an `onclick` handler.
pub const REF_MARKER_INDEX: usize = 4;

static BR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<\s*b\s*r\s*/?\s*>").unwrap());
static YEAR_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\w*").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static ROMAN_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([IVXLCDM]+\)\s*$").unwrap());
static EPISODE_INFO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s*episodes?(?:\s*,\s*(\d{4})(?:\s*[-–]\s*(\d{4}))?)?").unwrap()
});

/// The two-letter prefixes IMDb puts in front of its numeric IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPrefix {
    Company,
    Name,
    Title,
}

impl IdPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdPrefix::Company => "co",
            IdPrefix::Name => "nm",
            IdPrefix::Title => "tt",
        }
    }

    fn regex(&self) -> &'static Regex {
        static CO: Lazy<Regex> = Lazy::new(|| Regex::new(r"co\d+").unwrap());
        static NM: Lazy<Regex> = Lazy::new(|| Regex::new(r"nm\d+").unwrap());
        static TT: Lazy<Regex> = Lazy::new(|| Regex::new(r"tt\d+").unwrap());
        match self {
            IdPrefix::Company => Lazy::force(&CO),
            IdPrefix::Name => Lazy::force(&NM),
            IdPrefix::Title => Lazy::force(&TT),
        }
    }
}

/// First `<prefix><digits>` run in the element's `href`.
pub fn get_id(el: ElementRef<'_>, prefix: IdPrefix) -> Option<String> {
    let href = el.value().attr("href")?;
    prefix.regex().find(href).map(|m| m.as_str().to_string())
}

pub fn get_company_id(el: ElementRef<'_>) -> Option<String> {
    get_id(el, IdPrefix::Company)
}

pub fn get_name_id(el: ElementRef<'_>) -> Option<String> {
    get_id(el, IdPrefix::Name)
}

pub fn get_title_id(el: ElementRef<'_>) -> Option<String> {
    get_id(el, IdPrefix::Title)
}

/// Literal at `index` of the comma-separated arguments in the element's `onclick`.
///
/// Surrounding whitespace, quotes and call punctuation (`(`, `)`, `;`) are
/// stripped from the token.
pub fn get_from_onclick(el: ElementRef<'_>, index: usize) -> Option<String> {
    let onclick = el.value().attr("onclick")?;
    let token = onclick.split(',').nth(index)?;
    let value = token
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '\'' | '"' | '(' | ')' | ';'));
    Some(value.to_string())
}

pub fn get_category(el: ElementRef<'_>) -> Option<String> {
    get_from_onclick(el, CATEGORY_INDEX)
}

pub fn get_ref_marker(el: ElementRef<'_>) -> Option<String> {
    get_from_onclick(el, REF_MARKER_INDEX)
}

/// Splits markup around every `<br>`, `<br/>` or `<br />` variant.
pub fn split_by_br(html: &str) -> Vec<String> {
    BR_RE.split(html).map(str::to_string).collect()
}

/// Removes the opening and closing tags of `tag`, keeping what they wrap.
pub fn remove_tags(html: &str, tag: &str) -> String {
    let pattern = format!(
        r"(?is)<\s*{tag}\b[^>]*>|<\s*/\s*{tag}\s*>",
        tag = regex::escape(tag)
    );
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(html, "").into_owned(),
        Err(_) => html.to_string(),
    }
}

/// Drops a `/<roman numeral>` disambiguator from a year (`1999/II` -> `1999`).
pub fn trim_year(year: Option<&str>) -> Option<String> {
    year.map(|y| YEAR_SUFFIX_RE.replace_all(y, "").into_owned())
}

/// Drops a trailing parenthesised roman numeral from a name (`John Smith (II)`).
pub fn trim_name(name: &str) -> String {
    ROMAN_SUFFIX_RE.replace(name, "").into_owned()
}

/// Collapses every whitespace run to one space and trims the ends.
pub fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RE.replace_all(s.trim(), " ").into_owned()
}

/// Episode summary from a credit's "N episodes, YYYY-YYYY" link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeInfo {
    pub count: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
}

/// Reads "N episode(s)[, YYYY[-YYYY]]" out of text.
pub fn parse_episode_info(text: &str) -> EpisodeInfo {
    let Some(caps) = EPISODE_INFO_RE.captures(text) else {
        return EpisodeInfo::default();
    };
    let group = |i: usize| caps.get(i).map(|m| m.as_str().to_string());
    EpisodeInfo {
        count: group(1),
        start_year: group(2),
        end_year: group(3),
    }
}

pub fn get_episode_info(el: ElementRef<'_>) -> EpisodeInfo {
    parse_episode_info(&el.text().collect::<String>())
}

/// A money amount pulled out of free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    /// Bare digits, e.g. `63000000`.
    pub amount: String,
    pub denomination: Option<Currency>,
}

/// First money amount in `text` with its currency, if there is one.
pub fn extract_money(text: &str) -> Option<Money> {
    if !is_money_string(text) {
        return None;
    }
    Some(Money {
        amount: trim_money_string(text),
        denomination: get_denomination(text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first_link(html: &str) -> Html {
        Html::parse_fragment(html)
    }

    #[test]
    fn test_ids_from_href() {
        let doc = first_link(
            r#"<a href="/title/tt0133093/?ref_=nm_knf_t1">x</a><a href="/name/nm0000206/">y</a><span>z</span>"#,
        );
        let a = Selector::parse("a").unwrap();
        let span = Selector::parse("span").unwrap();
        let links: Vec<_> = doc.select(&a).collect();

        assert_eq!(get_title_id(links[0]), Some("tt0133093".to_string()));
        assert_eq!(get_name_id(links[0]), None);
        assert_eq!(get_name_id(links[1]), Some("nm0000206".to_string()));
        assert_eq!(get_company_id(doc.select(&span).next().unwrap()), None);
    }

    #[test]
    fn test_onclick_tokens() {
        let doc = first_link(
            r#"<a onclick="filmoSeeMoreEpisodes('nm0000206', 'tt0108778', 'actor', 'actor', 'nm_flmg_eps_act_1');">more</a>"#,
        );
        let a = doc.select(&Selector::parse("a").unwrap()).next().unwrap();
        assert_eq!(get_category(a), Some("actor".to_string()));
        assert_eq!(get_ref_marker(a), Some("nm_flmg_eps_act_1".to_string()));
        assert_eq!(get_from_onclick(a, 9), None);
    }

    #[test]
    fn test_onclick_missing_attribute() {
        let doc = first_link("<a href=\"/\">x</a>");
        let a = doc.select(&Selector::parse("a").unwrap()).next().unwrap();
        assert_eq!(get_category(a), None);
    }

    #[test]
    fn test_split_by_br_variants() {
        assert_eq!(
            split_by_br("Neo<br>The One<br/>Mr. Anderson< br />Thomas"),
            vec!["Neo", "The One", "Mr. Anderson", "Thomas"]
        );
        assert_eq!(split_by_br("single"), vec!["single"]);
    }

    #[test]
    fn test_remove_tags_keeps_content() {
        assert_eq!(
            remove_tags(r#"<td class="x">4:3<br>16:9</td><tr>keep</tr>"#, "td"),
            "4:3<br>16:9<tr>keep</tr>"
        );
        // A tag sharing the prefix is left alone.
        assert_eq!(remove_tags("<tdx>a</tdx>", "td"), "<tdx>a</tdx>");
    }

    #[test]
    fn test_trim_year_and_name() {
        assert_eq!(trim_year(Some("1999/II")), Some("1999".to_string()));
        assert_eq!(trim_year(Some("2004")), Some("2004".to_string()));
        assert_eq!(trim_year(None), None);
        assert_eq!(trim_name("John Smith (II)"), "John Smith");
        assert_eq!(trim_name("Keanu Reeves"), "Keanu Reeves");
        assert_eq!(trim_name("Heat (Band)"), "Heat (Band)");
    }

    #[test]
    fn test_episode_info() {
        assert_eq!(
            parse_episode_info("8 episodes, 1999-2003"),
            EpisodeInfo {
                count: Some("8".into()),
                start_year: Some("1999".into()),
                end_year: Some("2003".into()),
            }
        );
        assert_eq!(
            parse_episode_info(" 1 episode, 2001 "),
            EpisodeInfo {
                count: Some("1".into()),
                start_year: Some("2001".into()),
                end_year: None,
            }
        );
        assert_eq!(parse_episode_info("uncredited"), EpisodeInfo::default());
    }

    #[test]
    fn test_extract_money() {
        assert_eq!(
            extract_money("Budget: $63,000,000 (estimated)"),
            Some(Money {
                amount: "63000000".into(),
                denomination: Some(Currency::Usd),
            })
        );
        assert_eq!(extract_money("Budget: unknown"), None);
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
    }
}
