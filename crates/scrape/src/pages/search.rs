// ABOUTME: Parser for the JSON search suggestion feed.
// ABOUTME: People and titles are told apart by their ID prefix; other entries are skipped.

use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::extract::trim_name;
use crate::models::{
    RawSearchName, RawSearchTitle, SearchResult, SearchResultName, SearchResultTitle,
};

const VIDEO_GAME: &str = "video game";

#[derive(Debug, Default, Deserialize)]
struct Suggestions {
    #[serde(default)]
    d: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
struct Suggestion {
    id: String,
    #[serde(default)]
    rank: Option<Value>,
    #[serde(default)]
    l: Option<String>,
    #[serde(default)]
    s: Option<String>,
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    y: Option<Value>,
    #[serde(default)]
    yr: Option<String>,
}

/// Feed address for `keyword`: `{root}/suggestion/{first char}/{keyword}.json`.
///
/// Both segments are percent-encoded, so `/`, `?` and `#` stay inside the keyword.
/// Returns `Ok(None)` for an empty keyword.
pub fn suggestion_url(root: &str, keyword: &str) -> Result<Option<Url>, url::ParseError> {
    let Some(first) = keyword.chars().next() else {
        return Ok(None);
    };
    let mut url = Url::parse(root)?;
    url.path_segments_mut()
        .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .push("suggestion")
        .push(first.encode_utf8(&mut [0; 4]))
        .push(&format!("{keyword}.json"));
    Ok(Some(url))
}

/// Parses a suggestion feed into results, in feed order.
pub fn parse_suggestions(json: &str) -> Result<Vec<SearchResult>, serde_json::Error> {
    let feed: Suggestions = serde_json::from_str(json)?;
    Ok(feed.d.into_iter().filter_map(suggestion).collect())
}

fn suggestion(s: Suggestion) -> Option<SearchResult> {
    if s.id.starts_with("nm") {
        return Some(SearchResult::Name(SearchResultName::from(RawSearchName {
            imdb_id: s.id,
            search_rank: s.rank.as_ref().and_then(scalar),
            name: s.l.as_deref().map(trim_name),
            known_for: s.s,
        })));
    }
    if !s.id.starts_with("tt") {
        return None;
    }

    let starring = match (&s.s, s.q.as_deref()) {
        (Some(stars), kind) if kind != Some(VIDEO_GAME) => stars
            .split(',')
            .map(str::trim)
            .filter(|star| !star.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };
    let mut start_year = s.y.as_ref().and_then(scalar);
    let mut end_year = None;
    if let Some(range) = &s.yr {
        let mut bounds = range.splitn(2, '-');
        if let Some(start) = bounds.next().map(str::trim).filter(|y| !y.is_empty()) {
            start_year = Some(start.to_string());
        }
        end_year = bounds
            .next()
            .map(str::trim)
            .filter(|y| !y.is_empty())
            .map(str::to_string);
    }

    Some(SearchResult::Title(SearchResultTitle::from(RawSearchTitle {
        imdb_id: s.id,
        search_rank: s.rank.as_ref().and_then(scalar),
        display_title: s.l,
        title_type: s.q,
        starring,
        start_year,
        end_year,
    })))
}

fn scalar(v: &Value) -> Option<String> {
    match v {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_suggestion_url_encodes_keyword() {
        let url = |keyword| {
            suggestion_url("https://v2.sg.media-imdb.com", keyword)
                .unwrap()
                .map(|u| u.to_string())
        };
        assert_eq!(
            url("matrix").as_deref(),
            Some("https://v2.sg.media-imdb.com/suggestion/m/matrix.json")
        );
        assert_eq!(
            url("AC/DC").as_deref(),
            Some("https://v2.sg.media-imdb.com/suggestion/A/AC%2FDC.json")
        );
        assert_eq!(
            url("C#").as_deref(),
            Some("https://v2.sg.media-imdb.com/suggestion/C/C%23.json")
        );
        assert_eq!(
            url("who?").as_deref(),
            Some("https://v2.sg.media-imdb.com/suggestion/w/who%3F.json")
        );
        assert_eq!(
            url("/x").as_deref(),
            Some("https://v2.sg.media-imdb.com/suggestion/%2F/%2Fx.json")
        );
        assert_eq!(url(""), None);
    }

    #[test]
    fn test_suggestion_url_keeps_root_path() {
        let url = suggestion_url("http://127.0.0.1:8080/feed/", "neo").unwrap();
        assert_eq!(
            url.map(String::from).as_deref(),
            Some("http://127.0.0.1:8080/feed/suggestion/n/neo.json")
        );
    }

    #[test]
    fn test_names_and_titles() {
        let json = r#"{"v":1,"q":"keanu","d":[
            {"id":"nm0000206","l":"Keanu Reeves","s":"Actor, The Matrix (1999)","rank":89},
            {"id":"tt0133093","l":"The Matrix","q":"feature","s":"Keanu Reeves, Laurence Fishburne","y":1999,"rank":300},
            {"id":"tt0364725","l":"Some Game","q":"video game","s":"Keanu Reeves","y":2005},
            {"id":"tt0106179","l":"The X Files","q":"TV series","yr":"1993-2018","y":1993},
            {"id":"/list/ls000","l":"A list"}
        ]}"#;
        let results = parse_suggestions(json).unwrap();
        assert_eq!(results.len(), 4);

        let SearchResult::Name(name) = &results[0] else {
            panic!("expected a name");
        };
        assert_eq!(name.name(), Some("Keanu Reeves"));
        assert_eq!(name.search_rank(), Some(89));

        let SearchResult::Title(matrix) = &results[1] else {
            panic!("expected a title");
        };
        assert_eq!(matrix.starring(), ["Keanu Reeves", "Laurence Fishburne"]);
        assert_eq!(matrix.start_year(), Some(1999));

        let SearchResult::Title(game) = &results[2] else {
            panic!("expected a title");
        };
        assert!(game.starring().is_empty());

        let SearchResult::Title(series) = &results[3] else {
            panic!("expected a title");
        };
        assert_eq!(series.start_year(), Some(1993));
        assert_eq!(series.end_year(), Some(2018));
    }

    #[test]
    fn test_missing_entries_list() {
        assert!(parse_suggestions(r#"{"v":1}"#).unwrap().is_empty());
    }
}
