// ABOUTME: Search suggestion records for people and titles.
// ABOUTME: Results compare and sort by IMDb ID alone, whatever their rank or text.

use std::cmp::Ordering;
use std::fmt;

use marquee_core::to_int;
use serde::{Deserialize, Serialize};

/// Raw values of a person suggestion.
#[derive(Debug, Clone, Default)]
pub struct RawSearchName {
    pub imdb_id: String,
    pub search_rank: Option<String>,
    pub name: Option<String>,
    pub known_for: Option<String>,
}

/// Raw values of a title suggestion.
#[derive(Debug, Clone, Default)]
pub struct RawSearchTitle {
    pub imdb_id: String,
    pub search_rank: Option<String>,
    pub display_title: Option<String>,
    pub title_type: Option<String>,
    pub starring: Vec<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
}

/// A person returned by the search suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultName {
    imdb_id: String,
    search_rank: Option<i64>,
    name: Option<String>,
    known_for: Option<String>,
}

impl SearchResultName {
    pub fn imdb_id(&self) -> &str {
        &self.imdb_id
    }

    pub fn search_rank(&self) -> Option<i64> {
        self.search_rank
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Short "known for" blurb, e.g. `Actor, The Matrix (1999)`.
    pub fn known_for(&self) -> Option<&str> {
        self.known_for.as_deref()
    }
}

impl From<RawSearchName> for SearchResultName {
    fn from(raw: RawSearchName) -> Self {
        Self {
            imdb_id: raw.imdb_id,
            search_rank: to_int(raw.search_rank.as_deref()),
            name: raw.name,
            known_for: raw.known_for,
        }
    }
}

impl fmt::Display for SearchResultName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.name.as_deref().unwrap_or("?"),
            self.imdb_id
        )?;
        if let Some(known_for) = &self.known_for {
            write!(f, ", known for: {known_for}")?;
        }
        if let Some(rank) = self.search_rank {
            write!(f, " (rank: {rank})")?;
        }
        Ok(())
    }
}

/// A title returned by the search suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultTitle {
    imdb_id: String,
    search_rank: Option<i64>,
    display_title: Option<String>,
    title_type: Option<String>,
    starring: Vec<String>,
    start_year: Option<i64>,
    end_year: Option<i64>,
}

impl SearchResultTitle {
    pub fn imdb_id(&self) -> &str {
        &self.imdb_id
    }

    pub fn search_rank(&self) -> Option<i64> {
        self.search_rank
    }

    pub fn display_title(&self) -> Option<&str> {
        self.display_title.as_deref()
    }

    /// e.g. `feature`, `TV series`, `video game`.
    pub fn title_type(&self) -> Option<&str> {
        self.title_type.as_deref()
    }

    /// Headline cast; empty for video games.
    pub fn starring(&self) -> &[String] {
        &self.starring
    }

    pub fn start_year(&self) -> Option<i64> {
        self.start_year
    }

    pub fn end_year(&self) -> Option<i64> {
        self.end_year
    }
}

impl From<RawSearchTitle> for SearchResultTitle {
    fn from(raw: RawSearchTitle) -> Self {
        Self {
            imdb_id: raw.imdb_id,
            search_rank: to_int(raw.search_rank.as_deref()),
            display_title: raw.display_title,
            title_type: raw.title_type,
            starring: raw.starring,
            start_year: to_int(raw.start_year.as_deref()),
            end_year: to_int(raw.end_year.as_deref()),
        }
    }
}

impl fmt::Display for SearchResultTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}), {}",
            self.display_title.as_deref().unwrap_or("?"),
            self.imdb_id,
            self.title_type.as_deref().unwrap_or("?")
        )?;
        if !self.starring.is_empty() {
            write!(f, ". Starring {}", self.starring.join(", "))?;
        }
        match (self.start_year, self.end_year) {
            (Some(start), Some(end)) => write!(f, " ({start}-{end})")?,
            (Some(start), None) => write!(f, " {start}")?,
            _ => {}
        }
        if let Some(rank) = self.search_rank {
            write!(f, " (rank: {rank})")?;
        }
        Ok(())
    }
}

/// One search suggestion, either a person or a title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SearchResult {
    Name(SearchResultName),
    Title(SearchResultTitle),
}

impl SearchResult {
    pub fn imdb_id(&self) -> &str {
        match self {
            SearchResult::Name(n) => n.imdb_id(),
            SearchResult::Title(t) => t.imdb_id(),
        }
    }

    pub fn search_rank(&self) -> Option<i64> {
        match self {
            SearchResult::Name(n) => n.search_rank(),
            SearchResult::Title(t) => t.search_rank(),
        }
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchResult::Name(n) => fmt::Display::fmt(n, f),
            SearchResult::Title(t) => fmt::Display::fmt(t, f),
        }
    }
}

macro_rules! order_by_imdb_id {
    ($($ty:ty),+) => {$(
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.imdb_id() == other.imdb_id()
            }
        }

        impl Eq for $ty {}

        impl PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $ty {
            fn cmp(&self, other: &Self) -> Ordering {
                self.imdb_id().cmp(other.imdb_id())
            }
        }
    )+};
}

order_by_imdb_id!(SearchResultName, SearchResultTitle, SearchResult);

#[cfg(test)]
mod tests {
    use super::*;

    fn title(id: &str, rank: &str) -> SearchResult {
        SearchResult::Title(SearchResultTitle::from(RawSearchTitle {
            imdb_id: id.into(),
            search_rank: Some(rank.into()),
            ..RawSearchTitle::default()
        }))
    }

    #[test]
    fn test_equality_ignores_everything_but_id() {
        assert_eq!(title("tt1", "5"), title("tt1", "900"));
        assert_ne!(title("tt1", "5"), title("tt2", "5"));
    }

    #[test]
    fn test_ordering_is_by_id() {
        let name = SearchResult::Name(SearchResultName::from(RawSearchName {
            imdb_id: "nm0000206".into(),
            search_rank: Some("1".into()),
            ..RawSearchName::default()
        }));
        let mut results = vec![title("tt0133093", "1"), name, title("tt0000001", "2")];
        results.sort();
        let ids: Vec<&str> = results.iter().map(SearchResult::imdb_id).collect();
        assert_eq!(ids, vec!["nm0000206", "tt0000001", "tt0133093"]);
    }
}
