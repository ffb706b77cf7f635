// ABOUTME: Immutable table of the seven tab-separated dataset schemas.
// ABOUTME: Maps each Dataset to its published file name and ordered column list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the published tab-separated datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dataset {
    TitleAkas,
    TitleBasics,
    TitleCrew,
    TitleEpisode,
    TitlePrincipals,
    TitleRatings,
    NameBasics,
}

struct Schema {
    name: &'static str,
    default_filename: &'static str,
    columns: &'static [&'static str],
}

// Indexed by `Dataset as usize`.
const SCHEMAS: [Schema; 7] = [
    Schema {
        name: "title-akas",
        default_filename: "title.akas.tsv",
        columns: &[
            "titleId",
            "ordering",
            "title",
            "region",
            "language",
            "types",
            "attributes",
            "isOriginalTitle",
        ],
    },
    Schema {
        name: "title-basics",
        default_filename: "title.basics.tsv",
        columns: &[
            "tconst",
            "titleType",
            "primaryTitle",
            "originalTitle",
            "isAdult",
            "startYear",
            "endYear",
            "runtimeMinutes",
            "genres",
        ],
    },
    Schema {
        name: "title-crew",
        default_filename: "title.crew.tsv",
        columns: &["tconst", "directors", "writers"],
    },
    Schema {
        name: "title-episode",
        default_filename: "title.episode.tsv",
        columns: &["tconst", "parentTconst", "seasonNumber", "episodeNumber"],
    },
    Schema {
        name: "title-principals",
        default_filename: "title.principals.tsv",
        columns: &["tconst", "ordering", "nconst", "category", "job", "characters"],
    },
    Schema {
        name: "title-ratings",
        default_filename: "title.ratings.tsv",
        columns: &["tconst", "averageRating", "numVotes"],
    },
    Schema {
        name: "name-basics",
        default_filename: "name.basics.tsv",
        columns: &[
            "nconst",
            "primaryName",
            "birthYear",
            "deathYear",
            "primaryProfession",
            "knownForTitles",
        ],
    },
];

impl Dataset {
    /// Every dataset, in publication order.
    pub const ALL: [Dataset; 7] = [
        Dataset::TitleAkas,
        Dataset::TitleBasics,
        Dataset::TitleCrew,
        Dataset::TitleEpisode,
        Dataset::TitlePrincipals,
        Dataset::TitleRatings,
        Dataset::NameBasics,
    ];

    fn schema(self) -> &'static Schema {
        &SCHEMAS[self as usize]
    }

    /// Short kebab-case name, e.g. `title-basics`.
    pub fn name(self) -> &'static str {
        self.schema().name
    }

    /// File name the dataset is published under, e.g. `title.basics.tsv`.
    pub fn default_filename(self) -> &'static str {
        self.schema().default_filename
    }

    /// Header names in column order.
    pub fn columns(self) -> &'static [&'static str] {
        self.schema().columns
    }

    /// Exact number of tab-separated columns every row must have.
    pub fn column_count(self) -> usize {
        self.schema().columns.len()
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown dataset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dataset: {0}")]
pub struct UnknownDataset(pub String);

impl FromStr for Dataset {
    type Err = UnknownDataset;

    /// Accepts the kebab-case name (`title-basics`), the snake-case name, or the
    /// published file name with or without `.tsv`/`.tsv.gz`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .trim_end_matches(".gz")
            .trim_end_matches(".tsv")
            .to_lowercase()
            .replace(['.', '_'], "-");
        Dataset::ALL
            .into_iter()
            .find(|d| d.name() == normalized)
            .ok_or_else(|| UnknownDataset(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_counts() {
        let counts: Vec<usize> = Dataset::ALL.iter().map(|d| d.column_count()).collect();
        assert_eq!(counts, vec![8, 9, 3, 4, 6, 3, 6]);
    }

    #[test]
    fn test_schema_table_is_indexed_by_variant() {
        for dataset in Dataset::ALL {
            assert_eq!(dataset.name().parse::<Dataset>(), Ok(dataset));
        }
    }

    #[test]
    fn test_from_str_accepts_file_names() {
        assert_eq!("title.basics.tsv".parse::<Dataset>(), Ok(Dataset::TitleBasics));
        assert_eq!("name.basics.tsv.gz".parse::<Dataset>(), Ok(Dataset::NameBasics));
        assert_eq!("title_principals".parse::<Dataset>(), Ok(Dataset::TitlePrincipals));
        assert!("title.trivia".parse::<Dataset>().is_err());
    }

    #[test]
    fn test_default_filenames() {
        assert_eq!(Dataset::TitleEpisode.default_filename(), "title.episode.tsv");
        assert_eq!(Dataset::TitleRatings.to_string(), "title-ratings");
    }
}
