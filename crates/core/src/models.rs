// ABOUTME: Typed records for the seven tab-separated datasets.
// ABOUTME: Each record is built once from a sentinel-normalised row and is read-only afterwards.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::coerce::{split_list, to_float, to_int, to_opt_bool};
use crate::schema::Dataset;

static QUOTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"".+?""#).unwrap());

/// A record that can be built from one row of a dataset.
pub trait DatasetRecord: Sized {
    /// The dataset this record type is read from.
    const DATASET: Dataset;

    /// Builds the record from a row whose `\N` columns are already `None`.
    ///
    /// Numeric and boolean columns that fail to convert are left unset.
    fn from_fields(fields: &[Option<&str>]) -> Self;
}

fn col<'a>(fields: &[Option<&'a str>], idx: usize) -> Option<&'a str> {
    fields.get(idx).copied().flatten()
}

fn owned(v: Option<&str>) -> Option<String> {
    v.map(str::to_string)
}

fn id(v: Option<&str>) -> String {
    v.unwrap_or_default().to_string()
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// A localized version of a title (`title.akas.tsv`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleAkas {
    title_id: String,
    ordering: Option<i64>,
    localized_title: Option<String>,
    region: Option<String>,
    language: Option<String>,
    types: Vec<String>,
    attributes: Vec<String>,
    is_original_title: Option<bool>,
}

impl TitleAkas {
    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    /// Uniquely identifies the row for a given title.
    pub fn ordering(&self) -> Option<i64> {
        self.ordering
    }

    pub fn localized_title(&self) -> Option<&str> {
        self.localized_title.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn is_original_title(&self) -> Option<bool> {
        self.is_original_title
    }
}

impl DatasetRecord for TitleAkas {
    const DATASET: Dataset = Dataset::TitleAkas;

    fn from_fields(fields: &[Option<&str>]) -> Self {
        Self {
            title_id: id(col(fields, 0)),
            ordering: to_int(col(fields, 1)),
            localized_title: owned(col(fields, 2)),
            region: owned(col(fields, 3)),
            language: owned(col(fields, 4)),
            types: split_list(col(fields, 5)),
            attributes: split_list(col(fields, 6)),
            is_original_title: to_opt_bool(col(fields, 7)),
        }
    }
}

impl fmt::Display for TitleAkas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.localized_title.as_deref().unwrap_or("?"),
            self.title_id
        )?;
        match (&self.region, &self.language) {
            (Some(region), Some(language)) => write!(f, ": {region} - {language}"),
            (Some(region), None) => write!(f, ": {region}"),
            (None, Some(language)) => write!(f, ": {language}"),
            (None, None) => Ok(()),
        }
    }
}

/// Basic information for a title (`title.basics.tsv`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleBasics {
    title_id: String,
    title_type: Option<String>,
    primary_title: Option<String>,
    original_title: Option<String>,
    is_adult: Option<bool>,
    start_year: Option<i64>,
    end_year: Option<i64>,
    runtime_minutes: Option<i64>,
    genres: Vec<String>,
}

impl TitleBasics {
    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    /// Format of the title, e.g. `movie`, `short`, `tvSeries`, `tvEpisode`.
    pub fn title_type(&self) -> Option<&str> {
        self.title_type.as_deref()
    }

    pub fn primary_title(&self) -> Option<&str> {
        self.primary_title.as_deref()
    }

    pub fn original_title(&self) -> Option<&str> {
        self.original_title.as_deref()
    }

    pub fn is_adult(&self) -> Option<bool> {
        self.is_adult
    }

    /// Release year, or the year a series started.
    pub fn start_year(&self) -> Option<i64> {
        self.start_year
    }

    /// Year a series ended; unset for everything else.
    pub fn end_year(&self) -> Option<i64> {
        self.end_year
    }

    pub fn runtime_minutes(&self) -> Option<i64> {
        self.runtime_minutes
    }

    pub fn genres(&self) -> &[String] {
        &self.genres
    }
}

impl DatasetRecord for TitleBasics {
    const DATASET: Dataset = Dataset::TitleBasics;

    fn from_fields(fields: &[Option<&str>]) -> Self {
        Self {
            title_id: id(col(fields, 0)),
            title_type: owned(col(fields, 1)),
            primary_title: owned(col(fields, 2)),
            original_title: owned(col(fields, 3)),
            is_adult: to_opt_bool(col(fields, 4)),
            start_year: to_int(col(fields, 5)),
            end_year: to_int(col(fields, 6)),
            runtime_minutes: to_int(col(fields, 7)),
            genres: split_list(col(fields, 8)),
        }
    }
}

impl fmt::Display for TitleBasics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}, ",
            self.primary_title.as_deref().unwrap_or("?"),
            self.title_id,
            self.title_type.as_deref().unwrap_or("?")
        )?;
        match self.start_year {
            Some(year) => write!(f, "{year}")?,
            None => f.write_str("????")?,
        }
        if let Some(end) = self.end_year {
            write!(f, " - {end}")?;
        }
        Ok(())
    }
}

/// Directors and writers of a title (`title.crew.tsv`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleCrew {
    title_id: String,
    director_ids: Vec<String>,
    writer_ids: Vec<String>,
}

impl TitleCrew {
    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    /// `nm` IDs of the directors.
    pub fn director_ids(&self) -> &[String] {
        &self.director_ids
    }

    /// `nm` IDs of the writers.
    pub fn writer_ids(&self) -> &[String] {
        &self.writer_ids
    }
}

impl DatasetRecord for TitleCrew {
    const DATASET: Dataset = Dataset::TitleCrew;

    fn from_fields(fields: &[Option<&str>]) -> Self {
        Self {
            title_id: id(col(fields, 0)),
            director_ids: split_list(col(fields, 1)),
            writer_ids: split_list(col(fields, 2)),
        }
    }
}

impl fmt::Display for TitleCrew {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} directed by {} and written by {}",
            self.title_id,
            join_or_dash(&self.director_ids),
            join_or_dash(&self.writer_ids)
        )
    }
}

/// An episode of a series (`title.episode.tsv`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleEpisode {
    title_id: String,
    parent_title_id: Option<String>,
    season_number: Option<i64>,
    episode_number: Option<i64>,
}

impl TitleEpisode {
    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    /// `tt` ID of the parent series.
    pub fn parent_title_id(&self) -> Option<&str> {
        self.parent_title_id.as_deref()
    }

    pub fn season_number(&self) -> Option<i64> {
        self.season_number
    }

    pub fn episode_number(&self) -> Option<i64> {
        self.episode_number
    }
}

impl DatasetRecord for TitleEpisode {
    const DATASET: Dataset = Dataset::TitleEpisode;

    fn from_fields(fields: &[Option<&str>]) -> Self {
        Self {
            title_id: id(col(fields, 0)),
            parent_title_id: owned(col(fields, 1)),
            season_number: to_int(col(fields, 2)),
            episode_number: to_int(col(fields, 3)),
        }
    }
}

impl fmt::Display for TitleEpisode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.parent_title_id.as_deref().unwrap_or("?"))?;
        if let Some(season) = self.season_number {
            write!(f, " S{season}")?;
        }
        if let Some(episode) = self.episode_number {
            write!(f, "E{episode}")?;
        }
        write!(f, ": {}", self.title_id)
    }
}

/// A principal cast or crew member of a title (`title.principals.tsv`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePrincipalCrew {
    title_id: String,
    ordering: Option<i64>,
    name_id: String,
    category: Option<String>,
    job: Option<String>,
    characters: Vec<String>,
}

impl TitlePrincipalCrew {
    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    pub fn ordering(&self) -> Option<i64> {
        self.ordering
    }

    pub fn name_id(&self) -> &str {
        &self.name_id
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn job(&self) -> Option<&str> {
        self.job.as_deref()
    }

    pub fn characters(&self) -> &[String] {
        &self.characters
    }
}

impl DatasetRecord for TitlePrincipalCrew {
    const DATASET: Dataset = Dataset::TitlePrincipals;

    fn from_fields(fields: &[Option<&str>]) -> Self {
        Self {
            title_id: id(col(fields, 0)),
            ordering: to_int(col(fields, 1)),
            name_id: id(col(fields, 2)),
            category: owned(col(fields, 3)),
            job: owned(col(fields, 4)),
            characters: parse_characters(col(fields, 5)),
        }
    }
}

impl fmt::Display for TitlePrincipalCrew {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.name_id,
            self.title_id,
            self.category.as_deref().unwrap_or("?")
        )?;
        if let Some(job) = &self.job {
            write!(f, " as {job}")?;
        }
        if !self.characters.is_empty() {
            write!(f, " playing {}", self.characters.join(", "))?;
        }
        Ok(())
    }
}

/// Reads the `characters` column: a bracketed list of quoted names
/// (`["Hero","Villain"]`) or a plain comma-separated value.
pub fn parse_characters(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(s) if s.len() >= 2 && s.starts_with('[') && s.ends_with(']') => QUOTED_RE
            .find_iter(s)
            .map(|m| m.as_str().replace('"', ""))
            .collect(),
        other => split_list(other),
    }
}

/// User rating summary for a title (`title.ratings.tsv`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleRating {
    title_id: String,
    average_rating: Option<f64>,
    num_votes: Option<i64>,
}

impl TitleRating {
    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    /// Weighted average of all user ratings.
    pub fn average_rating(&self) -> Option<f64> {
        self.average_rating
    }

    pub fn num_votes(&self) -> Option<i64> {
        self.num_votes
    }
}

impl DatasetRecord for TitleRating {
    const DATASET: Dataset = Dataset::TitleRatings;

    fn from_fields(fields: &[Option<&str>]) -> Self {
        Self {
            title_id: id(col(fields, 0)),
            average_rating: to_float(col(fields, 1)),
            num_votes: to_int(col(fields, 2)),
        }
    }
}

impl fmt::Display for TitleRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: Rated ", self.title_id)?;
        match self.average_rating {
            Some(rating) => write!(f, "{rating}")?,
            None => f.write_str("?")?,
        }
        write!(f, " with {} votes", self.num_votes.unwrap_or(0))
    }
}

/// A person (`name.basics.tsv`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameBasics {
    name_id: String,
    primary_name: Option<String>,
    birth_year: Option<i64>,
    death_year: Option<i64>,
    primary_professions: Vec<String>,
    known_for_titles: Vec<String>,
}

impl NameBasics {
    pub fn name_id(&self) -> &str {
        &self.name_id
    }

    pub fn primary_name(&self) -> Option<&str> {
        self.primary_name.as_deref()
    }

    pub fn birth_year(&self) -> Option<i64> {
        self.birth_year
    }

    pub fn death_year(&self) -> Option<i64> {
        self.death_year
    }

    pub fn primary_professions(&self) -> &[String] {
        &self.primary_professions
    }

    /// `tt` IDs of the titles the person is known for.
    pub fn known_for_titles(&self) -> &[String] {
        &self.known_for_titles
    }
}

impl DatasetRecord for NameBasics {
    const DATASET: Dataset = Dataset::NameBasics;

    fn from_fields(fields: &[Option<&str>]) -> Self {
        Self {
            name_id: id(col(fields, 0)),
            primary_name: owned(col(fields, 1)),
            birth_year: to_int(col(fields, 2)),
            death_year: to_int(col(fields, 3)),
            primary_professions: split_list(col(fields, 4)),
            known_for_titles: split_list(col(fields, 5)),
        }
    }
}

impl fmt::Display for NameBasics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): ",
            self.primary_name.as_deref().unwrap_or("?"),
            self.name_id
        )?;
        match self.birth_year {
            Some(year) => write!(f, "{year}")?,
            None => f.write_str("???")?,
        }
        f.write_str(" - ")?;
        if let Some(year) = self.death_year {
            write!(f, "{year}")?;
        }
        Ok(())
    }
}
