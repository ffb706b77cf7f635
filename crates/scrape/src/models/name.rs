// ABOUTME: Scraped person records: the biography page and filmography credits.
// ABOUTME: Built from raw text drafts; unparseable dates, years and heights are left unset.

use std::fmt;

use chrono::NaiveDate;
use marquee_core::{to_float, to_int, to_opt_datetime};
use serde::{Deserialize, Serialize};

/// Raw text gathered from a person's biography page.
#[derive(Debug, Clone, Default)]
pub struct RawName {
    pub name_id: String,
    pub display_name: Option<String>,
    pub known_for_titles: Vec<String>,
    pub birth_name: Option<String>,
    pub birth_date: Option<String>,
    pub birth_city: Option<String>,
    pub death_date: Option<String>,
    pub death_city: Option<String>,
    pub death_cause: Option<String>,
    pub nicknames: Vec<String>,
    pub height: Option<String>,
}

/// A person's biography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameScrape {
    name_id: String,
    display_name: Option<String>,
    known_for_titles: Vec<String>,
    birth_name: Option<String>,
    birth_date: Option<NaiveDate>,
    birth_city: Option<String>,
    death_date: Option<NaiveDate>,
    death_city: Option<String>,
    death_cause: Option<String>,
    nicknames: Vec<String>,
    height: Option<f64>,
}

impl NameScrape {
    pub fn name_id(&self) -> &str {
        &self.name_id
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// `tt` IDs; only filled when known-for titles were requested.
    pub fn known_for_titles(&self) -> &[String] {
        &self.known_for_titles
    }

    pub fn birth_name(&self) -> Option<&str> {
        self.birth_name.as_deref()
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn birth_city(&self) -> Option<&str> {
        self.birth_city.as_deref()
    }

    pub fn death_date(&self) -> Option<NaiveDate> {
        self.death_date
    }

    pub fn death_city(&self) -> Option<&str> {
        self.death_city.as_deref()
    }

    pub fn death_cause(&self) -> Option<&str> {
        self.death_cause.as_deref()
    }

    pub fn nicknames(&self) -> &[String] {
        &self.nicknames
    }

    /// Height in metres.
    pub fn height(&self) -> Option<f64> {
        self.height
    }
}

impl From<RawName> for NameScrape {
    fn from(raw: RawName) -> Self {
        Self {
            name_id: raw.name_id,
            display_name: raw.display_name,
            known_for_titles: raw.known_for_titles,
            birth_name: raw.birth_name,
            birth_date: to_opt_datetime(raw.birth_date.as_deref()),
            birth_city: raw.birth_city,
            death_date: to_opt_datetime(raw.death_date.as_deref()),
            death_city: raw.death_city,
            death_cause: raw.death_cause,
            nicknames: raw.nicknames,
            height: to_float(raw.height.as_deref()),
        }
    }
}

impl fmt::Display for NameScrape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] (",
            self.display_name.as_deref().unwrap_or("?"),
            self.name_id
        )?;
        if let Some(born) = self.birth_date {
            write!(f, "{born}")?;
        }
        f.write_str(" - ")?;
        if let Some(died) = self.death_date {
            write!(f, "{died}")?;
        }
        f.write_str(")")?;
        if let Some(height) = self.height {
            write!(f, ": {height}m")?;
        }
        Ok(())
    }
}

/// Raw text gathered from one filmography row or episode.
#[derive(Debug, Clone, Default)]
pub struct RawNameCredit {
    pub name_id: String,
    pub title_id: Option<String>,
    pub category: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub role: Option<String>,
    pub title_notes: Vec<String>,
}

/// One title in a person's filmography.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameCreditScrape {
    name_id: String,
    title_id: Option<String>,
    category: Option<String>,
    start_year: Option<i64>,
    end_year: Option<i64>,
    role: Option<String>,
    title_notes: Vec<String>,
}

impl NameCreditScrape {
    pub fn name_id(&self) -> &str {
        &self.name_id
    }

    pub fn title_id(&self) -> Option<&str> {
        self.title_id.as_deref()
    }

    /// Filmography section, e.g. `actor`, `director`, `music_department`.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn start_year(&self) -> Option<i64> {
        self.start_year
    }

    pub fn end_year(&self) -> Option<i64> {
        self.end_year
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Parenthesised notes next to the title, e.g. `TV Series`.
    pub fn title_notes(&self) -> &[String] {
        &self.title_notes
    }
}

impl From<RawNameCredit> for NameCreditScrape {
    fn from(raw: RawNameCredit) -> Self {
        Self {
            name_id: raw.name_id,
            title_id: raw.title_id,
            category: raw.category,
            start_year: to_int(raw.start_year.as_deref()),
            end_year: to_int(raw.end_year.as_deref()),
            role: raw.role,
            title_notes: raw.title_notes,
        }
    }
}

impl fmt::Display for NameCreditScrape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} in {} (",
            self.name_id,
            self.title_id.as_deref().unwrap_or("?")
        )?;
        if let Some(start) = self.start_year {
            write!(f, "{start}")?;
        }
        if let Some(end) = self.end_year {
            write!(f, " - {end}")?;
        }
        write!(f, ") as {}", self.category.as_deref().unwrap_or("?"))?;
        if let Some(role) = &self.role {
            write!(f, ". Role: {role}")?;
        }
        Ok(())
    }
}
