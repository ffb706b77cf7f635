// ABOUTME: Scraped company records: titles listed for a company and companies credited on a title.

use std::fmt;

use marquee_core::to_int;
use serde::{Deserialize, Serialize};

/// Raw text gathered from one company search listing.
#[derive(Debug, Clone, Default)]
pub struct RawCompany {
    pub company_id: String,
    pub title_id: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub notes: Option<String>,
}

/// A title a company is credited for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyScrape {
    company_id: String,
    title_id: Option<String>,
    start_year: Option<i64>,
    end_year: Option<i64>,
    notes: Option<String>,
}

impl CompanyScrape {
    pub fn company_id(&self) -> &str {
        &self.company_id
    }

    pub fn title_id(&self) -> Option<&str> {
        self.title_id.as_deref()
    }

    pub fn start_year(&self) -> Option<i64> {
        self.start_year
    }

    pub fn end_year(&self) -> Option<i64> {
        self.end_year
    }

    /// Listing annotation next to the years, e.g. `TV Series`.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

impl From<RawCompany> for CompanyScrape {
    fn from(raw: RawCompany) -> Self {
        Self {
            company_id: raw.company_id,
            title_id: raw.title_id,
            start_year: to_int(raw.start_year.as_deref()),
            end_year: to_int(raw.end_year.as_deref()),
            notes: raw.notes,
        }
    }
}

impl fmt::Display for CompanyScrape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} produced {} (",
            self.company_id,
            self.title_id.as_deref().unwrap_or("?")
        )?;
        if let Some(start) = self.start_year {
            write!(f, "{start}")?;
        }
        if let Some(end) = self.end_year {
            write!(f, "-{end}")?;
        }
        f.write_str(")")?;
        if let Some(notes) = &self.notes {
            write!(f, ". Notes: {notes}")?;
        }
        Ok(())
    }
}

/// Raw text gathered from one entry of a title's company credits.
#[derive(Debug, Clone, Default)]
pub struct RawCompanyCredit {
    pub company_id: Option<String>,
    pub title_id: String,
    pub company_name: Option<String>,
    pub category: Option<String>,
    pub notes: Vec<String>,
}

/// A company credited on a title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyCreditScrape {
    company_id: Option<String>,
    title_id: String,
    company_name: Option<String>,
    category: Option<String>,
    notes: Vec<String>,
}

impl CompanyCreditScrape {
    pub fn company_id(&self) -> Option<&str> {
        self.company_id.as_deref()
    }

    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    /// Section the company is listed under, e.g. `production`, `distributors`.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

impl From<RawCompanyCredit> for CompanyCreditScrape {
    fn from(raw: RawCompanyCredit) -> Self {
        Self {
            company_id: raw.company_id,
            title_id: raw.title_id,
            company_name: raw.company_name,
            category: raw.category,
            notes: raw.notes,
        }
    }
}

impl fmt::Display for CompanyCreditScrape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) is a {} for {}",
            self.company_name.as_deref().unwrap_or("?"),
            self.company_id.as_deref().unwrap_or("?"),
            self.category.as_deref().unwrap_or("?"),
            self.title_id
        )?;
        if !self.notes.is_empty() {
            write!(f, ". Notes: {}", self.notes.join(", "))?;
        }
        Ok(())
    }
}
