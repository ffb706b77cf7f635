// ABOUTME: Type-coercion primitives shared by the dataset parser and the page scrapers.
// ABOUTME: Null-safe is_* checks, int/float/bool/date conversion, money strings, and the \N sentinel.

//! Coercion of raw field values into typed values.
//!
//! Every function accepts anything convertible into a [`RawField`], so the same
//! rules apply to a tab-separated column, a scraped text fragment, or a value that
//! is already typed.
//!
//! Key behaviors:
//! - `is_*` checks never fail; absent, empty and `\N` input is simply "not a value".
//! - `to_bool` is permissive: any non-empty, non-integer text is `true`.
//! - Dates are tried as `21 August 1999`, then `1999`, then `1999-08-21`; the first
//!   shape that parses wins.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoerceError;

/// The token the datasets use for "no value" in any column.
pub const SENTINEL: &str = "\\N";

static MONEY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\$|GBP)[\d,]+").unwrap());
static MONEY_NOISE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\$|GBP|,)+").unwrap());
static DAY_MONTH_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2} ([A-Za-z]+) \d{4}$").unwrap());
static BARE_YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());
static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").unwrap());

/// A raw value of unknown shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawField<'a> {
    Absent,
    Text(&'a str),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl<'a> RawField<'a> {
    /// Returns true for absent input, empty text, and the `\N` sentinel.
    pub fn is_absent(&self) -> bool {
        match self {
            RawField::Absent => true,
            RawField::Text(s) => s.is_empty() || *s == SENTINEL,
            _ => false,
        }
    }
}

impl<'a> From<&'a str> for RawField<'a> {
    fn from(s: &'a str) -> Self {
        RawField::Text(s)
    }
}

impl<'a> From<&'a String> for RawField<'a> {
    fn from(s: &'a String) -> Self {
        RawField::Text(s.as_str())
    }
}

impl<'a> From<Option<&'a str>> for RawField<'a> {
    fn from(v: Option<&'a str>) -> Self {
        v.map_or(RawField::Absent, RawField::Text)
    }
}

impl<'a> From<Option<&'a String>> for RawField<'a> {
    fn from(v: Option<&'a String>) -> Self {
        v.map_or(RawField::Absent, |s| RawField::Text(s.as_str()))
    }
}

impl From<i64> for RawField<'_> {
    fn from(v: i64) -> Self {
        RawField::Int(v)
    }
}

impl From<i32> for RawField<'_> {
    fn from(v: i32) -> Self {
        RawField::Int(i64::from(v))
    }
}

impl From<f64> for RawField<'_> {
    fn from(v: f64) -> Self {
        RawField::Float(v)
    }
}

impl From<bool> for RawField<'_> {
    fn from(v: bool) -> Self {
        RawField::Bool(v)
    }
}

/// Currency of a scraped money amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "GBP")]
    Gbp,
}

impl Currency {
    /// The three-letter currency code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
        }
    }

    fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "$" => Some(Currency::Usd),
            "GBP" => Some(Currency::Gbp),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

fn present_text(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == SENTINEL {
        None
    } else {
        Some(trimmed)
    }
}

/// Returns true if the value converts to an integer.
pub fn is_int<'a>(v: impl Into<RawField<'a>>) -> bool {
    to_int(v).is_some()
}

/// Converts the value to an integer, or `None` if it is not integer-like.
///
/// Floats are truncated toward zero; booleans map to 0 and 1.
pub fn to_int<'a>(v: impl Into<RawField<'a>>) -> Option<i64> {
    match v.into() {
        RawField::Int(i) => Some(i),
        RawField::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        RawField::Bool(b) => Some(i64::from(b)),
        RawField::Text(s) => present_text(s)?.parse().ok(),
        _ => None,
    }
}

/// Returns true if the value converts to a float.
pub fn is_float<'a>(v: impl Into<RawField<'a>>) -> bool {
    to_float(v).is_some()
}

/// Converts the value to a float, or `None` if it is not float-like.
pub fn to_float<'a>(v: impl Into<RawField<'a>>) -> Option<f64> {
    match v.into() {
        RawField::Float(f) => Some(f),
        RawField::Int(i) => Some(i as f64),
        RawField::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
        RawField::Text(s) => present_text(s)?.parse().ok(),
        RawField::Absent => None,
    }
}

/// Returns true if the value has a boolean reading.
///
/// Native booleans and numbers qualify, and so does any non-empty text.
pub fn is_bool<'a>(v: impl Into<RawField<'a>>) -> bool {
    !v.into().is_absent()
}

/// Converts the value to a boolean.
///
/// Integer-like text is false only for zero; any other non-empty text is true.
/// Absent input is false.
pub fn to_bool<'a>(v: impl Into<RawField<'a>>) -> bool {
    let raw = v.into();
    match raw {
        RawField::Bool(b) => b,
        RawField::Int(i) => i != 0,
        RawField::Float(f) => f != 0.0,
        RawField::Text(_) if raw.is_absent() => false,
        RawField::Text(s) => to_int(s).map_or(true, |i| i != 0),
        RawField::Absent => false,
    }
}

/// Boolean reading of a value that may be absent: `None` unless [`is_bool`] holds.
pub fn to_opt_bool<'a>(v: impl Into<RawField<'a>>) -> Option<bool> {
    let raw = v.into();
    is_bool(raw).then(|| to_bool(raw))
}

/// Returns true if the value is a date in one of the accepted shapes.
pub fn is_datetime<'a>(v: impl Into<RawField<'a>>) -> bool {
    matches!(to_datetime(v), Ok(Some(_)))
}

/// Converts the value to a calendar date.
///
/// Accepted shapes, in priority order: `21 August 1999`, `1999` (January 1st),
/// `1999-08-21`. Absent input yields `Ok(None)`.
pub fn to_datetime<'a>(v: impl Into<RawField<'a>>) -> Result<Option<NaiveDate>, CoerceError> {
    let raw = v.into();
    if raw.is_absent() {
        return Ok(None);
    }
    let text = match raw {
        RawField::Text(s) => s.to_string(),
        RawField::Int(i) => i.to_string(),
        other => return Err(CoerceError::InvalidDate(format!("{other:?}"))),
    };
    parse_date_text(&text)
        .map(Some)
        .ok_or(CoerceError::InvalidDate(text))
}

/// Lenient date reading: `None` when the value is absent or not a date.
pub fn to_opt_datetime<'a>(v: impl Into<RawField<'a>>) -> Option<NaiveDate> {
    to_datetime(v).ok().flatten()
}

// Shapes are matched whole before chrono parses them.
fn parse_date_text(s: &str) -> Option<NaiveDate> {
    let date = if let Some(caps) = DAY_MONTH_YEAR_RE.captures(s) {
        NaiveDate::parse_from_str(s, "%d %B %Y")
            .ok()
            .filter(|d| d.format("%B").to_string().eq_ignore_ascii_case(&caps[1]))
    } else if BARE_YEAR_RE.is_match(s) {
        s.parse().ok().and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
    } else if ISO_DATE_RE.is_match(s) {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    } else {
        None
    };
    date.filter(|d| d.year() >= 1)
}

/// Returns true if the text contains a currency marker followed by a digit run.
pub fn is_money_string(s: &str) -> bool {
    MONEY_RE.is_match(s)
}

/// Extracts the first money amount as bare digits ("$12,345" -> "12345").
///
/// Text without a money amount is returned unchanged.
pub fn trim_money_string(s: &str) -> String {
    match MONEY_RE.find(s) {
        Some(m) => MONEY_NOISE_RE.replace_all(m.as_str(), "").into_owned(),
        None => s.to_string(),
    }
}

/// Currency of the first money amount in the text.
pub fn get_denomination(s: &str) -> Option<Currency> {
    let caps = MONEY_RE.captures(s)?;
    Currency::from_marker(caps.get(1)?.as_str())
}

/// Replaces every `\N` column with `None`, keeping order and length.
pub fn replace_sentinels<'a>(fields: &[&'a str]) -> Vec<Option<&'a str>> {
    fields
        .iter()
        .map(|&f| if f == SENTINEL { None } else { Some(f) })
        .collect()
}

/// Splits a comma-joined column into its items; an absent column is an empty list.
pub fn split_list(v: Option<&str>) -> Vec<String> {
    v.map(|s| s.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}
