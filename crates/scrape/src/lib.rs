// ABOUTME: Library entry point for scraping title, person and company pages into typed records.
// ABOUTME: Re-exports the public API: Scraper, ScraperBuilder, Options, ScrapeError, ErrorCode and the records.

//! marquee-scrape - reads IMDb-style HTML pages and the search suggestion feed.
//!
//! Page parsers in [`pages`] are pure and work on already-fetched text. The
//! [`Scraper`] fetches pages (paced by a rate limit) and hands them to those
//! parsers.
//!
//! # Example
//!
//! ```no_run
//! use marquee_scrape::{ScrapeError, Scraper};
//!
//! fn main() -> Result<(), ScrapeError> {
//!     let scraper = Scraper::builder().build()?;
//!     let title = scraper.get_title("tt0133093", true)?;
//!     println!("{}", title);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dom;
pub mod error;
pub mod extract;
pub mod models;
pub mod options;
pub mod pages;
pub mod resource;

pub use crate::client::Scraper;
pub use crate::error::{ErrorCode, ScrapeError};
pub use crate::models::{
    job_title, CompanyCreditScrape, CompanyScrape, CreditScrape, NameCreditScrape, NameScrape,
    SearchResult, SearchResultName, SearchResultTitle, TitleScrape, TitleTechSpecsScrape,
};
pub use crate::options::{Options, ScraperBuilder};
