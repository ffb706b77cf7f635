// ABOUTME: Record types produced by the page scrapers.
// ABOUTME: Each record has a Raw* draft of uncoerced text and a From conversion applying the lenient field rules.

pub mod company;
pub mod name;
pub mod search;
pub mod title;

pub use company::{CompanyCreditScrape, CompanyScrape, RawCompany, RawCompanyCredit};
pub use name::{NameCreditScrape, NameScrape, RawName, RawNameCredit};
pub use search::{
    RawSearchName, RawSearchTitle, SearchResult, SearchResultName, SearchResultTitle,
};
pub use title::{
    job_title, CreditScrape, RawCredit, RawTechSpecs, RawTitle, TitleScrape,
    TitleTechSpecsScrape,
};
