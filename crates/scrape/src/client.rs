// ABOUTME: The Scraper struct: paced, blocking page requests delegated to the pure page parsers.
// ABOUTME: Handles the follow-up requests for taglines, episode lists and company search paging.

use std::collections::BTreeMap;
use std::thread;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use tracing::warn;

use crate::error::ScrapeError;
use crate::models::{
    CompanyCreditScrape, CompanyScrape, CreditScrape, NameCreditScrape, NameScrape,
    SearchResult, TitleScrape, TitleTechSpecsScrape,
};
use crate::options::{Options, ScraperBuilder, DEFAULT_RATE_LIMIT};
use crate::pages::{company, credits, name, search, tech_specs, title};
use crate::resource::fetch;

/// Company search results come this many titles per page.
const COMPANY_PAGE_SIZE: usize = 50;
/// Longest keyword the suggestion feed is queried with.
const MAX_KEYWORD_CHARS: usize = 20;

/// Scrapes title, person and company pages of the site.
#[derive(Debug, Clone)]
pub struct Scraper {
    opts: Options,
    http_client: reqwest::blocking::Client,
    headers: HeaderMap,
}

impl Scraper {
    /// Create a new ScraperBuilder for configuring the scraper.
    pub fn builder() -> ScraperBuilder {
        ScraperBuilder::new()
    }

    /// Create a new Scraper with the given options.
    pub fn new(mut opts: Options) -> Result<Self, ScrapeError> {
        if opts.rate_limit.is_zero() {
            warn!("rate limit must be positive, using the default");
            opts.rate_limit = DEFAULT_RATE_LIMIT;
        }

        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::blocking::Client::builder()
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    ScrapeError::fetch(
                        &opts.base_url,
                        "Build",
                        Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                    )
                })?,
        };

        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&opts.user_agent).map_err(|e| {
            ScrapeError::fetch(
                &opts.base_url,
                "Build",
                Some(anyhow::anyhow!("user agent: {}", e)),
            )
        })?;
        headers.insert(USER_AGENT, user_agent);
        for (key, value) in &opts.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                ScrapeError::fetch(
                    &opts.base_url,
                    "Build",
                    Some(anyhow::anyhow!("header {}: {}", key, e)),
                )
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                ScrapeError::fetch(
                    &opts.base_url,
                    "Build",
                    Some(anyhow::anyhow!("header {}: {}", key, e)),
                )
            })?;
            headers.insert(name, value);
        }

        Ok(Self {
            opts,
            http_client,
            headers,
        })
    }

    /// The options this scraper was built with.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Waits out the rate limit, then fetches and decodes one page.
    fn get_page(&self, url: &str, op: &str) -> Result<String, ScrapeError> {
        thread::sleep(self.opts.rate_limit);
        Ok(fetch(&self.http_client, url, &self.headers, op)?.text_utf8())
    }

    /// Scrapes a title's main page, and its taglines page when asked.
    pub fn get_title(
        &self,
        title_id: &str,
        include_taglines: bool,
    ) -> Result<TitleScrape, ScrapeError> {
        let url = format!("{}/title/{}/", self.opts.base_url, title_id);
        let mut raw = title::parse_title_page(&self.get_page(&url, "GetTitle")?, title_id);

        if include_taglines {
            let url = format!("{}/title/{}/taglines", self.opts.base_url, title_id);
            raw.taglines = title::parse_taglines(&self.get_page(&url, "GetTitle")?);
        }

        Ok(TitleScrape::from(raw))
    }

    fn full_credits_page(&self, title_id: &str, op: &str) -> Result<String, ScrapeError> {
        let url = format!("{}/title/{}/fullcredits", self.opts.base_url, title_id);
        self.get_page(&url, op)
    }

    fn cast_from_page(
        &self,
        html: &str,
        title_id: &str,
        include_episodes: bool,
    ) -> Result<Vec<CreditScrape>, ScrapeError> {
        let mut cast = Vec::new();
        for member in credits::parse_full_cast(html, title_id) {
            if include_episodes {
                if let (Some(name_id), Some(ref_marker)) =
                    (member.credit.name_id(), &member.episodes_ref_marker)
                {
                    let url = format!(
                        "{}/name/{}/episodes/_ajax?title={}&category=actor&ref_marker={}&start_index=0",
                        self.opts.base_url, name_id, title_id, ref_marker
                    );
                    match self.get_page(&url, "GetFullCast") {
                        Ok(page) => {
                            cast.extend(credits::parse_cast_episodes(&page, Some(name_id)))
                        }
                        Err(e) if e.is_not_found() => {
                            warn!(
                                title_id,
                                name_id,
                                url = %url,
                                "episode list not found, skipping"
                            );
                        }
                        Err(e) => return Err(e),
                    }
                }
            }
            cast.push(member.credit);
        }
        Ok(cast)
    }

    /// Scrapes the cast table of a title's full credits page.
    ///
    /// With `include_episodes`, each series actor's per-episode credits are
    /// fetched and listed ahead of their series credit.
    pub fn get_full_cast(
        &self,
        title_id: &str,
        include_episodes: bool,
    ) -> Result<Vec<CreditScrape>, ScrapeError> {
        let html = self.full_credits_page(title_id, "GetFullCast")?;
        self.cast_from_page(&html, title_id, include_episodes)
    }

    /// Scrapes every crew section of a title's full credits page.
    pub fn get_full_crew(&self, title_id: &str) -> Result<Vec<CreditScrape>, ScrapeError> {
        let html = self.full_credits_page(title_id, "GetFullCrew")?;
        Ok(credits::parse_full_crew(&html, title_id))
    }

    /// Cast followed by crew, read from one fetch of the full credits page.
    pub fn get_full_credits(
        &self,
        title_id: &str,
        include_episodes: bool,
    ) -> Result<Vec<CreditScrape>, ScrapeError> {
        let html = self.full_credits_page(title_id, "GetFullCredits")?;
        let mut all = self.cast_from_page(&html, title_id, include_episodes)?;
        all.extend(credits::parse_full_crew(&html, title_id));
        Ok(all)
    }

    /// Full credits grouped by job title, keeping page order within each group.
    pub fn get_full_credits_by_job(
        &self,
        title_id: &str,
        include_episodes: bool,
    ) -> Result<BTreeMap<String, Vec<CreditScrape>>, ScrapeError> {
        let mut by_job: BTreeMap<String, Vec<CreditScrape>> = BTreeMap::new();
        for credit in self.get_full_credits(title_id, include_episodes)? {
            by_job
                .entry(credit.job_title().to_string())
                .or_default()
                .push(credit);
        }
        Ok(by_job)
    }

    /// Scrapes a person's bio page, and their known-for titles when asked.
    pub fn get_name(
        &self,
        name_id: &str,
        include_known_for_titles: bool,
    ) -> Result<NameScrape, ScrapeError> {
        let url = format!("{}/name/{}/bio", self.opts.base_url, name_id);
        let mut raw = name::parse_bio(&self.get_page(&url, "GetName")?, name_id);

        if include_known_for_titles {
            let url = format!("{}/name/{}/", self.opts.base_url, name_id);
            raw.known_for_titles = name::parse_known_for(&self.get_page(&url, "GetName")?);
        }

        Ok(NameScrape::from(raw))
    }

    /// Scrapes a person's filmography.
    ///
    /// With `include_episodes`, episode credits of each row come ahead of the
    /// row's own credit. A missing episode list falls back to the episodes shown
    /// inline on the page.
    pub fn get_name_credits(
        &self,
        name_id: &str,
        include_episodes: bool,
    ) -> Result<Vec<NameCreditScrape>, ScrapeError> {
        let url = format!("{}/name/{}/", self.opts.base_url, name_id);
        let rows = name::parse_filmography(&self.get_page(&url, "GetNameCredits")?, name_id);

        let mut all = Vec::new();
        for row in rows {
            if include_episodes {
                let episodes = match &row.more_episodes {
                    Some(req) => self.episode_list(name_id, row.credit.category(), req)?,
                    None => None,
                };
                all.extend(episodes.unwrap_or(row.episodes));
            }
            all.push(row.credit);
        }
        Ok(all)
    }

    /// Fetches a row's full episode list; `None` when the site has no such list.
    fn episode_list(
        &self,
        name_id: &str,
        category: Option<&str>,
        req: &name::EpisodesRequest,
    ) -> Result<Option<Vec<NameCreditScrape>>, ScrapeError> {
        let url = format!(
            "{}/name/{}/episodes/_ajax?title={}&category={}&ref_marker={}&start_index=0",
            self.opts.base_url,
            name_id,
            req.title_id,
            req.category.as_deref().unwrap_or_default(),
            req.ref_marker.as_deref().unwrap_or_default(),
        );
        match self.get_page(&url, "GetNameCredits") {
            Ok(page) => Ok(Some(name::parse_episode_list(
                &page,
                name_id,
                category.unwrap_or_default(),
            ))),
            Err(e) if e.is_not_found() => {
                warn!(
                    name_id,
                    title_id = %req.title_id,
                    url = %url,
                    "episode list not found, using inline episodes"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Every title listed for a company, following the search pages to the end.
    pub fn get_company(&self, company_id: &str) -> Result<Vec<CompanyScrape>, ScrapeError> {
        let mut all = Vec::new();
        let mut start = 1;
        loop {
            let url = format!(
                "{}/search/title/?companies={}&view=simple&start={}",
                self.opts.base_url, company_id, start
            );
            let html = match self.get_page(&url, "GetCompany") {
                Ok(html) => html,
                Err(e) if e.is_not_found() => break,
                Err(e) => return Err(e),
            };

            let page = company::parse_company_search(&html, company_id);
            if page.invalid_company {
                return Err(ScrapeError::invalid_company_id(company_id, url, "GetCompany"));
            }
            match page.titles {
                Some(titles) if !titles.is_empty() => all.extend(titles),
                _ => break,
            }
            start += COMPANY_PAGE_SIZE;
        }
        Ok(all)
    }

    /// Companies credited on a title.
    pub fn get_company_credits(
        &self,
        title_id: &str,
    ) -> Result<Vec<CompanyCreditScrape>, ScrapeError> {
        let url = format!("{}/title/{}/companycredits", self.opts.base_url, title_id);
        let html = self.get_page(&url, "GetCompanyCredits")?;
        Ok(company::parse_company_credits(&html, title_id))
    }

    pub fn get_tech_specs(&self, title_id: &str) -> Result<TitleTechSpecsScrape, ScrapeError> {
        let url = format!("{}/title/{}/technical/", self.opts.base_url, title_id);
        let html = self.get_page(&url, "GetTechSpecs")?;
        Ok(TitleTechSpecsScrape::from(tech_specs::parse_tech_specs(
            &html, title_id,
        )))
    }

    /// Search suggestions for `keyword`. Only its first 20 characters are used.
    pub fn get_search_results(&self, keyword: &str) -> Result<Vec<SearchResult>, ScrapeError> {
        let keyword: String = keyword.chars().take(MAX_KEYWORD_CHARS).collect();
        let url = search::suggestion_url(&self.opts.suggestion_url, &keyword).map_err(|e| {
            ScrapeError::invalid_url(&self.opts.suggestion_url, "GetSearchResults", Some(e.into()))
        })?;
        let Some(url) = url else {
            return Ok(Vec::new());
        };

        let url = url.to_string();
        let body = self.get_page(&url, "GetSearchResults")?;
        search::parse_suggestions(&body)
            .map_err(|e| ScrapeError::decode(url, "GetSearchResults", Some(e.into())))
    }
}
