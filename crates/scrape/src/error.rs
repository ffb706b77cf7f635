// ABOUTME: Error types for page scraping including the ErrorCode enum and the ScrapeError struct.
// ABOUTME: Keeps HTTP status failures and invalid company IDs distinguishable from generic fetch errors.

use std::fmt;

/// Error codes representing the categories of scrape failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Fetch,
    Status,
    Decode,
    InvalidCompanyId,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Status => "unsuccessful status",
            ErrorCode::Decode => "decode error",
            ErrorCode::InvalidCompanyId => "invalid company ID",
        };
        write!(f, "{}", s)
    }
}

/// The error type for scrape operations.
#[derive(Debug, thiserror::Error)]
pub struct ScrapeError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    /// HTTP status for `Status` errors.
    pub status: Option<u16>,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marquee: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(status) = self.status {
            write!(f, " {}", status)?;
        }
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ScrapeError {
    fn new(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            status: None,
            source,
        }
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::InvalidUrl, url, op, source)
    }

    /// Create a Fetch error.
    pub fn fetch(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Fetch, url, op, source)
    }

    /// Create a Status error for a non-success HTTP response.
    pub fn status(url: impl Into<String>, op: impl Into<String>, status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::new(ErrorCode::Status, url, op, None)
        }
    }

    /// Create a Decode error.
    pub fn decode(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Decode, url, op, source)
    }

    /// Create an InvalidCompanyId error.
    pub fn invalid_company_id(
        company_id: &str,
        url: impl Into<String>,
        op: impl Into<String>,
    ) -> Self {
        Self::new(
            ErrorCode::InvalidCompanyId,
            url,
            op,
            Some(anyhow::anyhow!("no company found for {}", company_id)),
        )
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    /// Returns true if the server answered with a non-success status.
    pub fn is_status(&self) -> bool {
        self.code == ErrorCode::Status
    }

    /// Returns true if this is a Status error for 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        self.is_status() && self.status == Some(404)
    }

    /// Returns true if this is a Decode error.
    pub fn is_decode(&self) -> bool {
        self.code == ErrorCode::Decode
    }

    /// Returns true if this is an InvalidCompanyId error.
    pub fn is_invalid_company_id(&self) -> bool {
        self.code == ErrorCode::InvalidCompanyId
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ScrapeError::status("https://www.imdb.com/title/tt0/", "GetTitle", 404);
        assert!(err.is_status());
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "marquee: GetTitle https://www.imdb.com/title/tt0/: unsuccessful status 404"
        );
    }

    #[test]
    fn test_invalid_company_is_not_a_status() {
        let err = ScrapeError::invalid_company_id("co0", "https://x", "GetCompany");
        assert!(err.is_invalid_company_id());
        assert!(!err.is_status());
        assert!(err.to_string().contains("no company found for co0"));
    }
}
