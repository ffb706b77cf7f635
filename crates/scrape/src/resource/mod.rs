// ABOUTME: Blocking HTTP fetching of pages and feeds with URL validation and charset-aware decoding.
// ABOUTME: Non-success statuses surface as Status errors carrying the code, so callers can tell 404s apart.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use tracing::debug;

use crate::error::ScrapeError;

/// A fetched response with a success status.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as UTF-8 text, using charset hints from the content-type header.
    pub fn text_utf8(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Decode body bytes to a String using the charset from content-type or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(encoding) = content_type
        .and_then(extract_charset)
        .and_then(|charset| encoding_rs::Encoding::for_label(charset.as_bytes()))
    {
        let (decoded, _, _) = encoding.decode(body);
        return decoded.into_owned();
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract the charset value from a Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    content_type.to_lowercase().split(';').find_map(|part| {
        part.trim()
            .strip_prefix("charset=")
            .map(|charset| charset.trim_matches('"').trim_matches('\'').to_string())
    })
}

/// Fetch `url` with `headers`, failing on anything but a 2xx status.
pub fn fetch(
    client: &reqwest::blocking::Client,
    url: &str,
    headers: &HeaderMap,
    op: &str,
) -> Result<FetchResult, ScrapeError> {
    if url.is_empty() {
        return Err(ScrapeError::invalid_url(url, op, None));
    }

    let parsed_url = url::Url::parse(url).map_err(|e| {
        ScrapeError::invalid_url(url, op, Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    let scheme = parsed_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ScrapeError::invalid_url(
            url,
            op,
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    debug!(url, op, "fetching");
    let response = client
        .get(parsed_url)
        .headers(headers.clone())
        .send()
        .map_err(|e| ScrapeError::fetch(url, op, Some(anyhow::anyhow!("request failed: {}", e))))?;

    let status = response.status();
    if !status.is_success() {
        debug!(url, op, status = status.as_u16(), "unsuccessful status");
        return Err(ScrapeError::status(url, op, status.as_u16()));
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response.bytes().map_err(|e| {
        ScrapeError::fetch(
            url,
            op,
            Some(anyhow::anyhow!("failed to read body: {}", e)),
        )
    })?;

    Ok(FetchResult {
        status: status.as_u16(),
        url: url.to_string(),
        final_url,
        content_type,
        body,
    })
}
