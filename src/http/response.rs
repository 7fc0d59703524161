//! Buffered API response type.

use std::borrow::Cow;

use chrono::{DateTime, FixedOffset};
use reqwest::header::{HeaderMap, LAST_MODIFIED};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::http::options::{Progress, ProgressFn};

/// A fully buffered API response.
///
/// Status, headers, final URL, and body are drained eagerly so the
/// most-recent-response slot can hold a self-contained value. The body is
/// handed back uninterpreted, including for non-2xx statuses, which are
/// not turned into errors at this layer.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    url: Url,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    /// Drain a transport response chunk-wise, reporting download progress.
    pub(crate) async fn read(
        mut resp: reqwest::Response,
        progress: Option<&ProgressFn>,
    ) -> Result<Self, reqwest::Error> {
        let status = resp.status();
        let url = resp.url().clone();
        let headers = resp.headers().clone();
        let total = resp.content_length();

        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await? {
            body.extend_from_slice(&chunk);
            if let Some(callback) = progress {
                callback(Progress {
                    transferred: body.len() as u64,
                    total,
                });
            }
        }

        Ok(Self {
            status,
            url,
            headers,
            body,
        })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Final URL the response was served from.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Parsed `Last-Modified` header, used for existence/freshness checks
    /// against HEAD endpoints.
    pub fn last_modified(&self) -> Option<DateTime<FixedOffset>> {
        self.headers
            .get(LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
    }

    /// Raw response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Body parsed as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn response_with_header(name: &'static str, value: &str) -> ApiResponse {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        ApiResponse {
            status: StatusCode::OK,
            url: Url::parse("https://api.ecrimex.net/phish/1").unwrap(),
            headers,
            body: Vec::new(),
        }
    }

    #[test]
    fn last_modified_parses_http_date() {
        let resp = response_with_header("last-modified", "Sun, 06 Nov 1994 08:49:37 GMT");
        let parsed = resp.last_modified().unwrap();
        assert_eq!(parsed.timestamp(), 784111777);
    }

    #[test]
    fn last_modified_absent_or_malformed_is_none() {
        let resp = response_with_header("content-type", "application/json");
        assert!(resp.last_modified().is_none());

        let resp = response_with_header("last-modified", "not a date");
        assert!(resp.last_modified().is_none());
    }

    #[test]
    fn json_parses_buffered_body() {
        let resp = ApiResponse {
            status: StatusCode::OK,
            url: Url::parse("https://api.ecrimex.net/alerts").unwrap(),
            headers: HeaderMap::new(),
            body: br#"{"total": 3}"#.to_vec(),
        };
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["total"], 3);
    }
}
