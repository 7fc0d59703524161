//! Low-level request dispatcher — `EcxHttp`.
//!
//! The single choke point every module client calls. Merges authentication,
//! the content-type default, and caller options into one outbound request,
//! executes it, and records the most recent response. No retries and no
//! status-code interpretation happen here: transport failures propagate
//! unchanged, and every received response is returned as-is.

use std::sync::Arc;
use std::time::Duration;

use async_lock::RwLock;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Method};

use crate::error::HttpError;
use crate::http::options::{finalize, MultipartPart, Progress, ProgressFn, RequestOptions};
use crate::http::response::ApiResponse;

/// Chunk size for streamed multipart uploads.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Transport-level configuration, applied when the underlying HTTP client is
/// built. Override individual fields over the defaults with struct update:
/// `TransportOptions { timeout: Duration::from_secs(30), ..Default::default() }`.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Overall per-request timeout.
    pub timeout: Duration,
    /// Connect-phase timeout, when set.
    pub connect_timeout: Option<Duration>,
    /// Idle connections kept alive per host.
    pub pool_max_idle_per_host: usize,
    /// `User-Agent` sent with every request.
    pub user_agent: Option<String>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            connect_timeout: None,
            pool_max_idle_per_host: 10,
            user_agent: None,
        }
    }
}

/// Low-level dispatcher for the eCX REST API.
///
/// Owns the API key (sent verbatim as `Authorization` — the API uses no
/// `Bearer` scheme), the base URL, per-instance global options, the
/// transport handle, and the most recent response. Reconfiguration goes
/// through `&mut self` setters, so it is statically exclusive with in-flight
/// requests. The response slot is the one piece of shared state: concurrent
/// calls race on it last-write-wins, and callers wanting the response of a
/// specific call must use the value `call` returns.
pub struct EcxHttp {
    base_url: String,
    api_key: String,
    client: Client,
    global: RequestOptions,
    last_response: Arc<RwLock<Option<ApiResponse>>>,
}

impl EcxHttp {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        transport: TransportOptions,
    ) -> Result<Self, HttpError> {
        let mut builder = Client::builder()
            .timeout(transport.timeout)
            .pool_max_idle_per_host(transport.pool_max_idle_per_host);
        if let Some(connect_timeout) = transport.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(user_agent) = transport.user_agent {
            builder = builder.user_agent(user_agent);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: builder.build()?,
            global: RequestOptions::default(),
            last_response: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: &str) {
        self.base_url = base_url.trim_end_matches('/').to_string();
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Options merged into every request, winning over caller options at
    /// scalar leaves.
    pub fn global_options(&self) -> &RequestOptions {
        &self.global
    }

    pub fn set_global_options(&mut self, options: RequestOptions) {
        self.global = options;
    }

    /// The most recent response, if any call has completed. Last-write-wins
    /// when calls race; use the value returned by [`EcxHttp::call`] when the
    /// response of a specific request matters.
    pub async fn last_response(&self) -> Option<ApiResponse> {
        self.last_response.read().await.clone()
    }

    /// Dispatch a request against the API.
    ///
    /// `path` is joined onto the configured base URL; absolute `http(s)://`
    /// URLs (hypermedia links) pass through verbatim. `options` is merged
    /// with the authorization, content-type, and global layers — see
    /// [`RequestOptions`] for the precedence rules.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, HttpError> {
        let url = self.endpoint_url(path);
        let RequestOptions {
            query,
            json,
            multipart,
            headers,
            progress,
        } = finalize(options, &self.api_key, &self.global);

        tracing::debug!(%method, %url, "dispatching eCX request");

        let mut request = self.client.request(method, &url);
        if !query.is_empty() {
            request = request.query(&query);
        }
        for (name, value) in &headers {
            let header_name =
                HeaderName::try_from(name.as_str()).map_err(|e| HttpError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| HttpError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            request = request.header(header_name, header_value);
        }
        if let Some(body) = &json {
            request = request.json(body);
        }
        if !multipart.is_empty() {
            let mut form = Form::new();
            for part in multipart {
                let MultipartPart {
                    name,
                    contents,
                    filename,
                } = part;
                let mut built = match &progress {
                    Some(callback) => {
                        let len = contents.len() as u64;
                        Part::stream_with_length(progress_body(contents, callback.clone()), len)
                    }
                    None => Part::bytes(contents),
                };
                if let Some(filename) = filename {
                    built = built.file_name(filename);
                }
                form = form.part(name, built);
            }
            request = request.multipart(form);
        }

        let response = request.send().await?;
        let response = ApiResponse::read(response, progress.as_ref()).await?;
        *self.last_response.write().await = Some(response.clone());
        Ok(response)
    }

    fn endpoint_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Wrap part contents in a chunked stream so the progress callback observes
/// upload transfer.
fn progress_body(contents: Vec<u8>, callback: ProgressFn) -> Body {
    let total = contents.len() as u64;
    let stream = async_stream::stream! {
        let mut sent = 0usize;
        while sent < contents.len() {
            let end = usize::min(sent + UPLOAD_CHUNK_SIZE, contents.len());
            let chunk = contents[sent..end].to_vec();
            sent = end;
            callback(Progress {
                transferred: sent as u64,
                total: Some(total),
            });
            yield Ok::<_, std::io::Error>(chunk);
        }
    };
    Body::wrap_stream(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http() -> EcxHttp {
        EcxHttp::new(
            "https://api.ecrimex.net/",
            "key",
            TransportOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn default_transport_timeout_is_five_seconds() {
        assert_eq!(TransportOptions::default().timeout, Duration::from_secs(5));
    }

    #[test]
    fn base_url_is_stored_without_trailing_slash() {
        assert_eq!(http().base_url(), "https://api.ecrimex.net");
    }

    #[test]
    fn relative_paths_join_the_base_url() {
        let http = http();
        assert_eq!(
            http.endpoint_url("alerts/42"),
            "https://api.ecrimex.net/alerts/42"
        );
        assert_eq!(http.endpoint_url("/spec"), "https://api.ecrimex.net/spec");
        assert_eq!(http.endpoint_url("/"), "https://api.ecrimex.net/");
    }

    #[test]
    fn absolute_urls_pass_through_verbatim() {
        let href = "https://files.ecrimex.net/dl/abc123?token=t";
        assert_eq!(http().endpoint_url(href), href);
    }
}
