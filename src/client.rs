//! High-level client — `EcxClient` with nested sub-client accessors.
//!
//! Each API module has its own sub-client in `domain/`. This module keeps
//! the builder, the stored default group id, and the accessor methods.

use crate::domain::alerts::Alerts;
use crate::domain::groups::Groups;
use crate::domain::index::Index;
use crate::domain::mal_ip::MalIp;
use crate::domain::phish::Phish;
use crate::domain::query::Query;
use crate::domain::report_phishing::ReportPhishing;
use crate::error::{ConfigError, SdkError};
use crate::http::{ApiResponse, EcxHttp, RequestOptions, TransportOptions};

// Re-export sub-client types for convenience.
pub use crate::domain::alerts::Alerts as AlertsClient;
pub use crate::domain::groups::Groups as GroupsClient;
pub use crate::domain::index::Index as IndexClient;
pub use crate::domain::mal_ip::MalIp as MalIpClient;
pub use crate::domain::phish::Phish as PhishClient;
pub use crate::domain::query::Query as QueryClient;
pub use crate::domain::report_phishing::ReportPhishing as ReportPhishingClient;

/// The primary entry point for the eCX SDK.
///
/// Provides nested sub-client accessors for each API module:
/// `client.alerts()`, `client.groups()`, etc. Reconfiguration after
/// construction goes through `&mut self` setters, which are therefore
/// statically exclusive with in-flight requests.
pub struct EcxClient {
    pub(crate) http: EcxHttp,
    /// Default group id, used by group endpoints when no per-call id is given.
    pub(crate) default_group: Option<String>,
}

impl EcxClient {
    pub fn builder() -> EcxClientBuilder {
        EcxClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn alerts(&self) -> Alerts<'_> {
        Alerts { client: self }
    }

    pub fn groups(&self) -> Groups<'_> {
        Groups { client: self }
    }

    pub fn phish(&self) -> Phish<'_> {
        Phish { client: self }
    }

    pub fn mal_ip(&self) -> MalIp<'_> {
        MalIp { client: self }
    }

    pub fn report_phishing(&self) -> ReportPhishing<'_> {
        ReportPhishing { client: self }
    }

    pub fn query(&self) -> Query<'_> {
        Query { client: self }
    }

    pub fn index(&self) -> Index<'_> {
        Index { client: self }
    }

    // ── Shared state ─────────────────────────────────────────────────────

    /// The underlying request dispatcher.
    pub fn http(&self) -> &EcxHttp {
        &self.http
    }

    /// Mutable dispatcher access, for the reconfiguration setters
    /// (`set_api_key`, `set_base_url`, `set_global_options`).
    pub fn http_mut(&mut self) -> &mut EcxHttp {
        &mut self.http
    }

    /// The most recent response across all modules. Last-write-wins when
    /// calls race; prefer the value returned by the call itself.
    pub async fn last_response(&self) -> Option<ApiResponse> {
        self.http.last_response().await
    }

    /// Stored default group id.
    pub fn default_group(&self) -> Option<&str> {
        self.default_group.as_deref()
    }

    /// Set the default group id used when group endpoint methods are called
    /// without an explicit one.
    pub fn set_default_group(&mut self, group_id: impl Into<String>) {
        self.default_group = Some(group_id.into());
    }

    pub fn clear_default_group(&mut self) {
        self.default_group = None;
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct EcxClientBuilder {
    base_url: String,
    api_key: Option<String>,
    transport: TransportOptions,
    global_options: RequestOptions,
    group_id: Option<String>,
}

impl Default for EcxClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            api_key: None,
            transport: TransportOptions::default(),
            global_options: RequestOptions::default(),
            group_id: None,
        }
    }
}

impl EcxClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// API access token, sent verbatim as the `Authorization` header value.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Transport configuration, overriding the defaults (5 s timeout).
    pub fn transport(mut self, transport: TransportOptions) -> Self {
        self.transport = transport;
        self
    }

    /// Options merged into every request, winning over per-call options at
    /// scalar leaves.
    pub fn global_options(mut self, options: RequestOptions) -> Self {
        self.global_options = options;
        self
    }

    /// Pre-set the default group id for the group endpoints.
    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn build(self) -> Result<EcxClient, SdkError> {
        let api_key = self.api_key.ok_or(ConfigError::MissingApiKey)?;
        let mut http = EcxHttp::new(&self.base_url, api_key, self.transport)?;
        http.set_global_options(self.global_options);
        Ok(EcxClient {
            http,
            default_group: self.group_id,
        })
    }
}
