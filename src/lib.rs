//! # eCX SDK
//!
//! A Rust client SDK for the APWG eCrime Exchange (eCX) REST API.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **HTTP dispatch** — `EcxHttp`, the single choke point that merges
//!    authentication, content-type defaults, and per-call options into one
//!    outbound request and records the most recent response
//! 2. **Module clients** — one thin sub-client per API resource group
//!    (alerts, groups, phish, mal_ip, report_phishing, query, index)
//! 3. **High-Level Client** — `EcxClient` with nested sub-clients and the
//!    stored default group id
//!
//! Transport concerns (TLS, pooling, redirects, timeout) belong to the
//! underlying `reqwest` client; the SDK adds no retries and no status-code
//! interpretation of its own.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ecrimex::prelude::*;
//!
//! let client = EcxClient::builder()
//!     .api_key("your-access-token")
//!     .build()?;
//!
//! let active = client.alerts().search(Params::from([
//!     ("status".to_string(), "active".to_string()),
//! ])).await?;
//! println!("{}", active.text());
//! ```

// ── Layer 1: HTTP dispatch ───────────────────────────────────────────────────

/// Request dispatcher, options merge, buffered responses.
pub mod http;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Module clients ──────────────────────────────────────────────────

/// Module clients, one per eCX resource group.
pub mod domain;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `EcxClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Client + sub-clients
    pub use crate::client::{
        AlertsClient, EcxClient, EcxClientBuilder, GroupsClient, IndexClient, MalIpClient,
        PhishClient, QueryClient, ReportPhishingClient,
    };

    // Request/response plumbing
    pub use crate::http::{
        ApiResponse, EcxHttp, MultipartPart, Params, Progress, ProgressFn, RequestOptions,
        TransportOptions,
    };

    // Errors
    pub use crate::error::{ConfigError, HttpError, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;
}
