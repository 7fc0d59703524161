//! Network URL constants for the eCX SDK.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.ecrimex.net";
