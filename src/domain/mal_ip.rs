//! Mal-IP sub-client — malicious IP reporting.

use reqwest::Method;
use serde::Serialize;

use crate::client::EcxClient;
use crate::error::SdkError;
use crate::http::{ApiResponse, Params, RequestOptions};

/// Sub-client for the Mal-IP module.
pub struct MalIp<'a> {
    pub(crate) client: &'a EcxClient,
}

impl<'a> MalIp<'a> {
    /// Searches the mal_ip module.
    pub async fn search(&self, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(Method::GET, "mal_ip", RequestOptions::new().query(options))
            .await?)
    }

    /// Gets a specific mal_ip entry.
    pub async fn get(&self, id: u64, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("mal_ip/{id}"),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Checks that a mal_ip entry with that id exists; the response carries
    /// a `Last-Modified` header.
    pub async fn head(&self, id: u64) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(Method::HEAD, &format!("mal_ip/{id}"), RequestOptions::new())
            .await?)
    }

    /// Submits a new mal_ip entry.
    pub async fn create<T: Serialize + ?Sized>(
        &self,
        data: &T,
        options: Params,
    ) -> Result<ApiResponse, SdkError> {
        let body = serde_json::to_value(data)?;
        Ok(self
            .client
            .http
            .call(
                Method::POST,
                "mal_ip",
                RequestOptions::new().json(body).query(options),
            )
            .await?)
    }

    /// Searches the brands referenced by mal_ip entries.
    pub async fn brands(&self, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                "mal_ip/brands",
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Returns a JSON schema for the module's search parameters.
    pub async fn param_schema(&self, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                "mal_ip/param_schema",
                RequestOptions::new().query(options),
            )
            .await?)
    }

    // ── Collaborations ───────────────────────────────────────────────────

    /// Marks the caller as an active collaborator on a mal_ip entry.
    pub async fn collaborate(&self, id: u64, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::POST,
                &format!("mal_ip/{id}/collaborate"),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Gets the caller's collaboration on a mal_ip entry.
    pub async fn collaboration(&self, id: u64, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("mal_ip/{id}/collaborate"),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Withdraws the caller's collaboration on a mal_ip entry.
    pub async fn remove_collaboration(&self, id: u64) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::DELETE,
                &format!("mal_ip/{id}/collaborate"),
                RequestOptions::new(),
            )
            .await?)
    }

    /// Lists the caller's collaborations across the module.
    pub async fn collaborations(&self, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                "mal_ip/collaborate",
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Gets a `Last-Modified` header with the timestamp of the last
    /// collaboration activity on a mal_ip entry.
    pub async fn last_collaboration(&self, id: u64) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::HEAD,
                &format!("mal_ip/{id}/collaborate"),
                RequestOptions::new(),
            )
            .await?)
    }
}
