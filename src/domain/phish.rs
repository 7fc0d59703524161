//! Phish sub-client — the UBL (URL block list) module.

use reqwest::Method;
use serde::Serialize;

use crate::client::EcxClient;
use crate::error::SdkError;
use crate::http::{ApiResponse, Params, RequestOptions};

/// Sub-client for the Phish (UBL) module.
pub struct Phish<'a> {
    pub(crate) client: &'a EcxClient,
}

impl<'a> Phish<'a> {
    /// Searches the phish module.
    pub async fn search(&self, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(Method::GET, "phish", RequestOptions::new().query(options))
            .await?)
    }

    /// Gets a specific phish.
    pub async fn get(&self, id: u64, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("phish/{id}"),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Submits a new phish.
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
                "phish",
                RequestOptions::new().json(body).query(options),
            )
            .await?)
    }

    /// Updates a phish.
    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        id: u64,
        data: &T,
        options: Params,
    ) -> Result<ApiResponse, SdkError> {
        let body = serde_json::to_value(data)?;
        Ok(self
            .client
            .http
            .call(
                Method::PATCH,
                &format!("phish/{id}"),
                RequestOptions::new().json(body).query(options),
            )
            .await?)
    }

    /// Checks that a phish with that id exists; the response carries a
    /// `Last-Modified` header.
    pub async fn head(&self, id: u64) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(Method::HEAD, &format!("phish/{id}"), RequestOptions::new())
            .await?)
    }

    /// Marks a phish as inactive.
    #[deprecated(note = "superseded upstream by patching the status field")]
    pub async fn inactive(&self, id: u64) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::DELETE,
                &format!("phish/{id}"),
                RequestOptions::new(),
            )
            .await?)
    }

    /// Revives an inactive phish.
    #[deprecated(note = "superseded upstream by patching the status field")]
    pub async fn revive<T: Serialize + ?Sized>(
        &self,
        id: u64,
        data: &T,
    ) -> Result<ApiResponse, SdkError> {
        let body = serde_json::to_value(data)?;
        Ok(self
            .client
            .http
            .call(
                Method::PUT,
                &format!("phish/{id}"),
                RequestOptions::new().json(body),
            )
            .await?)
    }

    /// Searches the UBL activity listing.
    pub async fn search_activity(&self, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                "phish/activity",
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Gets the activity listing for a specific phish.
    pub async fn activity(&self, id: u64, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("phish/{id}/activity"),
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
                "phish/param_schema",
                RequestOptions::new().query(options),
            )
            .await?)
    }

    // ── Collaborations ───────────────────────────────────────────────────

    /// Marks the caller as an active collaborator on a phish.
    pub async fn collaborate(&self, id: u64, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::POST,
                &format!("phish/{id}/collaborate"),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Gets the caller's collaboration on a phish.
    pub async fn collaboration(&self, id: u64, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("phish/{id}/collaborate"),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Withdraws the caller's collaboration on a phish.
    pub async fn remove_collaboration(&self, id: u64) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::DELETE,
                &format!("phish/{id}/collaborate"),
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
                "phish/collaborate",
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Gets a `Last-Modified` header with the timestamp of the last
    /// collaboration activity on a phish.
    pub async fn last_collaboration(&self, id: u64) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::HEAD,
                &format!("phish/{id}/collaborate"),
                RequestOptions::new(),
            )
            .await?)
    }
}
