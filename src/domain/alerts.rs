//! Alerts sub-client — saved-search alert management.

use reqwest::Method;
use serde::Serialize;
use serde_json::json;

use crate::client::EcxClient;
use crate::error::SdkError;
use crate::http::{ApiResponse, Params, RequestOptions};

/// Sub-client for the Alerts module.
pub struct Alerts<'a> {
    pub(crate) client: &'a EcxClient,
}

impl<'a> Alerts<'a> {
    /// Searches your alerts.
    pub async fn search(&self, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(Method::GET, "alerts", RequestOptions::new().query(options))
            .await?)
    }

    /// Gets a specific alert.
    pub async fn get(&self, id: u64, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("alerts/{id}"),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Creates a new alert.
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
                "alerts",
                RequestOptions::new().json(body).query(options),
            )
            .await?)
    }

    /// Updates an alert.
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
                &format!("alerts/{id}"),
                RequestOptions::new().json(body).query(options),
            )
            .await?)
    }

    /// Updates an alert to `status: active`.
    pub async fn active(&self, id: u64, options: Params) -> Result<ApiResponse, SdkError> {
        self.patch(id, &json!({ "status": "active" }), options).await
    }

    /// Updates an alert to `status: inactive`.
    pub async fn inactive(&self, id: u64, options: Params) -> Result<ApiResponse, SdkError> {
        self.patch(id, &json!({ "status": "inactive" }), options)
            .await
    }
}
