//! Report-Phishing sub-client — reported phishing email records.

use reqwest::Method;

use crate::client::EcxClient;
use crate::error::SdkError;
use crate::http::{ApiResponse, Params, RequestOptions};

/// Sub-client for the Report-Phishing module.
pub struct ReportPhishing<'a> {
    pub(crate) client: &'a EcxClient,
}

impl<'a> ReportPhishing<'a> {
    /// Searches the report_phishing module.
    pub async fn search(&self, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                "report_phishing",
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Gets a specific reported email.
    pub async fn get(&self, id: u64, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("report_phishing/{id}"),
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
                "report_phishing/param_schema",
                RequestOptions::new().query(options),
            )
            .await?)
    }
}
