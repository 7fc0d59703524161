//! Query sub-client — cross-module search.

use reqwest::Method;

use crate::client::EcxClient;
use crate::error::SdkError;
use crate::http::{ApiResponse, Params, RequestOptions};

/// Sub-client for the Query module.
pub struct Query<'a> {
    pub(crate) client: &'a EcxClient,
}

impl<'a> Query<'a> {
    /// Searches across all modules available to the caller.
    pub async fn search(&self, options: Params) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(Method::GET, "query", RequestOptions::new().query(options))
            .await?)
    }
}
