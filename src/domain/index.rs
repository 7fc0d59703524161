//! Index sub-client — API root listing and definition.

use reqwest::Method;

use crate::client::EcxClient;
use crate::error::SdkError;
use crate::http::{ApiResponse, RequestOptions};

/// Sub-client for the API index.
pub struct Index<'a> {
    pub(crate) client: &'a EcxClient,
}

impl<'a> Index<'a> {
    /// Returns the Swagger 2.0 YAML definition.
    pub async fn spec(&self) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(Method::GET, "/spec", RequestOptions::new())
            .await?)
    }

    /// Returns the `/` index content: the modules, groups, and utilities
    /// available to the caller.
    pub async fn index(&self) -> Result<ApiResponse, SdkError> {
        Ok(self
            .client
            .http
            .call(Method::GET, "/", RequestOptions::new())
            .await?)
    }
}
