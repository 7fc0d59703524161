//! Groups sub-client — closed sharing groups and their entities.
//!
//! Group endpoints live under `groups/{group_id}`. The group id is resolved
//! per call: an explicit argument wins, otherwise the default stored on the
//! client is used, otherwise the call fails locally before touching the
//! network.

use std::path::Path;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::EcxClient;
use crate::error::{ConfigError, SdkError};
use crate::http::{ApiResponse, MultipartPart, Params, ProgressFn, RequestOptions};

/// Hypermedia envelope on file metadata. The API never serves file bytes
/// from the metadata endpoint, only via this link.
#[derive(Debug, Deserialize)]
struct FileMetadata {
    #[serde(rename = "_links")]
    links: FileLinks,
}

#[derive(Debug, Deserialize)]
struct FileLinks {
    download: DownloadLink,
}

#[derive(Debug, Deserialize)]
struct DownloadLink {
    href: String,
}

/// Sub-client for the Groups module.
pub struct Groups<'a> {
    pub(crate) client: &'a EcxClient,
}

impl<'a> Groups<'a> {
    /// Resolves the `groups/{id}` path prefix from the explicit argument or
    /// the stored default.
    pub fn group_url(&self, group_id: Option<&str>) -> Result<String, ConfigError> {
        let id = group_id
            .map(str::to_owned)
            .or_else(|| self.client.default_group.clone())
            .ok_or(ConfigError::MissingGroupIdentifier)?;
        Ok(format!("groups/{}", urlencoding::encode(&id)))
    }

    /// Returns the YAML Swagger 2 definition for the group's API.
    pub async fn spec(&self, group_id: Option<&str>) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("{group_url}/spec"),
                RequestOptions::new(),
            )
            .await?)
    }

    /// Returns the JSON schema for a specific action, defaulting to the
    /// group's full threat-model schema (`get`).
    pub async fn schema(
        &self,
        options: Params,
        action: Option<&str>,
        group_id: Option<&str>,
    ) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        let action = action.unwrap_or("get");
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("{group_url}/schema/{}", urlencoding::encode(action)),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Returns a JSON schema for the group's search parameters.
    pub async fn param_schema(
        &self,
        options: Params,
        group_id: Option<&str>,
    ) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("{group_url}/param_schema"),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Searches the activity listing for the group's entities.
    pub async fn activity(
        &self,
        options: Params,
        group_id: Option<&str>,
    ) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("{group_url}/activity"),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Searches the group's entities.
    pub async fn search(
        &self,
        options: Params,
        group_id: Option<&str>,
    ) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        Ok(self
            .client
            .http
            .call(Method::GET, &group_url, RequestOptions::new().query(options))
            .await?)
    }

    /// Gets a specific entity.
    pub async fn get(
        &self,
        entity_id: u64,
        options: Params,
        group_id: Option<&str>,
    ) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("{group_url}/{entity_id}"),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Submits a new entity to the group.
    pub async fn create<T: Serialize + ?Sized>(
        &self,
        data: &T,
        options: Params,
        group_id: Option<&str>,
    ) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        let body = serde_json::to_value(data)?;
        Ok(self
            .client
            .http
            .call(
                Method::POST,
                &group_url,
                RequestOptions::new().json(body).query(options),
            )
            .await?)
    }

    /// Edits a group entity.
    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        entity_id: u64,
        data: &T,
        options: Params,
        group_id: Option<&str>,
    ) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        let body = serde_json::to_value(data)?;
        Ok(self
            .client
            .http
            .call(
                Method::PATCH,
                &format!("{group_url}/{entity_id}"),
                RequestOptions::new().json(body).query(options),
            )
            .await?)
    }

    /// Checks that an entity with that id exists; the response carries a
    /// `Last-Modified` header.
    pub async fn asset_head(
        &self,
        entity_id: u64,
        group_id: Option<&str>,
    ) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        Ok(self
            .client
            .http
            .call(
                Method::HEAD,
                &format!("{group_url}/{entity_id}"),
                RequestOptions::new(),
            )
            .await?)
    }

    /// Searches the activity listing for a specific entity.
    pub async fn asset_activity(
        &self,
        entity_id: u64,
        options: Params,
        group_id: Option<&str>,
    ) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("{group_url}/{entity_id}/activity"),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    // ── Files ────────────────────────────────────────────────────────────

    /// Uploads a file to an entity as a multipart `file` part. The optional
    /// callback observes upload transfer progress.
    pub async fn upload_file(
        &self,
        entity_id: u64,
        file_path: &Path,
        options: Params,
        group_id: Option<&str>,
        progress: Option<ProgressFn>,
    ) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        let contents = tokio::fs::read(file_path).await?;
        let filename = file_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        let mut request = RequestOptions::new()
            .query(options)
            .part(MultipartPart::new("file", contents).filename(filename));
        request.progress = progress;

        Ok(self
            .client
            .http
            .call(
                Method::POST,
                &format!("{group_url}/{entity_id}/files"),
                request,
            )
            .await?)
    }

    /// Lists the files attached to an entity.
    pub async fn files(
        &self,
        entity_id: u64,
        options: Params,
        group_id: Option<&str>,
    ) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("{group_url}/{entity_id}/files"),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Gets the metadata record for a file attached to an entity.
    pub async fn get_file(
        &self,
        entity_id: u64,
        file_hash: &str,
        options: Params,
        group_id: Option<&str>,
    ) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!(
                    "{group_url}/{entity_id}/files/{}",
                    urlencoding::encode(file_hash)
                ),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Downloads a file attached to an entity.
    ///
    /// Two requests: the metadata record is fetched first, then the
    /// `_links.download.href` hypermedia link from its JSON body is
    /// followed. The second response — the file bytes — is returned, and
    /// the optional callback observes its download progress.
    pub async fn download_file(
        &self,
        entity_id: u64,
        file_hash: &str,
        options: Params,
        group_id: Option<&str>,
        progress: Option<ProgressFn>,
    ) -> Result<ApiResponse, SdkError> {
        let metadata = self
            .get_file(entity_id, file_hash, options, group_id)
            .await?;
        let metadata: FileMetadata = metadata.json().map_err(|e| {
            SdkError::Validation(format!("file metadata has no _links.download.href: {e}"))
        })?;

        let mut request = RequestOptions::new();
        request.progress = progress;
        Ok(self
            .client
            .http
            .call(Method::GET, &metadata.links.download.href, request)
            .await?)
    }

    // ── Notes ────────────────────────────────────────────────────────────

    /// Lists the notes attached to an entity.
    pub async fn notes(
        &self,
        entity_id: u64,
        options: Params,
        group_id: Option<&str>,
    ) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        Ok(self
            .client
            .http
            .call(
                Method::GET,
                &format!("{group_url}/{entity_id}/notes"),
                RequestOptions::new().query(options),
            )
            .await?)
    }

    /// Attaches a note to an entity.
    pub async fn add_note(
        &self,
        entity_id: u64,
        note: &str,
        group_id: Option<&str>,
    ) -> Result<ApiResponse, SdkError> {
        let group_url = self.group_url(group_id)?;
        Ok(self
            .client
            .http
            .call(
                Method::POST,
                &format!("{group_url}/{entity_id}/notes"),
                RequestOptions::new().json(json!({ "note": note })),
            )
            .await?)
    }
}
