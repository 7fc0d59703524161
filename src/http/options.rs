//! Per-request options and the layered merge that produces the final request.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Query parameters appended to the request URL.
pub type Params = BTreeMap<String, String>;

/// Transfer progress reported to a [`ProgressFn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Bytes moved so far.
    pub transferred: u64,
    /// Total bytes, when known up front.
    pub total: Option<u64>,
}

/// Callback invoked with transfer progress during upload and download.
pub type ProgressFn = Arc<dyn Fn(Progress) + Send + Sync>;

/// One part of a `multipart/form-data` request body.
#[derive(Clone)]
pub struct MultipartPart {
    /// Form field name.
    pub name: String,
    /// Raw part contents.
    pub contents: Vec<u8>,
    /// Filename sent in the part's content disposition.
    pub filename: Option<String>,
}

impl MultipartPart {
    pub fn new(name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            contents,
            filename: None,
        }
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

impl fmt::Debug for MultipartPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipartPart")
            .field("name", &self.name)
            .field("contents_len", &self.contents.len())
            .field("filename", &self.filename)
            .finish()
    }
}

/// Free-form request configuration accepted by every endpoint method.
///
/// Recognized keys mirror the wire request: `query` (URL query string),
/// `json` (request body), `multipart` (file-upload parts), `headers`
/// (merged into the final header set), `progress` (transfer callback).
#[derive(Clone, Default)]
pub struct RequestOptions {
    pub query: Params,
    pub json: Option<Value>,
    pub multipart: Vec<MultipartPart>,
    /// Multi-valued: merging appends rather than replaces.
    pub headers: Vec<(String, String)>,
    pub progress: Option<ProgressFn>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query parameter map.
    pub fn query(mut self, params: Params) -> Self {
        self.query = params;
        self
    }

    /// Set the JSON request body.
    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Append a header value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append a multipart part.
    pub fn part(mut self, part: MultipartPart) -> Self {
        self.multipart.push(part);
        self
    }

    /// Set the transfer-progress callback.
    pub fn progress(mut self, callback: ProgressFn) -> Self {
        self.progress = Some(callback);
        self
    }
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("query", &self.query)
            .field("json", &self.json)
            .field("multipart", &self.multipart)
            .field("headers", &self.headers)
            .field("progress", &self.progress.as_ref().map(|_| "…"))
            .finish()
    }
}

/// Merge the four option layers into the final request configuration.
///
/// Ordered, deterministic:
///
/// 1. caller options — the base;
/// 2. `Authorization: <api key>` — appended to the header set, so a
///    caller-supplied authorization value is kept alongside it rather than
///    silently lost;
/// 3. `Content-Type: application/json` — appended only when the caller
///    supplied neither explicit headers nor a multipart body (multipart
///    sets its own content type, explicit headers take full control);
/// 4. instance global options — win over all preceding layers at scalar
///    leaves (query keys, JSON object fields); sequence-valued keys
///    (headers, multipart parts, JSON arrays) concatenate instead.
pub(crate) fn finalize(caller: RequestOptions, api_key: &str, global: &RequestOptions) -> RequestOptions {
    let mut merged = caller;
    let caller_has_headers = !merged.headers.is_empty();
    let caller_has_multipart = !merged.multipart.is_empty();

    merged
        .headers
        .push(("Authorization".to_string(), api_key.to_string()));

    if !caller_has_headers && !caller_has_multipart {
        merged
            .headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
    }

    for (key, value) in &global.query {
        merged.query.insert(key.clone(), value.clone());
    }
    merged.headers.extend(global.headers.iter().cloned());
    merged.multipart.extend(global.multipart.iter().cloned());
    match (&mut merged.json, &global.json) {
        (Some(base), Some(overlay)) => merge_json(base, overlay),
        (None, Some(overlay)) => merged.json = Some(overlay.clone()),
        _ => {}
    }
    if let Some(progress) = &global.progress {
        merged.progress = Some(progress.clone());
    }

    merged
}

/// Recursive JSON merge: objects merge key-wise, arrays concatenate,
/// any other overlay value replaces the base.
fn merge_json(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(base_value) => merge_json(base_value, overlay_value),
                    None => {
                        base_map.insert(key.clone(), overlay_value.clone());
                    }
                }
            }
        }
        (Value::Array(base_items), Value::Array(overlay_items)) => {
            base_items.extend(overlay_items.iter().cloned());
        }
        (base, overlay) => *base = overlay.clone(),
    }
}
