//! HTTP dispatch layer — `EcxHttp` and the request-option merge.

pub mod client;
pub mod options;
pub mod response;

pub use client::{EcxHttp, TransportOptions};
pub use options::{MultipartPart, Params, Progress, ProgressFn, RequestOptions};
pub use response::ApiResponse;
