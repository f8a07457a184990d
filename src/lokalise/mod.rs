//! Lokalise API access.
//!
//! [`TranslationApi`] describes the operations the sync pipeline needs and
//! [`LokaliseClient`] implements them over the REST API v2.

mod api;
mod client;
mod error;
mod types;

#[cfg(test)]
pub use api::MockTranslationApi;
pub use api::TranslationApi;
pub use client::{DEFAULT_API_URL, LokaliseClient};
pub use error::{ApiError, ApiResult};
pub use types::{
    BulkItemError, BulkResult, ExportOptions, KeyArchiveRequest, KeyCreateRequest, KeyTranslation,
    Language, PUSHED_TAG, QueuedProcess, RemoteKey, UploadRequest,
};
