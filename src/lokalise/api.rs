//! Remote translation service operations.
//!
//! The sync pipeline only talks to Lokalise through this trait so the
//! orchestrators can be exercised against mocks.

use std::path::Path;

#[cfg(test)]
use mockall::automock;

use super::error::ApiResult;
use super::types::{
    BulkResult, ExportOptions, KeyArchiveRequest, KeyCreateRequest, Language, QueuedProcess,
    RemoteKey, UploadRequest,
};

/// Trait for Lokalise operations. Can be mocked in tests.
#[cfg_attr(test, automock)]
#[allow(async_fn_in_trait)]
pub trait TranslationApi {
    /// List the non-archived keys of a project on one platform.
    async fn list_keys(&self, project_id: &str, platform: &str) -> ApiResult<Vec<RemoteKey>>;

    /// Create keys in one bulk call.
    async fn create_keys(
        &self,
        project_id: &str,
        keys: &[KeyCreateRequest],
    ) -> ApiResult<BulkResult<RemoteKey>>;

    /// Set the archived flag on keys in one bulk call.
    async fn archive_keys(
        &self,
        project_id: &str,
        keys: &[KeyArchiveRequest],
    ) -> ApiResult<BulkResult<RemoteKey>>;

    /// List the languages configured in a project.
    async fn list_languages(&self, project_id: &str) -> ApiResult<Vec<Language>>;

    /// Build an export bundle and return its download URL.
    async fn request_export(&self, project_id: &str, options: &ExportOptions)
    -> ApiResult<String>;

    /// Download a bundle to `destination`.
    async fn fetch_bundle(&self, bundle_url: &str, destination: &Path) -> ApiResult<()>;

    /// Upload one translation file, returning the queued import process.
    async fn upload_file(
        &self,
        project_id: &str,
        request: &UploadRequest,
    ) -> ApiResult<QueuedProcess>;

    /// Fetch the current state of a queued process.
    async fn process_status(&self, project_id: &str, process_id: &str)
    -> ApiResult<QueuedProcess>;
}
