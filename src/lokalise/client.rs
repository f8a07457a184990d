use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::env;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::api::TranslationApi;
use super::error::{ApiError, ApiResult};
use super::types::{
    BulkKeysResponse, BulkResult, DownloadResponse, ExportOptions, KeyArchiveRequest,
    KeyCreateRequest, KeysPayload, KeysResponse, Language, LanguagesResponse, ProcessResponse,
    QueuedProcess, RemoteKey, UploadRequest,
};

pub const DEFAULT_API_URL: &str = "https://api.lokalise.com/api2";

/// Keys requested per page of a listing.
const KEY_PAGE_LIMIT: usize = 5000;

const PAGE_COUNT_HEADER: &str = "X-Pagination-Page-Count";

/// HTTP client for the Lokalise REST API
pub struct LokaliseClient {
    base_url: String,
    api_token: String,
    client: Client,
}

impl LokaliseClient {
    /// Create a new Lokalise client
    ///
    /// Priority for base URL:
    /// 1. Explicit `api_url` parameter
    /// 2. LOKALISE_API_URL environment variable
    /// 3. Default: https://api.lokalise.com/api2
    pub fn new(api_token: impl Into<String>, api_url: Option<String>) -> Self {
        let base_url = api_url
            .or_else(|| env::var("LOKALISE_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            client: Client::new(),
        }
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create an authenticated GET request builder
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.get(&url).header("X-Api-Token", &self.api_token)
    }

    /// Create an authenticated POST request builder
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.post(&url).header("X-Api-Token", &self.api_token)
    }

    /// Create an authenticated PUT request builder
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.put(&url).header("X-Api-Token", &self.api_token)
    }

    /// Handle API response with standardized error handling
    ///
    /// Returns the deserialized response body on success,
    /// or an ApiError::Status carrying the body verbatim on non-success codes.
    pub async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiError::InvalidResponse {
                    message: e.to_string(),
                })
        } else {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ApiError::Status {
                status,
                message: error_text,
            })
        }
    }
}

/// Whether another page of keys follows `page`.
///
/// The page count header wins when present; otherwise a full page means
/// there may be more. An empty page always ends the listing.
pub(super) fn has_next_page(page: u32, page_count: Option<u32>, received: usize) -> bool {
    if received == 0 {
        return false;
    }
    match page_count {
        Some(count) => page < count,
        None => received >= KEY_PAGE_LIMIT,
    }
}

impl TranslationApi for LokaliseClient {
    async fn list_keys(&self, project_id: &str, platform: &str) -> ApiResult<Vec<RemoteKey>> {
        let path = format!("/projects/{}/keys", project_id);
        let mut keys = Vec::new();
        let mut page: u32 = 1;

        loop {
            let response = self
                .get(&path)
                .query(&[("filter_platforms", platform), ("filter_archived", "exclude")])
                .query(&[("limit", KEY_PAGE_LIMIT as u32), ("page", page)])
                .send()
                .await?;

            let page_count = response
                .headers()
                .get(PAGE_COUNT_HEADER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok());
            let body: KeysResponse = Self::handle_response(response).await?;
            let received = body.keys.len();
            keys.extend(body.keys);

            if !has_next_page(page, page_count, received) {
                break;
            }
            page += 1;
        }

        debug!("Listed {} keys in {} pages", keys.len(), page);
        Ok(keys)
    }

    async fn create_keys(
        &self,
        project_id: &str,
        keys: &[KeyCreateRequest],
    ) -> ApiResult<BulkResult<RemoteKey>> {
        let response = self
            .post(&format!("/projects/{}/keys", project_id))
            .json(&KeysPayload { keys })
            .send()
            .await?;

        let body: BulkKeysResponse = Self::handle_response(response).await?;
        Ok(BulkResult {
            items: body.keys,
            errors: body.errors,
        })
    }

    async fn archive_keys(
        &self,
        project_id: &str,
        keys: &[KeyArchiveRequest],
    ) -> ApiResult<BulkResult<RemoteKey>> {
        let response = self
            .put(&format!("/projects/{}/keys", project_id))
            .json(&KeysPayload { keys })
            .send()
            .await?;

        let body: BulkKeysResponse = Self::handle_response(response).await?;
        Ok(BulkResult {
            items: body.keys,
            errors: body.errors,
        })
    }

    async fn list_languages(&self, project_id: &str) -> ApiResult<Vec<Language>> {
        let response = self
            .get(&format!("/projects/{}/languages", project_id))
            .send()
            .await?;

        let body: LanguagesResponse = Self::handle_response(response).await?;
        Ok(body.languages)
    }

    async fn request_export(
        &self,
        project_id: &str,
        options: &ExportOptions,
    ) -> ApiResult<String> {
        let response = self
            .post(&format!("/projects/{}/files/download", project_id))
            .json(options)
            .send()
            .await?;

        let body: DownloadResponse = Self::handle_response(response).await?;
        Ok(body.bundle_url)
    }

    async fn fetch_bundle(&self, bundle_url: &str, destination: &Path) -> ApiResult<()> {
        // Bundle URLs are pre-signed, no token header
        let mut response = self.client.get(bundle_url).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status,
                message: format!("Failed to download bundle: {}", error_text),
            });
        }

        let mut file = tokio::fs::File::create(destination).await?;
        let mut written = 0usize;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len();
        }
        file.flush().await?;

        debug!("Wrote {} bytes to {}", written, destination.display());
        Ok(())
    }

    async fn upload_file(
        &self,
        project_id: &str,
        request: &UploadRequest,
    ) -> ApiResult<QueuedProcess> {
        let response = self
            .post(&format!("/projects/{}/files/upload", project_id))
            .json(request)
            .send()
            .await?;

        let body: ProcessResponse = Self::handle_response(response).await?;
        Ok(body.process)
    }

    async fn process_status(
        &self,
        project_id: &str,
        process_id: &str,
    ) -> ApiResult<QueuedProcess> {
        let response = self
            .get(&format!("/projects/{}/processes/{}", project_id, process_id))
            .send()
            .await?;

        let body: ProcessResponse = Self::handle_response(response).await?;
        Ok(body.process)
    }
}
