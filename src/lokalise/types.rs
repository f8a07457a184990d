//! Request and response bodies of the Lokalise API v2.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tag attached to every file pushed by this tool.
pub const PUSHED_TAG: &str = "Pushed";

/// A key as stored in Lokalise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteKey {
    pub key_id: u64,
    /// Key name per platform (`ios`, `android`, `web`, `other`)
    #[serde(default)]
    pub key_name: BTreeMap<String, String>,
    #[serde(default)]
    pub is_archived: bool,
}

impl RemoteKey {
    /// Name of the key on `platform`, if any.
    pub fn name_for(&self, platform: &str) -> Option<&str> {
        self.key_name.get(platform).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyTranslation {
    pub language_iso: String,
    pub translation: String,
}

/// Payload creating one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCreateRequest {
    pub key_name: String,
    pub platforms: Vec<String>,
    pub filenames: BTreeMap<String, String>,
    pub translations: Vec<KeyTranslation>,
}

/// Payload archiving one key. Translations and metadata are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyArchiveRequest {
    pub key_id: u64,
    pub is_archived: bool,
}

impl KeyArchiveRequest {
    pub fn archive(key_id: u64) -> Self {
        Self {
            key_id,
            is_archived: true,
        }
    }
}

/// Item rejected by a bulk endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkItemError {
    pub message: String,
    #[serde(default)]
    pub code: Option<u32>,
    #[serde(default)]
    pub key: Option<serde_json::Value>,
}

/// Outcome of a bulk call: accepted items plus per-item errors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BulkResult<T> {
    pub items: Vec<T>,
    pub errors: Vec<BulkItemError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub lang_iso: String,
    #[serde(default)]
    pub lang_name: Option<String>,
}

/// Options of `POST /files/download`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportOptions {
    pub format: String,
    pub original_filenames: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_structure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_comments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_description: Option<bool>,
    pub add_newline_eof: bool,
    pub export_empty_as: String,
    pub json_unescaped_slashes: bool,
    pub replace_breaks: bool,
    pub placeholder_format: String,
}

/// Payload of `POST /files/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadRequest {
    /// Base64 encoded file content
    pub data: String,
    pub filename: String,
    pub lang_iso: String,
    pub convert_placeholders: bool,
    pub tags: Vec<String>,
    pub replace_modified: bool,
    pub skip_detect_lang_iso: bool,
}

impl UploadRequest {
    /// Upload as-is: no placeholder conversion, no language detection.
    pub fn new(data: String, filename: &str, lang_iso: &str, replace_modified: bool) -> Self {
        Self {
            data,
            filename: filename.to_string(),
            lang_iso: lang_iso.to_string(),
            convert_placeholders: false,
            tags: vec![PUSHED_TAG.to_string()],
            replace_modified,
            skip_detect_lang_iso: true,
        }
    }
}

/// Asynchronous server-side job, e.g. a file import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedProcess {
    pub process_id: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KeysResponse {
    #[serde(default)]
    pub keys: Vec<RemoteKey>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkKeysResponse {
    #[serde(default)]
    pub keys: Vec<RemoteKey>,
    #[serde(default)]
    pub errors: Vec<BulkItemError>,
}

#[derive(Debug, Serialize)]
pub(crate) struct KeysPayload<'a, T> {
    pub keys: &'a [T],
}

#[derive(Debug, Deserialize)]
pub(crate) struct LanguagesResponse {
    #[serde(default)]
    pub languages: Vec<Language>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DownloadResponse {
    pub bundle_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProcessResponse {
    pub process: QueuedProcess,
}
