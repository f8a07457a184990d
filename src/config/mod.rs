//! Validated configuration shared by the push and pull pipelines.

use miette::Diagnostic;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::format::{DEFAULT_SOURCE_LANGUAGE, FileFormat, LANG_ISO_PLACEHOLDER, UnsupportedFormat};

/// Where a pull stores the downloaded bundle before extracting it.
pub const DEFAULT_BUNDLE_PATH: &str = "translations.zip";

pub const DEFAULT_PLATFORM: &str = "web";

/// Errors raised before any remote call is made.
#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Missing required value: {name}")]
    #[diagnostic(code(lokalise_sync::config::missing_value))]
    MissingValue { name: &'static str },

    #[error("Invalid directory '{directory}': {reason}")]
    #[diagnostic(
        code(lokalise_sync::config::invalid_directory),
        help("Use %LANG_ISO% at most once, e.g. ./locales/%LANG_ISO%/LC_MESSAGES")
    )]
    InvalidDirectory { directory: String, reason: String },

    #[error(transparent)]
    #[diagnostic(
        code(lokalise_sync::config::unsupported_format),
        help("Supported formats: po, json, json_structured")
    )]
    UnsupportedFormat(#[from] UnsupportedFormat),

    #[error("Invalid language ISO code mapping: {message}")]
    #[diagnostic(
        code(lokalise_sync::config::invalid_language_mapping),
        help("Expected a JSON object of Lokalise code to local code, e.g. zh_Hans to zh_CN")
    )]
    InvalidLanguageMapping { message: String },
}

/// Configuration for one push or pull run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub project_id: String,
    pub format: FileFormat,
    /// Platform whose key names are compared during reconciliation
    pub platform: String,
    /// Language code attached to keys created from local files
    pub source_language: String,
    /// Directory holding the source language files read by key reconciliation
    pub source_language_directory: PathBuf,
    /// Directory synced with Lokalise, optionally containing `%LANG_ISO%`
    pub translation_directory: String,
    /// Whether pushed files may overwrite translations edited in Lokalise
    pub replace_modified: bool,
    /// Lokalise language code -> local directory code
    pub language_mapping: BTreeMap<String, String>,
    pub bundle_path: PathBuf,
}

impl SyncConfig {
    /// Create a configuration with defaults for every optional value.
    pub fn new(
        project_id: impl Into<String>,
        format: FileFormat,
        translation_directory: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let project_id = project_id.into();
        if project_id.trim().is_empty() {
            return Err(ConfigError::MissingValue { name: "project-id" });
        }

        let translation_directory = translation_directory.into();
        validate_directory(&translation_directory)?;

        Ok(Self {
            project_id,
            format,
            platform: DEFAULT_PLATFORM.to_string(),
            source_language: DEFAULT_SOURCE_LANGUAGE.to_string(),
            source_language_directory: PathBuf::from("."),
            translation_directory,
            replace_modified: false,
            language_mapping: BTreeMap::new(),
            bundle_path: PathBuf::from(DEFAULT_BUNDLE_PATH),
        })
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn with_source_language(mut self, language: impl Into<String>) -> Self {
        self.source_language = language.into();
        self
    }

    pub fn with_source_language_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_language_directory = dir.into();
        self
    }

    pub fn with_replace_modified(mut self, replace_modified: bool) -> Self {
        self.replace_modified = replace_modified;
        self
    }

    pub fn with_language_mapping(mut self, mapping: BTreeMap<String, String>) -> Self {
        self.language_mapping = mapping;
        self
    }

    pub fn with_bundle_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.bundle_path = path.into();
        self
    }

    /// Directory code used locally for a Lokalise language code.
    pub fn local_language_code<'a>(&'a self, lang_iso: &'a str) -> &'a str {
        self.language_mapping
            .get(lang_iso)
            .map(String::as_str)
            .unwrap_or(lang_iso)
    }
}

/// Check a configured directory: non-empty, placeholder at most once.
pub fn validate_directory(directory: &str) -> Result<(), ConfigError> {
    if directory.trim().is_empty() {
        return Err(ConfigError::MissingValue {
            name: "translation-directory",
        });
    }

    if directory.matches(LANG_ISO_PLACEHOLDER).count() > 1 {
        return Err(ConfigError::InvalidDirectory {
            directory: directory.to_string(),
            reason: format!("{} appears more than once", LANG_ISO_PLACEHOLDER),
        });
    }

    Ok(())
}

/// Parse a JSON object mapping Lokalise language codes to local codes.
pub fn parse_language_mapping(raw: &str) -> Result<BTreeMap<String, String>, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    serde_json::from_str(raw).map_err(|e| ConfigError::InvalidLanguageMapping {
        message: e.to_string(),
    })
}
