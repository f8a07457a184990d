//! Translation file formats.
//!
//! Every format-dependent decision (file extension, placeholder style, line
//! break handling, which normalizer runs) is derived from [`FileFormat`].

mod loader;
mod normalize;
mod po;

use miette::Diagnostic;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use loader::{TranslationMessage, load_directory, load_translation_file};
pub use normalize::normalize;

/// Marker substituted with a language code inside configured directories.
pub const LANG_ISO_PLACEHOLDER: &str = "%LANG_ISO%";

/// Language code used when pushing a directory without the placeholder.
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Errors raised while decoding or re-encoding translation files.
#[derive(Error, Diagnostic, Debug)]
pub enum FormatError {
    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(lokalise_sync::format::json))]
    Json(#[from] serde_json::Error),

    #[error("Invalid PO file: {message}")]
    #[diagnostic(code(lokalise_sync::format::po))]
    Po { message: String },

    #[error("Expected a JSON object at the top level")]
    #[diagnostic(
        code(lokalise_sync::format::not_an_object),
        help("Flat JSON translation files map each key to a string or to an object with a translation field")
    )]
    NotAnObject,

    #[error("Content is not valid UTF-8")]
    #[diagnostic(code(lokalise_sync::format::utf8))]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(lokalise_sync::format::io))]
    Io(#[from] std::io::Error),
}

/// File formats understood by the sync pipeline.
///
/// A format is not the same thing as an extension: both JSON variants share
/// `.json` but are exported and normalized differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    Po,
    Json,
    JsonStructured,
}

impl FileFormat {
    /// Name of the format in Lokalise API requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Po => "po",
            FileFormat::Json => "json",
            FileFormat::JsonStructured => "json_structured",
        }
    }

    /// File extension (without the dot) of files in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Po => "po",
            FileFormat::Json | FileFormat::JsonStructured => "json",
        }
    }

    /// Placeholder style requested on export.
    pub fn placeholder_format(&self) -> &'static str {
        match self {
            FileFormat::Po => "printf",
            FileFormat::Json | FileFormat::JsonStructured => "icu",
        }
    }

    /// Whether line breaks are exported as `\n` escapes.
    pub fn replace_breaks(&self) -> bool {
        matches!(self, FileFormat::Po)
    }

    /// Whether `filename` carries this format's extension.
    pub fn matches_filename(&self, filename: &str) -> bool {
        filename.ends_with(self.extension())
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a format name is not one of `po`, `json`, `json_structured`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported file format: {0}")]
pub struct UnsupportedFormat(pub String);

impl FromStr for FileFormat {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "po" => Ok(FileFormat::Po),
            "json" => Ok(FileFormat::Json),
            "json_structured" => Ok(FileFormat::JsonStructured),
            other => Err(UnsupportedFormat(other.to_string())),
        }
    }
}
