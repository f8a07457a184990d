//! Decode local translation files into key/translation pairs.

use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use super::{FileFormat, FormatError, po};

/// One translatable string read from a local file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationMessage {
    /// Key identifier, unique within a file
    pub key_id: String,
    /// Translated text in the file's language
    pub translation: String,
    /// Name of the file the message was read from
    pub filename: String,
}

/// Load the messages of `dir/filename`.
///
/// Files that don't carry the format's extension yield no messages.
pub fn load_translation_file(
    dir: &Path,
    filename: &str,
    format: FileFormat,
) -> Result<Vec<TranslationMessage>, FormatError> {
    if !format.matches_filename(filename) {
        return Ok(Vec::new());
    }

    let path = dir.join(filename);
    let messages = match format {
        FileFormat::Po => parse_po_messages(&path, filename)?,
        FileFormat::Json | FileFormat::JsonStructured => {
            let content = std::fs::read_to_string(&path)?;
            parse_json_messages(&content, filename)?
        }
    };

    debug!("Loaded {} messages from {}", messages.len(), path.display());
    Ok(messages)
}

/// Load every file of `format` in `dir`, in file name order.
pub fn load_directory(
    dir: &Path,
    format: FileFormat,
) -> Result<Vec<TranslationMessage>, FormatError> {
    let mut filenames = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            filenames.push(name.to_string());
        }
    }
    filenames.sort();

    let mut messages = Vec::new();
    for filename in filenames {
        messages.extend(load_translation_file(dir, &filename, format)?);
    }
    Ok(messages)
}

fn parse_po_messages(path: &Path, filename: &str) -> Result<Vec<TranslationMessage>, FormatError> {
    let raw = std::fs::read_to_string(path)?;
    let catalog = po::read_catalog(&raw)?;

    let messages = catalog
        .messages()
        .map(|message| {
            let translation = if message.is_plural() {
                message
                    .msgstr_plural()
                    .ok()
                    .and_then(|forms| forms.first().cloned())
                    .unwrap_or_default()
            } else {
                message.msgstr().unwrap_or_default().to_string()
            };

            TranslationMessage {
                key_id: message.msgid().to_string(),
                translation,
                filename: filename.to_string(),
            }
        })
        .collect();

    Ok(messages)
}

/// Parse Lokalise flat JSON.
///
/// Values are either plain strings or objects carrying a `translation` field
/// (plus optional `notes`).
fn parse_json_messages(content: &str, filename: &str) -> Result<Vec<TranslationMessage>, FormatError> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Object(entries) = value else {
        return Err(FormatError::NotAnObject);
    };

    let messages = entries
        .into_iter()
        .map(|(key_id, value)| {
            let translation = match value {
                Value::String(text) => text,
                Value::Object(fields) => fields
                    .get("translation")
                    .and_then(|t| t.as_str())
                    .unwrap_or_default()
                    .to_string(),
                _ => String::new(),
            };

            TranslationMessage {
                key_id,
                translation,
                filename: filename.to_string(),
            }
        })
        .collect();

    Ok(messages)
}
