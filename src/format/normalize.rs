//! Re-serialize exported files into the form they are committed in.
//!
//! Lokalise exports are not byte-identical to what was imported: PO output is
//! limited by what its parser keeps, and structured JSON comes back with
//! shuffled keys and uneven spacing. Running every downloaded file through
//! these writers keeps git diffs down to real translation changes.

use serde_json::Value;

use super::{FileFormat, FormatError, po};

/// Normalize `raw` file content of the given format.
///
/// Idempotent: normalizing already normalized content returns it unchanged.
pub fn normalize(raw: &str, format: FileFormat) -> Result<String, FormatError> {
    match format {
        FileFormat::Po => normalize_po(raw),
        FileFormat::Json => normalize_json(raw),
        FileFormat::JsonStructured => normalize_structured_json(raw),
    }
}

fn normalize_po(raw: &str) -> Result<String, FormatError> {
    let catalog = po::read_catalog(raw)?;
    po::write_catalog(&catalog)
}

/// Pretty print with 2-space indentation, keeping key order.
fn normalize_json(raw: &str) -> Result<String, FormatError> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Pretty print with keys sorted at every depth and a trailing newline.
fn normalize_structured_json(raw: &str) -> Result<String, FormatError> {
    let value: Value = serde_json::from_str(raw)?;
    let mut output = serde_json::to_string_pretty(&sort_keys(value))?;
    output.push('\n');
    Ok(output)
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
