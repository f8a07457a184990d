//! Unpack a downloaded export bundle into the translation tree.

use miette::Diagnostic;
use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::format::{FileFormat, FormatError, normalize};

/// Errors that abort an extraction.
#[derive(Error, Diagnostic, Debug)]
pub enum ExtractError {
    #[error("Failed to read bundle: {0}")]
    #[diagnostic(
        code(lokalise_sync::sync::extract::archive),
        help("The bundle may be truncated or corrupt. Run the pull again.")
    )]
    Archive(#[from] ZipError),

    #[error("Failed to process {path}: {source}")]
    #[diagnostic(code(lokalise_sync::sync::extract::format))]
    Format {
        path: String,
        #[source]
        source: FormatError,
    },

    #[error("IO error: {0}")]
    #[diagnostic(code(lokalise_sync::sync::extract::io))]
    Io(#[from] io::Error),
}

/// Unpack the entries of a zip archive into `target_directory`.
///
/// Entry sizes come from the central directory, so entries written with a
/// trailing data descriptor (general purpose flag bit 3) are read like any
/// other. Entries are processed one at a time in archive order. Regular files
/// with the format's extension are normalized and written; everything else is
/// skipped. Returns the written paths in write order.
pub fn extract_bundle<R: Read + Seek>(
    reader: R,
    target_directory: &Path,
    format: FileFormat,
) -> Result<Vec<PathBuf>, ExtractError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut written = Vec::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();

        if !entry.is_file() || !format.matches_filename(&name) {
            info!("Entry did not match expected file extension, skipping {}", name);
            continue;
        }

        let Some(relative_path) = entry.enclosed_name() else {
            warn!("Entry escapes the target directory, skipping {}", name);
            continue;
        };

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes).map_err(ZipError::from)?;

        let normalized = String::from_utf8(bytes)
            .map_err(FormatError::from)
            .and_then(|content| normalize(&content, format))
            .map_err(|source| ExtractError::Format {
                path: name.clone(),
                source,
            })?;

        let full_path = target_directory.join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, normalized)?;

        info!("Imported {}", name);
        written.push(full_path);
    }

    Ok(written)
}

/// Extract the bundle stored at `bundle_path`, then delete it.
///
/// Failing to delete the bundle is logged and otherwise ignored.
pub fn extract_bundle_file(
    bundle_path: &Path,
    target_directory: &Path,
    format: FileFormat,
) -> Result<Vec<PathBuf>, ExtractError> {
    let file = File::open(bundle_path)?;
    let written = extract_bundle(BufReader::new(file), target_directory, format)?;

    if let Err(e) = fs::remove_file(bundle_path) {
        warn!("Failed to remove bundle {}: {}", bundle_path.display(), e);
    }

    Ok(written)
}
