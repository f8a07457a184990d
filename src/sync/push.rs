//! Upload local translation files to Lokalise.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

use crate::config::SyncConfig;
use crate::format::{DEFAULT_SOURCE_LANGUAGE, FileFormat, LANG_ISO_PLACEHOLDER};
use crate::lokalise::{TranslationApi, UploadRequest};

use super::SyncError;

/// Which languages a push covers, decided by the configured directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushMode {
    /// Directory contains `%LANG_ISO%`: push every project language
    AllLanguages,
    /// Directory is a single source language directory
    BaseLanguage,
}

impl PushMode {
    pub fn detect(directory: &str) -> Self {
        if directory.contains(LANG_ISO_PLACEHOLDER) {
            PushMode::AllLanguages
        } else {
            PushMode::BaseLanguage
        }
    }
}

/// One file accepted by Lokalise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub path: PathBuf,
    pub lang_iso: String,
    pub process_id: String,
    /// Status reported by the single check after upload
    pub status: String,
}

/// A file that was not uploaded because of a local error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PushSummary {
    pub uploads: Vec<UploadOutcome>,
    pub skipped: Vec<SkippedFile>,
}

impl PushSummary {
    fn skip(&mut self, path: PathBuf, error: &io::Error) {
        warn!("Skipping {}: {}", path.display(), error);
        self.skipped.push(SkippedFile {
            path,
            reason: error.to_string(),
        });
    }
}

/// Upload every translation file under the configured directory.
///
/// Languages and files are processed one at a time. Local read failures skip
/// the affected file or language; any remote failure ends the push.
pub async fn push_files<A: TranslationApi>(
    api: &A,
    config: &SyncConfig,
) -> Result<PushSummary, SyncError> {
    let mut summary = PushSummary::default();

    match PushMode::detect(&config.translation_directory) {
        PushMode::AllLanguages => {
            let languages = api.list_languages(&config.project_id).await?;
            info!("Pushing {} languages", languages.len());

            for language in &languages {
                let local_code = config.local_language_code(&language.lang_iso);
                let directory = config
                    .translation_directory
                    .replace(LANG_ISO_PLACEHOLDER, local_code);
                push_language(
                    api,
                    config,
                    Path::new(&directory),
                    &language.lang_iso,
                    &mut summary,
                )
                .await?;
            }
        }
        PushMode::BaseLanguage => {
            let directory = PathBuf::from(&config.translation_directory);
            push_language(
                api,
                config,
                &directory,
                DEFAULT_SOURCE_LANGUAGE,
                &mut summary,
            )
            .await?;
        }
    }

    info!(
        "Pushed {} files, skipped {}",
        summary.uploads.len(),
        summary.skipped.len()
    );
    Ok(summary)
}

async fn push_language<A: TranslationApi>(
    api: &A,
    config: &SyncConfig,
    directory: &Path,
    lang_iso: &str,
    summary: &mut PushSummary,
) -> Result<(), SyncError> {
    let files = match list_translation_files(directory, config.format).await {
        Ok(files) => files,
        Err(e) => {
            summary.skip(directory.to_path_buf(), &e);
            return Ok(());
        }
    };

    for path in files {
        let content = match fs::read(&path).await {
            Ok(content) => content,
            Err(e) => {
                summary.skip(path, &e);
                continue;
            }
        };

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let request = UploadRequest::new(
            BASE64_STANDARD.encode(&content),
            &filename,
            lang_iso,
            config.replace_modified,
        );

        info!("Uploading {} ({})", path.display(), lang_iso);
        let queued = api.upload_file(&config.project_id, &request).await?;
        let process = api
            .process_status(&config.project_id, &queued.process_id)
            .await?;
        info!(
            "Upload of {} is {} (process {})",
            filename, process.status, process.process_id
        );

        summary.uploads.push(UploadOutcome {
            path,
            lang_iso: lang_iso.to_string(),
            process_id: process.process_id,
            status: process.status,
        });
    }

    Ok(())
}

/// Regular files in `directory` with the format's extension, by file name.
async fn list_translation_files(directory: &Path, format: FileFormat) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(directory).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        if format.matches_filename(&entry.file_name().to_string_lossy()) {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}
