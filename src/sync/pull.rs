//! Download an export bundle from Lokalise and unpack it locally.

use std::path::PathBuf;
use tracing::info;

use crate::config::SyncConfig;
use crate::lokalise::TranslationApi;

use super::SyncError;
use super::extract::extract_bundle_file;
use super::plan::{DirectoryLayout, plan_export};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullSummary {
    pub bundle_url: String,
    pub layout: DirectoryLayout,
    /// Written files, in archive order
    pub files: Vec<PathBuf>,
}

/// Pull every language into the configured translation directory.
pub async fn pull<A: TranslationApi>(api: &A, config: &SyncConfig) -> Result<PullSummary, SyncError> {
    let plan = plan_export(&config.translation_directory, config.format);

    let bundle_url = api
        .request_export(&config.project_id, &plan.options)
        .await?;
    info!("Created download bundle: {}", bundle_url);

    api.fetch_bundle(&bundle_url, &config.bundle_path).await?;
    info!("Downloaded bundle to {}", config.bundle_path.display());

    let files = extract_bundle_file(
        &config.bundle_path,
        &plan.download_directory,
        config.format,
    )?;
    info!(
        "Pulled {} files into {}",
        files.len(),
        plan.download_directory.display()
    );

    Ok(PullSummary {
        bundle_url,
        layout: plan.layout,
        files,
    })
}
