//! Sync module - moves translations between the local tree and Lokalise.
//!
//! Three pipelines share this module:
//! - `push_keys` reconciles the key set against the source language files
//! - `push_files` uploads every local translation file
//! - `pull` downloads an export bundle and unpacks it into the tree

mod extract;
mod plan;
mod pull;
mod push;
#[cfg(test)]
mod push_test;
mod reconcile;
#[cfg(test)]
pub(crate) mod test_support;

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::format::FormatError;
use crate::lokalise::ApiError;

pub use extract::{ExtractError, extract_bundle, extract_bundle_file};
pub use plan::{DirectoryLayout, ExportPlan, plan_export};
pub use pull::{PullSummary, pull};
pub use push::{PushMode, PushSummary, SkippedFile, UploadOutcome, push_files};
pub use reconcile::{KeyPlan, KeySyncSummary, push_keys, reconcile};

/// Errors that can abort a sync operation.
#[derive(Error, Diagnostic, Debug)]
pub enum SyncError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Remote(#[from] ApiError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Extract(#[from] ExtractError),

    #[error("Failed to load local translations: {0}")]
    #[diagnostic(code(lokalise_sync::sync::load))]
    Load(#[from] FormatError),

    #[error("IO error: {0}")]
    #[diagnostic(code(lokalise_sync::sync::io))]
    Io(#[from] std::io::Error),
}
