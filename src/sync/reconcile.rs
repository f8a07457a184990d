//! Key reconciliation: create keys that only exist locally, archive keys that
//! only exist remotely.
//!
//! Keys are never deleted. Archiving only flips `is_archived`, so it can be
//! undone in Lokalise without losing translations.

use std::collections::{BTreeMap, HashSet};
use tracing::{info, warn};

use crate::config::SyncConfig;
use crate::format::{TranslationMessage, load_directory};
use crate::lokalise::{
    BulkItemError, KeyArchiveRequest, KeyCreateRequest, KeyTranslation, RemoteKey, TranslationApi,
};

use super::SyncError;

/// Mutations needed to bring the remote key set in line with local files.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPlan {
    pub to_create: Vec<KeyCreateRequest>,
    pub to_archive: Vec<KeyArchiveRequest>,
}

/// Compare local messages with remote keys on `platform`.
///
/// When a key id appears in several local messages the first one wins; later
/// duplicates are dropped with a warning.
pub fn reconcile(
    local: &[TranslationMessage],
    remote: &[RemoteKey],
    platform: &str,
    source_language: &str,
) -> KeyPlan {
    let remote_names: HashSet<&str> = remote
        .iter()
        .filter_map(|key| key.name_for(platform))
        .collect();
    let local_ids: HashSet<&str> = local.iter().map(|m| m.key_id.as_str()).collect();

    let to_create = unique_messages(local)
        .into_iter()
        .filter(|message| !remote_names.contains(message.key_id.as_str()))
        .map(|message| build_create_request(message, platform, source_language))
        .collect();

    // Keys without a name on this platform can't match anything local
    let to_archive = remote
        .iter()
        .filter(|key| {
            key.name_for(platform)
                .is_none_or(|name| !local_ids.contains(name))
        })
        .map(|key| KeyArchiveRequest::archive(key.key_id))
        .collect();

    KeyPlan {
        to_create,
        to_archive,
    }
}

fn unique_messages(local: &[TranslationMessage]) -> Vec<&TranslationMessage> {
    let mut seen = HashSet::new();
    local
        .iter()
        .filter(|message| {
            let first = seen.insert(message.key_id.as_str());
            if !first {
                warn!(
                    "Duplicate key {} in {}, keeping the first occurrence",
                    message.key_id, message.filename
                );
            }
            first
        })
        .collect()
}

fn build_create_request(
    message: &TranslationMessage,
    platform: &str,
    source_language: &str,
) -> KeyCreateRequest {
    KeyCreateRequest {
        key_name: message.key_id.clone(),
        platforms: vec![platform.to_string()],
        filenames: BTreeMap::from([(platform.to_string(), message.filename.clone())]),
        translations: vec![KeyTranslation {
            language_iso: source_language.to_string(),
            translation: message.translation.clone(),
        }],
    }
}

/// Outcome of a key push.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeySyncSummary {
    pub local_keys: usize,
    pub remote_keys: usize,
    pub created: usize,
    pub create_errors: Vec<BulkItemError>,
    pub archived: usize,
    pub archive_errors: Vec<BulkItemError>,
}

/// Create new keys and archive stale ones.
///
/// Issues at most one bulk create and one bulk archive. Items rejected by
/// Lokalise are reported in the summary; accepted items are kept even if the
/// other bulk call fails.
pub async fn push_keys<A: TranslationApi>(
    api: &A,
    config: &SyncConfig,
) -> Result<KeySyncSummary, SyncError> {
    let remote_keys = api.list_keys(&config.project_id, &config.platform).await?;
    let local_keys = load_directory(&config.source_language_directory, config.format)?;

    let plan = reconcile(
        &local_keys,
        &remote_keys,
        &config.platform,
        &config.source_language,
    );

    let mut summary = KeySyncSummary {
        local_keys: local_keys.len(),
        remote_keys: remote_keys.len(),
        ..Default::default()
    };

    if !plan.to_create.is_empty() {
        info!("Creating {} new keys in Lokalise", plan.to_create.len());
        let result = api.create_keys(&config.project_id, &plan.to_create).await?;
        info!("Created {}", result.items.len());
        log_item_errors("Create", &result.errors);
        summary.created = result.items.len();
        summary.create_errors = result.errors;
    }

    if !plan.to_archive.is_empty() {
        info!("Archiving {} keys in Lokalise", plan.to_archive.len());
        let result = api
            .archive_keys(&config.project_id, &plan.to_archive)
            .await?;
        info!("Archived {}", result.items.len());
        log_item_errors("Archive", &result.errors);
        summary.archived = result.items.len();
        summary.archive_errors = result.errors;
    }

    Ok(summary)
}

fn log_item_errors(operation: &str, errors: &[BulkItemError]) {
    if errors.is_empty() {
        return;
    }

    warn!("{} errors: {}", operation, errors.len());
    for error in errors {
        warn!("{} error: {}", operation, error.message);
    }
}
