//! Sync command implementations.
//!
//! Each command runs one pipeline and renders its summary for the terminal.

use std::path::Path;
use tabled::{Table, Tabled};

use crate::cli::utils::{apply_table_style, display_path, format_status, truncate_with_ellipsis};
use crate::config::SyncConfig;
use crate::lokalise::{BulkItemError, TranslationApi};
use crate::sync::{self, DirectoryLayout, SyncError};

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Item")]
    item: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Tabled)]
struct UploadRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Language")]
    language: String,
    #[tabled(rename = "Process")]
    process: String,
    #[tabled(rename = "Status")]
    status: String,
}

#[derive(Tabled)]
struct FileRow {
    #[tabled(rename = "File")]
    file: String,
}

/// Create missing keys and archive stale ones
pub async fn push_keys<A: TranslationApi>(api: &A, config: &SyncConfig) -> Result<String, SyncError> {
    let summary = sync::push_keys(api, config).await?;

    let mut output = String::from("✓ Keys synchronized\n\n");

    let rows = vec![
        CountRow {
            item: "Local keys",
            count: summary.local_keys,
        },
        CountRow {
            item: "Remote keys",
            count: summary.remote_keys,
        },
        CountRow {
            item: "Created",
            count: summary.created,
        },
        CountRow {
            item: "Archived",
            count: summary.archived,
        },
    ];
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    output.push_str(&table.to_string());

    push_item_errors(&mut output, "create", &summary.create_errors);
    push_item_errors(&mut output, "archive", &summary.archive_errors);

    Ok(output)
}

fn push_item_errors(output: &mut String, operation: &str, errors: &[BulkItemError]) {
    for error in errors {
        output.push_str(&format!("\n✗ Failed to {}: {}", operation, error.message));
    }
}

/// Upload local translation files
pub async fn push<A: TranslationApi>(api: &A, config: &SyncConfig) -> Result<String, SyncError> {
    let summary = sync::push_files(api, config).await?;

    let mut output = format!("✓ Pushed {} files\n", summary.uploads.len());

    if !summary.uploads.is_empty() {
        let base = upload_base(config);
        let rows: Vec<UploadRow> = summary
            .uploads
            .iter()
            .map(|upload| UploadRow {
                file: display_path(&upload.path, base),
                language: upload.lang_iso.clone(),
                process: upload.process_id.clone(),
                status: format_status(&upload.status),
            })
            .collect();
        let mut table = Table::new(rows);
        apply_table_style(&mut table);
        output.push('\n');
        output.push_str(&table.to_string());
    }

    for skipped in &summary.skipped {
        output.push_str(&format!(
            "\nℹ Skipped {}: {}",
            skipped.path.display(),
            skipped.reason
        ));
    }

    Ok(output)
}

// Common root of every pushed file: the directory up to the placeholder
fn upload_base(config: &SyncConfig) -> &Path {
    let directory = config.translation_directory.as_str();
    let root = directory
        .split_once(crate::format::LANG_ISO_PLACEHOLDER)
        .map(|(root, _)| root)
        .unwrap_or(directory);
    Path::new(root)
}

/// Download and unpack every language
pub async fn pull<A: TranslationApi>(api: &A, config: &SyncConfig) -> Result<String, SyncError> {
    let summary = sync::pull(api, config).await?;

    let layout = match summary.layout {
        DirectoryLayout::Flat => "flat",
        DirectoryLayout::Nested => "nested",
    };
    let mut output = format!(
        "✓ Pulled {} files ({} layout)\nBundle: {}\n",
        summary.files.len(),
        layout,
        truncate_with_ellipsis(&summary.bundle_url, 80)
    );

    if !summary.files.is_empty() {
        let rows: Vec<FileRow> = summary
            .files
            .iter()
            .map(|path| FileRow {
                file: path.display().to_string(),
            })
            .collect();
        let mut table = Table::new(rows);
        apply_table_style(&mut table);
        output.push('\n');
        output.push_str(&table.to_string());
    }

    Ok(output)
}
