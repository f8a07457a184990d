//! Export planning.
//!
//! A "flat" export has one file per language at the root of the bundle, named
//! after the language code:
//!
//! ```text
//! export.zip
//!   en.json
//!   es.json
//! ```
//!
//! A "nested" export keeps the original filenames inside one directory per
//! language:
//!
//! ```text
//! export.zip
//!   en/
//!     common.json
//!     lib.json
//!   es/
//!     common.json
//!     lib.json
//! ```

use std::path::PathBuf;

use crate::format::{FileFormat, LANG_ISO_PLACEHOLDER};
use crate::lokalise::ExportOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryLayout {
    Flat,
    Nested,
}

/// Everything a pull needs to request and unpack one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    pub layout: DirectoryLayout,
    /// Directory the bundle entries are written under
    pub download_directory: PathBuf,
    pub options: ExportOptions,
}

/// Plan the export for a configured translation directory.
///
/// The directory selects the layout: with `%LANG_ISO%` it is nested, split
/// into the download root and the per-language suffix; without it, flat.
pub fn plan_export(directory: &str, format: FileFormat) -> ExportPlan {
    match directory.split_once(LANG_ISO_PLACEHOLDER) {
        Some((root, suffix)) => {
            let options = ExportOptions {
                original_filenames: true,
                directory_prefix: Some(format!("{}{}", LANG_ISO_PLACEHOLDER, suffix)),
                include_comments: Some(true),
                include_description: Some(true),
                ..base_options(format)
            };
            let root = if root.is_empty() { "." } else { root };

            ExportPlan {
                layout: DirectoryLayout::Nested,
                download_directory: PathBuf::from(root),
                options,
            }
        }
        None => {
            let options = ExportOptions {
                original_filenames: false,
                bundle_structure: Some(format!(
                    "{}.{}",
                    LANG_ISO_PLACEHOLDER,
                    format.extension()
                )),
                ..base_options(format)
            };

            ExportPlan {
                layout: DirectoryLayout::Flat,
                download_directory: PathBuf::from(directory),
                options,
            }
        }
    }
}

fn base_options(format: FileFormat) -> ExportOptions {
    ExportOptions {
        format: format.as_str().to_string(),
        original_filenames: false,
        directory_prefix: None,
        bundle_structure: None,
        include_comments: None,
        include_description: None,
        add_newline_eof: true,
        export_empty_as: "empty".to_string(),
        json_unescaped_slashes: true,
        replace_breaks: format.replace_breaks(),
        placeholder_format: format.placeholder_format().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_plan_for_po() {
        let plan = plan_export("./po-prefix/%LANG_ISO%/suffix", FileFormat::Po);

        assert_eq!(plan.layout, DirectoryLayout::Nested);
        assert_eq!(plan.download_directory, PathBuf::from("./po-prefix/"));
        assert_eq!(
            serde_json::to_value(&plan.options).unwrap(),
            json!({
                "format": "po",
                "original_filenames": true,
                "export_empty_as": "empty",
                "directory_prefix": "%LANG_ISO%/suffix",
                "add_newline_eof": true,
                "replace_breaks": true,
                "include_comments": true,
                "include_description": true,
                "placeholder_format": "printf",
                "json_unescaped_slashes": true
            })
        );
    }

    #[test]
    fn test_nested_plan_with_empty_suffix() {
        let plan = plan_export("./locales/%LANG_ISO%", FileFormat::JsonStructured);

        assert_eq!(plan.layout, DirectoryLayout::Nested);
        assert_eq!(plan.download_directory, PathBuf::from("./locales/"));
        assert_eq!(plan.options.directory_prefix.as_deref(), Some("%LANG_ISO%"));
        assert_eq!(plan.options.format, "json_structured");
        assert_eq!(plan.options.placeholder_format, "icu");
        assert!(!plan.options.replace_breaks);
    }

    #[test]
    fn test_nested_plan_at_project_root() {
        let plan = plan_export("%LANG_ISO%/LC_MESSAGES", FileFormat::Po);

        assert_eq!(plan.download_directory, PathBuf::from("."));
        assert_eq!(
            plan.options.directory_prefix.as_deref(),
            Some("%LANG_ISO%/LC_MESSAGES")
        );
    }

    #[test]
    fn test_flat_plan_for_json() {
        let plan = plan_export("./flat-json-directory", FileFormat::Json);

        assert_eq!(plan.layout, DirectoryLayout::Flat);
        assert_eq!(
            plan.download_directory,
            PathBuf::from("./flat-json-directory")
        );
        assert_eq!(
            serde_json::to_value(&plan.options).unwrap(),
            json!({
                "format": "json",
                "original_filenames": false,
                "bundle_structure": "%LANG_ISO%.json",
                "add_newline_eof": true,
                "export_empty_as": "empty",
                "json_unescaped_slashes": true,
                "replace_breaks": false,
                "placeholder_format": "icu"
            })
        );
    }

    #[test]
    fn test_flat_plan_names_files_with_format_extension() {
        let plan = plan_export("./locales", FileFormat::Po);

        assert_eq!(
            plan.options.bundle_structure.as_deref(),
            Some("%LANG_ISO%.po")
        );
        assert!(plan.options.directory_prefix.is_none());
    }
}
