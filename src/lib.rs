//! Keep a project's translation files in sync with Lokalise.
//!
//! - [`sync::push_keys`] creates keys that exist only locally and archives
//!   keys that no longer exist locally
//! - [`sync::push_files`] uploads local translation files
//! - [`sync::pull`] downloads an export bundle and writes normalized files

pub mod cli;
pub mod config;
pub mod format;
pub mod lokalise;
pub mod sync;
