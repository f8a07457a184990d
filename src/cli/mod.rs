mod commands;
mod utils;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigError, DEFAULT_PLATFORM, SyncConfig, parse_language_mapping};
use crate::format::{DEFAULT_SOURCE_LANGUAGE, FileFormat};
use crate::lokalise::LokaliseClient;
use crate::sync::SyncError;

#[derive(Parser, Debug)]
#[command(name = "lokalise-sync")]
#[command(author, version, about = "Sync translation files with Lokalise", long_about = None)]
pub struct Cli {
    /// Lokalise API token
    #[arg(long, global = true, env = "LOKALISE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Lokalise project ID
    #[arg(long, global = true, env = "LOKALISE_PROJECT_ID")]
    pub project_id: Option<String>,

    /// Override the API URL (default: LOKALISE_API_URL env or https://api.lokalise.com/api2)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// File format: po, json or json_structured
    #[arg(long, global = true, env = "LOKALISE_FORMAT", default_value = "json")]
    pub format: String,

    /// Platform whose key names are reconciled
    #[arg(long, global = true, env = "LOKALISE_PLATFORM", default_value = DEFAULT_PLATFORM)]
    pub platform: String,

    /// Language of the source files
    #[arg(long, global = true, env = "LOKALISE_SOURCE_LANGUAGE", default_value = DEFAULT_SOURCE_LANGUAGE)]
    pub source_language: String,

    /// Directory holding the source language files
    #[arg(
        long,
        global = true,
        env = "LOKALISE_SOURCE_LANGUAGE_DIRECTORY",
        default_value = "."
    )]
    pub source_language_directory: String,

    /// Translation directory, e.g. ./locales/%LANG_ISO%/LC_MESSAGES
    #[arg(long, global = true, env = "LOKALISE_TRANSLATION_DIRECTORY")]
    pub translation_directory: Option<String>,

    /// JSON object mapping Lokalise language codes to local directory codes
    #[arg(long, global = true, env = "LOKALISE_LANGUAGE_ISO_CODE_MAPPING")]
    pub language_iso_code_mapping: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload local translation files
    Push {
        /// Overwrite translations that were edited in Lokalise
        #[arg(long, env = "LOKALISE_REPLACE_MODIFIED")]
        replace_modified: bool,
    },
    /// Create new keys and archive keys removed locally
    PushKeys,
    /// Download translations into the translation directory
    Pull,
}

impl Cli {
    /// Build a validated configuration from the parsed arguments.
    pub fn sync_config(&self) -> Result<SyncConfig, ConfigError> {
        let project_id = non_empty(self.project_id.as_deref())
            .ok_or(ConfigError::MissingValue { name: "project-id" })?;
        let translation_directory = non_empty(self.translation_directory.as_deref()).ok_or(
            ConfigError::MissingValue {
                name: "translation-directory",
            },
        )?;
        let format: FileFormat = self.format.parse()?;
        let mapping = parse_language_mapping(
            self.language_iso_code_mapping.as_deref().unwrap_or_default(),
        )?;
        let replace_modified = matches!(
            self.command,
            Commands::Push {
                replace_modified: true
            }
        );

        Ok(SyncConfig::new(project_id, format, translation_directory)?
            .with_platform(&self.platform)
            .with_source_language(&self.source_language)
            .with_source_language_directory(&self.source_language_directory)
            .with_language_mapping(mapping)
            .with_replace_modified(replace_modified))
    }

    fn api_token(&self) -> Result<&str, ConfigError> {
        non_empty(self.api_token.as_deref()).ok_or(ConfigError::MissingValue { name: "api-token" })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Initialize tracing subscriber with env filter
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lokalise_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> Result<(), SyncError> {
    let cli = Cli::parse();
    init_tracing();

    let config = cli.sync_config()?;

    // reqwest is built without a default TLS provider
    let _ = rustls::crypto::ring::default_provider().install_default();
    let client = LokaliseClient::new(cli.api_token()?, cli.api_url.clone());

    let output = match cli.command {
        Commands::Push { .. } => commands::sync::push(&client, &config).await?,
        Commands::PushKeys => commands::sync::push_keys(&client, &config).await?,
        Commands::Pull => commands::sync::pull(&client, &config).await?,
    };
    println!("{}", output);

    Ok(())
}
