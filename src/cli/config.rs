//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, ThemeMode};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Inventory data directory to use when `--data-dir` is not given
    #[arg(long, value_name = "DIR")]
    storage_dir: Option<PathBuf>,

    /// Pixabay API key (empty string clears it)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Image search endpoint
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Image search timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    storage: StorageOutput,
    pixabay: PixabayOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct StorageOutput {
    data_dir: String,
}

#[derive(Serialize, Debug)]
struct PixabayOutput {
    api_key_set: bool,
    base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let output = build_output(&config)?;

        if self.json {
            print_json(&output)
        } else {
            output_human_readable(&output);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.storage_dir.is_none()
            && self.api_key.is_none()
            && self.base_url.is_none()
            && self.timeout.is_none()
            && self.theme.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --storage-dir, --api-key, --base-url, --timeout, or --theme",
            ));
        }

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(dir) = &self.storage_dir {
            config.storage.data_dir = Some(dir.clone());
        }

        if let Some(key) = &self.api_key {
            config.pixabay.api_key = Some(key.trim().to_string()).filter(|k| !k.is_empty());
        }

        if let Some(url) = &self.base_url {
            config.pixabay.base_url.clone_from(url);
        }

        if let Some(secs) = self.timeout {
            config.pixabay.timeout_secs = Some(secs);
        }

        if let Some(theme) = &self.theme {
            config.ui.theme_mode = ThemeMode::parse(theme).ok_or_else(|| {
                CliError::validation("Invalid theme mode. Must be 'auto', 'light', or 'dark'")
            })?;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(e.to_string()))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn build_output(config: &Config) -> CliResult<ConfigOutput> {
    let config_file = Config::config_file_path()
        .map_err(|e| CliError::io(format!("Failed to resolve config file: {e:#}")))?;
    let data_dir = config
        .data_dir()
        .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e:#}")))?;

    Ok(ConfigOutput {
        config_file: config_file.to_string_lossy().to_string(),
        storage: StorageOutput {
            data_dir: data_dir.to_string_lossy().to_string(),
        },
        pixabay: PixabayOutput {
            api_key_set: config.pixabay.resolved_api_key().is_some(),
            base_url: config.pixabay.base_url.clone(),
            timeout_secs: config.pixabay.timeout_secs,
        },
        ui: UiOutput {
            theme: config.ui.theme_mode.as_str().to_string(),
        },
    })
}

/// Output configuration in human-readable format
fn output_human_readable(output: &ConfigOutput) {
    println!("Fridgify Configuration");
    println!("======================");
    println!();
    println!("Config file: {}", output.config_file);
    println!();

    println!("Storage:");
    println!("  Data Directory: {}", output.storage.data_dir);
    println!();

    println!("Image Search:");
    println!(
        "  API Key: {}",
        if output.pixabay.api_key_set {
            "(set)"
        } else {
            "(not configured)"
        }
    );
    println!("  Base URL: {}", output.pixabay.base_url);
    match output.pixabay.timeout_secs {
        Some(secs) => println!("  Timeout: {secs}s"),
        None => println!("  Timeout: (none)"),
    }
    println!();

    println!("UI:");
    println!("  Theme Mode: {}", output.ui.theme);
    println!();
}
