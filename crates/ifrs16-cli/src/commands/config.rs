//! Config command implementation.
//!
//! Shows the effective engine configuration and validates config files.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use ifrs16_config::{ConfigError, EngineConfig};

use crate::cli::OutputFormat;
use crate::commands::load_config;
use crate::output::{print_header, print_json, print_output, print_success, print_table, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Arguments for validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration file (TOML or JSON)
    pub path: PathBuf,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(&load_config(config)?, format),
        ConfigCommand::Validate(args) => validate(&args.path),
    }
}

fn show(config: &EngineConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(config),
        OutputFormat::Csv => print_output(&rows(config), format),
        OutputFormat::Table => {
            print_header("Engine configuration");
            print_table(&rows(config))?;
            print_header("TOML");
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn rows(config: &EngineConfig) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::new("normalization.mode", config.normalization.mode.to_string()),
        KeyValue::new(
            "schedule.current_window_months",
            config.schedule.current_window_months.to_string(),
        ),
        KeyValue::new(
            "schedule.drift_tolerance",
            config.schedule.drift_tolerance.to_string(),
        ),
    ];
    rows.extend(
        config
            .normalization
            .fallbacks
            .table()
            .into_iter()
            .map(|(field, value)| KeyValue::new(format!("fallback.{field}"), value.to_string())),
    );
    rows
}

fn validate(path: &Path) -> Result<()> {
    match EngineConfig::load(path) {
        Ok(_) => {
            print_success(&format!("{} is valid", path.display()));
            Ok(())
        }
        Err(err @ (ConfigError::Validation { .. } | ConfigError::MultipleValidationErrors(_))) => {
            Err(anyhow::anyhow!("{} is invalid: {err}", path.display()))
        }
        Err(err) => Err(err.into()),
    }
}
