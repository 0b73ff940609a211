//! CLI command implementations.

pub mod archive;
pub mod config;
pub mod journal;
pub mod schedule;

pub use archive::ArchiveArgs;
pub use config::ConfigArgs;
pub use journal::JournalArgs;
pub use schedule::ScheduleArgs;

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, warn};

use ifrs16_config::{ConfigFormat, ContractField, EngineConfig};
use ifrs16_engine::normalize::normalize_with_report;
use ifrs16_engine::{ComputationResult, LeaseCalculator, RawContractFields};

use crate::error::{CliError, CliResult};
use crate::output::print_warning;

/// Contract terms, from a file and/or flags. Flags override file values.
///
/// Values are passed through as text and normalized by the engine, so the
/// configured fallback policy applies to malformed flags too.
#[derive(Args, Debug, Default)]
pub struct ContractArgs {
    /// Contract file (TOML or JSON); accepts the archived field names
    #[arg(long, value_name = "FILE")]
    pub contract: Option<PathBuf>,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Term in months
    #[arg(long)]
    pub term: Option<String>,

    /// Grace period in months
    #[arg(long)]
    pub grace: Option<String>,

    /// Annual discount rate (percent)
    #[arg(long)]
    pub rate: Option<String>,

    /// Annual readjustment (percent)
    #[arg(long)]
    pub readjustment: Option<String>,

    /// Month in which the readjustment applies (1-12)
    #[arg(long)]
    pub readjustment_month: Option<String>,

    /// Initial installment
    #[arg(long)]
    pub installment: Option<String>,

    /// Readjustment kind (manual, igpm, ipca, selic, cdi, inpc, tr)
    #[arg(long)]
    pub kind: Option<String>,
}

impl ContractArgs {
    /// Merges the contract file with the flags.
    pub fn raw_fields(&self) -> CliResult<RawContractFields> {
        let mut raw = match &self.contract {
            Some(path) => load_contract_file(path)?,
            None => RawContractFields::default(),
        };

        if let Some(start) = &self.start {
            raw.start_date.clone_from(start);
        }
        for (field, value) in [
            (ContractField::TermMonths, &self.term),
            (ContractField::GraceMonths, &self.grace),
            (ContractField::AnnualRate, &self.rate),
            (ContractField::AnnualReadjustment, &self.readjustment),
            (ContractField::ReadjustmentMonth, &self.readjustment_month),
            (ContractField::InitialInstallment, &self.installment),
        ] {
            if let Some(value) = value {
                raw = raw.with(field, value.clone());
            }
        }
        if self.kind.is_some() {
            raw.readjustment_kind.clone_from(&self.kind);
        }

        if raw.start_date.trim().is_empty() {
            return Err(CliError::MissingArgument(
                "--start (or data_inicio / start_date in --contract)".to_string(),
            ));
        }
        Ok(raw)
    }
}

/// Reads raw contract fields from a TOML or JSON file.
fn load_contract_file(path: &Path) -> CliResult<RawContractFields> {
    let format = ConfigFormat::from_path(path)
        .map_err(|_| CliError::UnsupportedContractFile(path.to_path_buf()))?;
    let contents = std::fs::read_to_string(path)?;
    let invalid = |message: String| CliError::InvalidContractFile {
        path: path.to_path_buf(),
        message,
    };
    match format {
        ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| invalid(e.to_string())),
        ConfigFormat::Json => serde_json::from_str(&contents).map_err(|e| invalid(e.to_string())),
    }
}

/// Loads the engine configuration, or the default when no file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading engine configuration");
            Ok(EngineConfig::load(path)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Normalizes the contract and computes its schedule, reporting fallbacks.
pub fn compute(contract: &ContractArgs, config: Option<&Path>) -> anyhow::Result<ComputationResult> {
    let engine_config = load_config(config)?;
    let raw = contract.raw_fields()?;

    let normalized = normalize_with_report(&raw, &engine_config.normalization)?;
    for fallback in &normalized.fallbacks {
        let shown = fallback.raw.as_deref().unwrap_or("<missing>");
        warn!(field = %fallback.field, raw = shown, "fallback applied");
        print_warning(&format!(
            "{}: '{}' replaced by {}",
            fallback.field, shown, fallback.fallback
        ));
    }

    let calculator = LeaseCalculator::new(engine_config)?;
    Ok(calculator.calculate(&normalized.inputs)?)
}
