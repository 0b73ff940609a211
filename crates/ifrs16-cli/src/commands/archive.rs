//! Archive command implementation.
//!
//! Produces the JSON payload stored for a contract version.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, ValueEnum};

use ifrs16_core::types::Periodicity;
use ifrs16_engine::ArchivedVersion;

use crate::commands::{compute, ContractArgs};
use crate::output::print_success;

/// Arguments for the archive command.
#[derive(Args, Debug)]
pub struct ArchiveArgs {
    #[command(flatten)]
    pub contract: ContractArgs,

    /// Notes stored with the version
    #[arg(long)]
    pub notes: Option<String>,

    /// Remeasurement cadence of index-linked contracts
    #[arg(long, value_enum, default_value = "annual")]
    pub periodicity: PeriodicityArg,

    /// Write the payload to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Remeasurement cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodicityArg {
    /// Once a year, in the readjustment month
    Annual,
    /// Every month
    Monthly,
}

impl From<PeriodicityArg> for Periodicity {
    fn from(arg: PeriodicityArg) -> Self {
        match arg {
            PeriodicityArg::Annual => Periodicity::Annual,
            PeriodicityArg::Monthly => Periodicity::Monthly,
        }
    }
}

/// Execute the archive command.
pub fn execute(args: ArchiveArgs, config: Option<&Path>) -> Result<()> {
    let result = compute(&args.contract, config)?;
    let version = ArchivedVersion::from_result(&result, args.notes.as_deref())
        .with_periodicity(args.periodicity.into());
    let json = version.to_json()?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            print_success(&format!("Version written to {}", path.display()));
        }
        None => println!("{json}"),
    }
    Ok(())
}
