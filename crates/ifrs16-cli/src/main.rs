//! IFRS 16 CLI - lease schedules from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Headline figures of a contract
//! ifrs16 schedule --start 2025-01-01 --term 36 --rate 12 --installment 2500
//!
//! # Amortization table as CSV
//! ifrs16 schedule --contract lease.toml --view amortization --format csv
//!
//! # Journal entries of one month
//! ifrs16 journal --contract lease.toml --period 06/2025
//!
//! # Archive payload for the contract registry
//! ifrs16 archive --contract lease.toml --notes "signed copy"
//!
//! # Engine configuration
//! ifrs16 config show
//! ifrs16 config validate engine.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ifrs16_engine=debug,ifrs16_cli=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ifrs16_engine=warn,ifrs16_cli=info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Schedule(args) => commands::schedule::execute(args, config, format)?,
        Commands::Journal(args) => commands::journal::execute(args, config, format)?,
        Commands::Archive(args) => commands::archive::execute(args, config)?,
        Commands::Config(args) => commands::config::execute(args, config, format)?,
    }

    Ok(())
}
