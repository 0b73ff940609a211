//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Contract file with an unknown extension.
    #[error("Unsupported contract file: {0}. Use .toml or .json.")]
    UnsupportedContractFile(PathBuf),

    /// Contract file could not be parsed.
    #[error("Invalid contract file {path}: {message}")]
    InvalidContractFile {
        /// File path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Portfolio file could not be parsed.
    #[error("Invalid portfolio file {path}: {message}")]
    InvalidPortfolioFile {
        /// File path
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
