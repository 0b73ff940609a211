//! Engine error type.
//!
//! Schedule computation itself only fails with [`Ifrs16Error`]; the wider
//! type adds the failures of the output adapters (CSV, JSON, IO) and of
//! configuration loading.

use ifrs16_config::ConfigError;
use ifrs16_core::Ifrs16Error;
use thiserror::Error;

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Unified error type for engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Domain error from the computation.
    #[error(transparent)]
    Core(#[from] Ifrs16Error),

    /// Invalid engine configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// CSV output failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_is_transparent() {
        let err: EngineError = Ifrs16Error::invalid_contract_term(0).into();
        assert_eq!(
            err.to_string(),
            Ifrs16Error::invalid_contract_term(0).to_string()
        );
    }
}
