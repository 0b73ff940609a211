//! Error types for the IFRS 16 engine.
//!
//! Every failure is local to a single computation: a failed call yields no
//! result, and there is no partial-result or retry semantics.

use thiserror::Error;

/// A specialized Result type for IFRS 16 operations.
pub type Ifrs16Result<T> = Result<T, Ifrs16Error>;

/// The main error type for IFRS 16 operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Ifrs16Error {
    /// Contract term below one month or above
    /// [`MAX_TERM_MONTHS`](crate::types::MAX_TERM_MONTHS). Rejected before
    /// any arithmetic or allocation happens.
    #[error("Invalid contract term: {term_months} months (must be between 1 and 1200)")]
    InvalidContractTerm {
        /// The rejected term in months.
        term_months: i64,
    },

    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Malformed contract field (strict normalization only).
    #[error("Invalid value for '{field}': {value:?}")]
    InvalidInput {
        /// Name of the offending field.
        field: String,
        /// The raw value as received.
        value: String,
    },

    /// Readjustment month outside 1..=12.
    #[error("Invalid readjustment month: {month} (must be 1-12)")]
    InvalidReadjustmentMonth {
        /// The rejected month.
        month: u32,
    },

    /// Accounting period that cannot be parsed or represented.
    #[error("Invalid period: {value}")]
    InvalidPeriod {
        /// The raw period text.
        value: String,
    },

    /// Unknown readjustment kind.
    #[error("Unknown readjustment kind: {value}")]
    UnknownReadjustmentKind {
        /// The raw kind text.
        value: String,
    },

    /// Mathematical error (non-finite results).
    #[error("Mathematical error: {reason}")]
    MathError {
        /// Description of the error.
        reason: String,
    },
}

impl Ifrs16Error {
    /// Creates an invalid contract term error.
    #[must_use]
    pub fn invalid_contract_term(term_months: i64) -> Self {
        Self::InvalidContractTerm { term_months }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an invalid period error.
    #[must_use]
    pub fn invalid_period(value: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            value: value.into(),
        }
    }

    /// Creates a math error.
    #[must_use]
    pub fn math_error(reason: impl Into<String>) -> Self {
        Self::MathError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Ifrs16Error::invalid_date("2025-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_contract_term_error() {
        let err = Ifrs16Error::invalid_contract_term(0);
        assert!(err.to_string().contains("0 months"));
    }

    #[test]
    fn test_invalid_input_quotes_value() {
        let err = Ifrs16Error::invalid_input("prazo_meses", "abc");
        assert_eq!(err.to_string(), "Invalid value for 'prazo_meses': \"abc\"");
    }
}
