//! # IFRS 16 Core
//!
//! Core types and error definitions for the IFRS 16 lease schedule engine.
//!
//! - **Types**: `Date`, `Period`, `ContractInputs`, readjustment kinds
//! - **Errors**: a single [`Ifrs16Error`] shared by every stage of the
//!   computation
//!
//! ## Example
//!
//! ```rust
//! use ifrs16_core::prelude::*;
//!
//! let inputs = ContractInputs::new(Date::from_ymd(2025, 1, 1).unwrap(), 12)
//!     .with_annual_rate(10.0)
//!     .with_initial_installment(1_000.0);
//! assert!(inputs.validate().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{Ifrs16Error, Ifrs16Result};
    pub use crate::types::{ContractInputs, Date, Period, Periodicity, ReadjustmentKind};
}

// Re-export commonly used types at crate root
pub use error::{Ifrs16Error, Ifrs16Result};
pub use types::{ContractInputs, Date, Period};
