//! # IFRS 16 Engine
//!
//! Lease schedule computation for IFRS 16 (CPC 06 R2):
//!
//! - **Normalization**: raw contract fields to typed inputs, lenient or strict
//! - **Projection**: monthly installments with annual readjustment and grace,
//!   discounted at the monthly equivalent rate
//! - **Amortization**: liability roll-forward and right-of-use depreciation
//! - **Classification**: current / non-current liability split
//! - **Aggregation**: totals and the final [`ComputationResult`]
//!
//! Views over a result: journal entries, installment steps, the archived
//! version payload, CSV export, and index-driven remeasurement.
//!
//! ## Example
//!
//! ```rust
//! use ifrs16_core::{ContractInputs, Date};
//! use ifrs16_engine::calculate;
//!
//! let inputs = ContractInputs::new(Date::from_ymd(2025, 1, 1).unwrap(), 12)
//!     .with_annual_rate(10.0)
//!     .with_initial_installment(1_000.0);
//!
//! let result = calculate(&inputs).unwrap();
//! assert!((result.totals.total_nominal - 12_000.0).abs() < 1e-9);
//! assert!((result.totals.total_present_value - 11_400.49).abs() < 0.01);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]

pub mod aggregator;
pub mod amortization;
pub mod archive;
pub mod calculator;
pub mod classifier;
pub mod error;
pub mod export;
pub mod journal;
pub mod normalize;
pub mod projector;
pub mod remeasurement;
pub mod rounding;
pub mod summary;

pub use aggregator::{ComputationResult, ScheduleTotals};
pub use amortization::AmortizationEntry;
pub use archive::ArchivedVersion;
pub use calculator::{calculate, LeaseCalculator};
pub use classifier::ClassifiedEntry;
pub use error::{EngineError, EngineResult};
pub use normalize::RawContractFields;
pub use projector::{MonthlyCashFlow, Projection};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregator::{ComputationResult, ScheduleTotals};
    pub use crate::amortization::AmortizationEntry;
    pub use crate::archive::ArchivedVersion;
    pub use crate::calculator::{calculate, LeaseCalculator};
    pub use crate::classifier::ClassifiedEntry;
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::journal::{initial_recognition, journal_for_period, monthly_journal};
    pub use crate::normalize::{normalize, RawContractFields};
    pub use crate::projector::{MonthlyCashFlow, Projection};
    pub use crate::summary::{installment_steps, Headline};

    pub use ifrs16_config::EngineConfig;
    pub use ifrs16_core::prelude::*;
}
