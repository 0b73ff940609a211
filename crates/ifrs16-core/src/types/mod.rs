//! Domain types for lease accounting.
//!
//! - [`Date`]: Calendar date with month arithmetic
//! - [`Period`]: Accounting month (`MM/YYYY`)
//! - [`ContractInputs`]: Normalized lease terms
//! - [`ReadjustmentKind`]: Manual or index-linked readjustment
//! - [`Periodicity`]: Remeasurement cadence of index-linked contracts

mod contract;
mod date;
mod period;
mod readjustment;

pub use contract::{ContractInputs, MAX_TERM_MONTHS};
pub use date::Date;
pub use period::Period;
pub use readjustment::{Periodicity, ReadjustmentKind};
