//! IFRS 16 Configuration Layer
//!
//! Configuration for the lease schedule engine:
//!
//! - **Fallback policy**: the `{field: fallback}` table applied to malformed
//!   contract fields in lenient mode
//! - **Normalization mode**: lenient (substitute fallbacks) or strict (fail)
//! - **Schedule settings**: current-portion window and drift tolerance
//! - **Loading**: TOML or JSON files, validated on load
//!
//! # Example
//!
//! ```rust
//! use ifrs16_config::{ContractField, EngineConfig};
//!
//! let config = EngineConfig::lenient();
//! let term = config.normalization.fallbacks.fallback(ContractField::TermMonths);
//! assert_eq!(term, Some(60.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod engine;
mod error;
mod policy;
mod schedule;

pub use engine::{ConfigFormat, EngineConfig};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use policy::{ContractField, FallbackPolicy, NormalizationConfig, NormalizationMode};
pub use schedule::ScheduleConfig;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::EngineConfig;
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::policy::{ContractField, FallbackPolicy, NormalizationConfig, NormalizationMode};
    pub use crate::schedule::ScheduleConfig;
}
