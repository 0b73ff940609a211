//! Schedule computation settings.

use serde::{Deserialize, Serialize};

use crate::error::{Validate, ValidationError};

/// Tuning knobs of the amortization and classification stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Look-ahead window, in months, for the current liability portion.
    #[serde(default = "default_current_window_months")]
    pub current_window_months: u32,

    /// Relative tolerance under which a closing liability is treated as
    /// zero. Scaled by `max(1, total present value)`.
    #[serde(default = "default_drift_tolerance")]
    pub drift_tolerance: f64,
}

fn default_current_window_months() -> u32 {
    12
}

fn default_drift_tolerance() -> f64 {
    1e-9
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            current_window_months: default_current_window_months(),
            drift_tolerance: default_drift_tolerance(),
        }
    }
}

impl ScheduleConfig {
    /// Sets the current-portion window.
    pub fn with_current_window(mut self, months: u32) -> Self {
        self.current_window_months = months;
        self
    }

    /// Sets the drift tolerance.
    pub fn with_drift_tolerance(mut self, tolerance: f64) -> Self {
        self.drift_tolerance = tolerance;
        self
    }

    /// Absolute snap threshold for a schedule with the given present value.
    pub fn snap_threshold(&self, total_present_value: f64) -> f64 {
        self.drift_tolerance * total_present_value.abs().max(1.0)
    }
}

impl Validate for ScheduleConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.current_window_months == 0 {
            errors.push(ValidationError::with_rule(
                "current_window_months",
                "Current window must be at least one month",
                "min_window",
            ));
        }

        if !(0.0..=1e-3).contains(&self.drift_tolerance) {
            errors.push(ValidationError::with_rule(
                "drift_tolerance",
                "Drift tolerance must be between 0 and 1e-3",
                "valid_tolerance",
            ));
        }

        errors
    }
}
