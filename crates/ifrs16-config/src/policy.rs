//! Input normalization policy.
//!
//! Contract fields arrive as free text from forms or stored versions. In
//! lenient mode a missing, unparsable or zero numeric field is replaced by
//! the value in [`FallbackPolicy`]; strict mode rejects it instead.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Validate, ValidationError};

// =============================================================================
// CONTRACT FIELDS
// =============================================================================

/// A raw contract field subject to normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractField {
    /// Lease start date
    StartDate,
    /// Term in months
    TermMonths,
    /// Grace period in months
    GraceMonths,
    /// Annual discount rate (percent)
    AnnualRate,
    /// Annual readjustment (percent)
    AnnualReadjustment,
    /// Readjustment month (1-12)
    ReadjustmentMonth,
    /// Initial installment
    InitialInstallment,
}

impl ContractField {
    /// Numeric fields, in form order.
    pub const NUMERIC: [ContractField; 6] = [
        ContractField::TermMonths,
        ContractField::GraceMonths,
        ContractField::AnnualRate,
        ContractField::AnnualReadjustment,
        ContractField::ReadjustmentMonth,
        ContractField::InitialInstallment,
    ];

    /// Storage key of the field in archived contract versions.
    pub fn key(&self) -> &'static str {
        match self {
            Self::StartDate => "data_inicio",
            Self::TermMonths => "prazo_meses",
            Self::GraceMonths => "carencia_meses",
            Self::AnnualRate => "taxa_desconto_anual",
            Self::AnnualReadjustment => "reajuste_valor",
            Self::ReadjustmentMonth => "mes_reajuste",
            Self::InitialInstallment => "parcela_inicial",
        }
    }

    /// Returns true for whole-number fields.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::TermMonths | Self::GraceMonths | Self::ReadjustmentMonth
        )
    }
}

impl fmt::Display for ContractField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// FALLBACK POLICY
// =============================================================================

/// Fallback values applied to malformed numeric fields in lenient mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackPolicy {
    /// Term used when the term is missing or zero.
    #[serde(default = "default_term_months")]
    pub term_months: u32,

    /// Grace period fallback.
    #[serde(default)]
    pub grace_months: u32,

    /// Discount rate fallback (percent).
    #[serde(default)]
    pub annual_rate_percent: f64,

    /// Readjustment fallback (percent).
    #[serde(default)]
    pub annual_readjustment_percent: f64,

    /// Readjustment month fallback.
    #[serde(default = "default_readjustment_month")]
    pub readjustment_month: u32,

    /// Initial installment fallback.
    #[serde(default)]
    pub initial_installment: f64,
}

fn default_term_months() -> u32 {
    60
}

fn default_readjustment_month() -> u32 {
    1
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            term_months: default_term_months(),
            grace_months: 0,
            annual_rate_percent: 0.0,
            annual_readjustment_percent: 0.0,
            readjustment_month: default_readjustment_month(),
            initial_installment: 0.0,
        }
    }
}

impl FallbackPolicy {
    /// Fallback for a field; `None` for fields without one (the start date).
    pub fn fallback(&self, field: ContractField) -> Option<f64> {
        match field {
            ContractField::StartDate => None,
            ContractField::TermMonths => Some(f64::from(self.term_months)),
            ContractField::GraceMonths => Some(f64::from(self.grace_months)),
            ContractField::AnnualRate => Some(self.annual_rate_percent),
            ContractField::AnnualReadjustment => Some(self.annual_readjustment_percent),
            ContractField::ReadjustmentMonth => Some(f64::from(self.readjustment_month)),
            ContractField::InitialInstallment => Some(self.initial_installment),
        }
    }

    /// The policy as a `(field, fallback)` table.
    pub fn table(&self) -> Vec<(ContractField, f64)> {
        ContractField::NUMERIC
            .iter()
            .filter_map(|field| self.fallback(*field).map(|value| (*field, value)))
            .collect()
    }
}

impl Validate for FallbackPolicy {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.term_months == 0 {
            errors.push(ValidationError::with_rule(
                "term_months",
                "Fallback term must be at least one month",
                "min_term",
            ));
        }

        if !(1..=12).contains(&self.readjustment_month) {
            errors.push(ValidationError::with_rule(
                "readjustment_month",
                format!(
                    "Fallback readjustment month {} is outside 1-12",
                    self.readjustment_month
                ),
                "valid_month",
            ));
        }

        for (field, value) in [
            ("annual_rate_percent", self.annual_rate_percent),
            ("annual_readjustment_percent", self.annual_readjustment_percent),
            ("initial_installment", self.initial_installment),
        ] {
            if !value.is_finite() {
                errors.push(ValidationError::with_rule(
                    field,
                    "Fallback must be a finite number",
                    "finite",
                ));
            }
        }

        if self.initial_installment < 0.0 {
            errors.push(ValidationError::with_rule(
                "initial_installment",
                "Fallback installment cannot be negative",
                "non_negative",
            ));
        }

        errors
    }
}

// =============================================================================
// NORMALIZATION MODE
// =============================================================================

/// How malformed contract fields are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMode {
    /// Substitute the fallback value and keep going
    #[default]
    Lenient,
    /// Fail with the offending field
    Strict,
}

impl fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => f.write_str("lenient"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

/// Normalization settings: the mode plus the fallback table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NormalizationConfig {
    /// Lenient or strict handling of malformed fields.
    #[serde(default)]
    pub mode: NormalizationMode,

    /// Fallback values used in lenient mode.
    #[serde(default)]
    pub fallbacks: FallbackPolicy,
}

impl NormalizationConfig {
    /// Lenient normalization with the standard fallbacks.
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Strict normalization.
    pub fn strict() -> Self {
        Self {
            mode: NormalizationMode::Strict,
            fallbacks: FallbackPolicy::default(),
        }
    }

    /// Returns true in strict mode.
    pub fn is_strict(&self) -> bool {
        self.mode == NormalizationMode::Strict
    }
}

impl Validate for NormalizationConfig {
    fn validate(&self) -> Vec<ValidationError> {
        self.fallbacks.validate()
    }
}
