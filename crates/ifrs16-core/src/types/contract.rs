//! Typed lease contract terms.

use serde::{Deserialize, Serialize};

use super::{Date, ReadjustmentKind};
use crate::error::{Ifrs16Error, Ifrs16Result};

/// Lease contract terms, already normalized.
///
/// Rates are expressed in percent (`10.0` means 10% a year).
///
/// # Example
///
/// ```rust
/// use ifrs16_core::types::{ContractInputs, Date};
///
/// let inputs = ContractInputs::new(Date::from_ymd(2025, 1, 1).unwrap(), 36)
///     .with_annual_rate(12.0)
///     .with_initial_installment(2_500.0)
///     .with_readjustment(4.5, 7);
///
/// assert!(inputs.validate().is_ok());
/// assert_eq!(inputs.readjustment_month, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractInputs {
    /// First day of the lease.
    pub start_date: Date,
    /// Lease term in months.
    pub term_months: u32,
    /// Leading months with no installment due.
    #[serde(default)]
    pub grace_months: u32,
    /// Annual effective discount rate, percent.
    #[serde(default)]
    pub annual_rate_percent: f64,
    /// Annual installment readjustment, percent.
    #[serde(default)]
    pub annual_readjustment_percent: f64,
    /// Calendar month (1-12) in which the readjustment takes effect.
    #[serde(default = "default_readjustment_month")]
    pub readjustment_month: u32,
    /// Installment before any readjustment.
    #[serde(default)]
    pub initial_installment: f64,
    /// Source of the readjustment rate.
    #[serde(default)]
    pub readjustment_kind: ReadjustmentKind,
}

/// Longest supported lease term, in months (100 years).
pub const MAX_TERM_MONTHS: u32 = 1_200;

fn default_readjustment_month() -> u32 {
    1
}

impl ContractInputs {
    /// Creates contract terms with zero rates, no grace and no installment.
    #[must_use]
    pub fn new(start_date: Date, term_months: u32) -> Self {
        Self {
            start_date,
            term_months,
            grace_months: 0,
            annual_rate_percent: 0.0,
            annual_readjustment_percent: 0.0,
            readjustment_month: default_readjustment_month(),
            initial_installment: 0.0,
            readjustment_kind: ReadjustmentKind::Manual,
        }
    }

    /// Sets the grace period in months.
    #[must_use]
    pub fn with_grace_months(mut self, months: u32) -> Self {
        self.grace_months = months;
        self
    }

    /// Sets the annual discount rate (percent).
    #[must_use]
    pub fn with_annual_rate(mut self, percent: f64) -> Self {
        self.annual_rate_percent = percent;
        self
    }

    /// Sets the annual readjustment (percent) and the month it applies.
    #[must_use]
    pub fn with_readjustment(mut self, percent: f64, month: u32) -> Self {
        self.annual_readjustment_percent = percent;
        self.readjustment_month = month;
        self
    }

    /// Sets the readjustment kind.
    #[must_use]
    pub fn with_readjustment_kind(mut self, kind: ReadjustmentKind) -> Self {
        self.readjustment_kind = kind;
        self
    }

    /// Sets the initial installment.
    #[must_use]
    pub fn with_initial_installment(mut self, amount: f64) -> Self {
        self.initial_installment = amount;
        self
    }

    /// Checks the preconditions of the schedule computation.
    ///
    /// # Errors
    ///
    /// - `InvalidContractTerm` when the term is zero or above
    ///   [`MAX_TERM_MONTHS`]
    /// - `InvalidReadjustmentMonth` when the month is outside 1..=12
    /// - `MathError` when a numeric field is not finite
    pub fn validate(&self) -> Ifrs16Result<()> {
        if !(1..=MAX_TERM_MONTHS).contains(&self.term_months) {
            return Err(Ifrs16Error::invalid_contract_term(i64::from(self.term_months)));
        }
        if !(1..=12).contains(&self.readjustment_month) {
            return Err(Ifrs16Error::InvalidReadjustmentMonth {
                month: self.readjustment_month,
            });
        }
        for (name, value) in [
            ("annual_rate_percent", self.annual_rate_percent),
            ("annual_readjustment_percent", self.annual_readjustment_percent),
            ("initial_installment", self.initial_installment),
        ] {
            if !value.is_finite() {
                return Err(Ifrs16Error::math_error(format!("{name} is not finite")));
            }
        }
        Ok(())
    }

    /// Date of the last month of the lease.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDate` if the end falls outside the supported range.
    pub fn end_date(&self) -> Ifrs16Result<Date> {
        let offset = i32::try_from(self.term_months.saturating_sub(1))
            .map_err(|_| Ifrs16Error::invalid_contract_term(i64::from(self.term_months)))?;
        self.start_date.add_months(offset)
    }
}
