//! Calculation entry points.
//!
//! The pipeline is strictly sequential: normalize, project, amortize,
//! classify, aggregate. Nothing is cached between calls; each call returns
//! a fresh [`ComputationResult`].

use tracing::{debug, info};

use ifrs16_config::{ConfigResult, EngineConfig, Validate};
use ifrs16_core::{ContractInputs, Ifrs16Result};

use crate::aggregator::{aggregate, ComputationResult};
use crate::amortization::amortize;
use crate::classifier::classify;
use crate::normalize::{normalize, RawContractFields};
use crate::projector::project;

/// Lease schedule calculator bound to an engine configuration.
///
/// # Example
///
/// ```rust
/// use ifrs16_config::EngineConfig;
/// use ifrs16_core::{ContractInputs, Date};
/// use ifrs16_engine::LeaseCalculator;
///
/// let calculator = LeaseCalculator::new(EngineConfig::default()).unwrap();
/// let inputs = ContractInputs::new(Date::from_ymd(2025, 1, 1).unwrap(), 12)
///     .with_annual_rate(10.0)
///     .with_initial_installment(1_000.0);
///
/// let result = calculator.calculate(&inputs).unwrap();
/// assert_eq!(result.schedule.len(), 13);
/// assert!(result.final_liability().abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LeaseCalculator {
    config: EngineConfig,
}

impl LeaseCalculator {
    /// Creates a calculator after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of `config`.
    pub fn new(config: EngineConfig) -> ConfigResult<Self> {
        config.validate_or_error()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Computes the full schedule for normalized inputs.
    ///
    /// # Errors
    ///
    /// - `InvalidContractTerm` if the term is zero
    /// - `InvalidReadjustmentMonth` if the month is outside 1..=12
    /// - `MathError` for non-finite rates
    pub fn calculate(&self, inputs: &ContractInputs) -> Ifrs16Result<ComputationResult> {
        let projection = project(inputs)?;
        let entries = amortize(&projection, inputs.start_date, &self.config.schedule)?;
        let schedule = classify(
            &entries,
            inputs.term_months,
            self.config.schedule.current_window_months,
        );
        debug!(rows = schedule.len(), "classified liability");

        let result = aggregate(inputs.clone(), projection, schedule);
        info!(
            start = %inputs.start_date,
            term = inputs.term_months,
            total_present_value = result.totals.total_present_value,
            "lease schedule computed"
        );
        Ok(result)
    }

    /// Normalizes raw contract fields, then computes the schedule.
    ///
    /// # Errors
    ///
    /// Normalization errors (`InvalidDate`, `InvalidInput`, ...) followed
    /// by those of [`calculate`](Self::calculate).
    pub fn calculate_raw(&self, raw: &RawContractFields) -> Ifrs16Result<ComputationResult> {
        let inputs = normalize(raw, &self.config.normalization)?;
        self.calculate(&inputs)
    }
}

/// Computes the schedule with the default configuration.
///
/// # Errors
///
/// See [`LeaseCalculator::calculate`].
pub fn calculate(inputs: &ContractInputs) -> Ifrs16Result<ComputationResult> {
    LeaseCalculator::default().calculate(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ifrs16_config::{ContractField, ScheduleConfig};
    use ifrs16_core::{Date, Ifrs16Error};

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EngineConfig::default();
        config.schedule = ScheduleConfig::default().with_current_window(0);
        assert!(LeaseCalculator::new(config).is_err());
    }

    #[test]
    fn test_calculate_raw_lenient() {
        let raw = RawContractFields::new("2025-01-01")
            .with(ContractField::TermMonths, "12")
            .with(ContractField::AnnualRate, "10")
            .with(ContractField::InitialInstallment, "1000");
        let result = LeaseCalculator::default().calculate_raw(&raw).unwrap();
        assert_eq!(result.term_months(), 12);
        assert_relative_eq!(result.totals.total_nominal, 12_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_calculate_raw_oversized_term() {
        let raw = RawContractFields::new("2025-01-01")
            .with(ContractField::TermMonths, "4000000000")
            .with(ContractField::InitialInstallment, "1");
        assert_eq!(
            LeaseCalculator::default().calculate_raw(&raw).unwrap_err(),
            Ifrs16Error::invalid_contract_term(4_000_000_000)
        );
    }

    #[test]
    fn test_calculate_raw_strict_zero_term() {
        let raw = RawContractFields::new("2025-01-01")
            .with(ContractField::TermMonths, "0")
            .with(ContractField::GraceMonths, "0")
            .with(ContractField::AnnualRate, "10")
            .with(ContractField::AnnualReadjustment, "0")
            .with(ContractField::ReadjustmentMonth, "1")
            .with(ContractField::InitialInstallment, "1000");
        let calculator = LeaseCalculator::new(EngineConfig::strict()).unwrap();
        assert_eq!(
            calculator.calculate_raw(&raw).unwrap_err(),
            Ifrs16Error::invalid_contract_term(0)
        );
    }

    #[test]
    fn test_calls_are_independent() {
        let a = ContractInputs::new(Date::from_ymd(2025, 1, 1).unwrap(), 6)
            .with_initial_installment(100.0);
        let b = a.clone().with_initial_installment(200.0);
        let first = calculate(&a).unwrap();
        let _ = calculate(&b).unwrap();
        assert_eq!(calculate(&a).unwrap(), first);
    }
}
