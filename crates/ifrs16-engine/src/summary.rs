//! Headline figures and installment evolution.

use serde::{Deserialize, Serialize};

use crate::aggregator::ComputationResult;

/// Minimum change between reported installment steps.
pub const STEP_THRESHOLD: f64 = 0.01;

/// A month where the installment changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentStep {
    /// Month number (1-based).
    pub month: u32,
    /// `MM/YYYY` label.
    pub label: String,
    /// Installment from this month on.
    pub installment: f64,
}

/// Every month where a non-zero installment departs from the last reported
/// step by more than [`STEP_THRESHOLD`].
pub fn installment_steps(result: &ComputationResult) -> Vec<InstallmentStep> {
    let mut steps = Vec::new();
    let mut last = 0.0;
    for flow in &result.cash_flow {
        if flow.installment > 0.0 && (flow.installment - last).abs() > STEP_THRESHOLD {
            steps.push(InstallmentStep {
                month: flow.month,
                label: flow.label.clone(),
                installment: flow.installment,
            });
            last = flow.installment;
        }
    }
    steps
}

/// Headline figures shown for a computed contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    /// Initial lease liability.
    pub lease_liability: f64,
    /// Initial right-of-use asset.
    pub right_of_use_asset: f64,
    /// Sum of nominal installments.
    pub total_nominal: f64,
    /// Present-value adjustment.
    pub avp: f64,
    /// Current liability at recognition.
    pub current_liability: f64,
    /// Non-current liability at recognition.
    pub non_current_liability: f64,
    /// Monthly effective discount rate, percent.
    pub monthly_rate_percent: f64,
}

impl Headline {
    /// Extracts the headline figures of a result.
    pub fn from_result(result: &ComputationResult) -> Self {
        let (current, non_current) = result
            .recognition()
            .map_or((0.0, 0.0), |row| (row.current_portion, row.non_current_portion));
        Self {
            lease_liability: result.totals.total_present_value,
            right_of_use_asset: result.totals.total_present_value,
            total_nominal: result.totals.total_nominal,
            avp: result.totals.avp,
            current_liability: current,
            non_current_liability: non_current,
            monthly_rate_percent: result.monthly_rate * 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate;
    use approx::assert_relative_eq;
    use ifrs16_core::{ContractInputs, Date};

    #[test]
    fn test_steps_follow_readjustments() {
        let inputs = ContractInputs::new(Date::from_ymd(2025, 6, 1).unwrap(), 25)
            .with_grace_months(2)
            .with_readjustment(5.0, 1)
            .with_initial_installment(1_000.0);
        let result = calculate(&inputs).unwrap();
        let steps = installment_steps(&result);

        let months: Vec<u32> = steps.iter().map(|s| s.month).collect();
        assert_eq!(months, vec![3, 8, 20]);
        assert_eq!(steps[0].label, "08/2025");
        assert_relative_eq!(steps[1].installment, 1_050.0, epsilon = 1e-9);
        assert_relative_eq!(steps[2].installment, 1_102.5, epsilon = 1e-9);
    }

    #[test]
    fn test_flat_contract_has_one_step() {
        let inputs = ContractInputs::new(Date::from_ymd(2025, 1, 1).unwrap(), 12)
            .with_initial_installment(700.0);
        let result = calculate(&inputs).unwrap();
        assert_eq!(installment_steps(&result).len(), 1);
    }

    #[test]
    fn test_headline() {
        let inputs = ContractInputs::new(Date::from_ymd(2025, 1, 1).unwrap(), 1)
            .with_initial_installment(500.0);
        let headline = Headline::from_result(&calculate(&inputs).unwrap());
        assert_relative_eq!(headline.lease_liability, 500.0);
        assert_relative_eq!(headline.current_liability, 500.0);
        assert_relative_eq!(headline.non_current_liability, 0.0);
        assert_relative_eq!(headline.avp, 0.0);
        assert_relative_eq!(headline.monthly_rate_percent, 0.0);
    }
}
