//! Cash-flow projection.
//!
//! Builds the monthly installment schedule of a contract: grace months pay
//! nothing, later months pay the initial installment compounded once per
//! readjustment anniversary already reached. Every installment is discounted
//! at the monthly equivalent of the annual rate.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ifrs16_core::{ContractInputs, Date, Ifrs16Error, Ifrs16Result};

/// One month of the projected cash flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCashFlow {
    /// Month number, 1-based.
    pub month: u32,
    /// `MM/YYYY` label.
    pub label: String,
    /// Calendar date of the month (start date shifted by `month - 1`).
    pub date: Date,
    /// Nominal installment due.
    pub installment: f64,
    /// `1 / (1 + r)^month`.
    pub discount_factor: f64,
    /// `installment * discount_factor`.
    pub present_value: f64,
}

/// Output of [`project`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Monthly effective discount rate.
    pub monthly_rate: f64,
    /// One row per month, `1..=term`.
    pub cash_flow: Vec<MonthlyCashFlow>,
    /// Sum of nominal installments.
    pub total_nominal: f64,
    /// Sum of discounted installments; the initial lease liability.
    pub total_present_value: f64,
}

impl Projection {
    /// Number of projected months.
    pub fn term_months(&self) -> usize {
        self.cash_flow.len()
    }
}

/// Monthly rate equivalent to an annual effective rate given in percent.
///
/// ```rust
/// use ifrs16_engine::projector::monthly_rate;
///
/// let r = monthly_rate(10.0);
/// assert!((r - 0.007_974_14).abs() < 1e-8);
/// ```
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    (1.0 + annual_rate_percent / 100.0).powf(1.0 / 12.0) - 1.0
}

/// Number of readjustments applied by the time `current` is reached.
///
/// Each calendar year after the start year counts once: fully when it lies
/// before the current year, and in the current year only from the
/// readjustment month onwards.
pub fn readjustment_events(start_year: i32, current: Date, readjustment_month: u32) -> i32 {
    let current_year = current.year();
    ((start_year + 1)..=current_year)
        .filter(|&year| year < current_year || current.month() >= readjustment_month)
        .count() as i32
}

/// Installment due in `month` (1-based) falling on `date`.
pub fn installment_for(inputs: &ContractInputs, month: u32, date: Date) -> f64 {
    if month <= inputs.grace_months {
        return 0.0;
    }
    let events = readjustment_events(
        inputs.start_date.year(),
        date,
        inputs.readjustment_month,
    );
    inputs.initial_installment * (1.0 + inputs.annual_readjustment_percent / 100.0).powi(events)
}

/// Projects the monthly cash flow and its present value.
///
/// Month `m` falls on the start date shifted by `m - 1` months, clamped to
/// the end of shorter months: a January 31 start labels its second month
/// `02/YYYY`, not `03/YYYY` as day-overflow arithmetic would.
///
/// # Errors
///
/// - `InvalidContractTerm` if the term is zero or above `MAX_TERM_MONTHS`,
///   checked before anything is allocated
/// - `InvalidReadjustmentMonth` if the month is outside 1..=12
/// - `MathError` if a rate is not finite or the discount rate is at or
///   below -100%
/// - `InvalidDate` if a month falls outside the supported calendar
pub fn project(inputs: &ContractInputs) -> Ifrs16Result<Projection> {
    inputs.validate()?;

    let rate = monthly_rate(inputs.annual_rate_percent);
    if !rate.is_finite() || rate <= -1.0 {
        return Err(Ifrs16Error::math_error(format!(
            "annual rate {}% has no monthly equivalent",
            inputs.annual_rate_percent
        )));
    }

    let mut cash_flow = Vec::with_capacity(inputs.term_months as usize);
    let mut total_nominal = 0.0;
    let mut total_present_value = 0.0;

    for month in 1..=inputs.term_months {
        let offset = i32::try_from(month - 1)
            .map_err(|_| Ifrs16Error::invalid_contract_term(i64::from(inputs.term_months)))?;
        let date = inputs.start_date.add_months(offset)?;
        let installment = installment_for(inputs, month, date);
        let discount_factor = 1.0 / (1.0 + rate).powi(month as i32);
        let present_value = installment * discount_factor;

        total_nominal += installment;
        total_present_value += present_value;

        cash_flow.push(MonthlyCashFlow {
            month,
            label: date.month_label(),
            date,
            installment,
            discount_factor,
            present_value,
        });
    }

    debug!(
        term = inputs.term_months,
        monthly_rate = rate,
        total_nominal,
        total_present_value,
        "projected cash flow"
    );

    Ok(Projection {
        monthly_rate: rate,
        cash_flow,
        total_nominal,
        total_present_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_monthly_rate() {
        assert_relative_eq!(monthly_rate(0.0), 0.0);
        assert_relative_eq!(monthly_rate(10.0), 0.007_974_140_428, epsilon = 1e-10);
        assert_relative_eq!((1.0 + monthly_rate(12.0)).powi(12), 1.12, epsilon = 1e-12);
    }

    #[test]
    fn test_readjustment_events() {
        // Start 2025, readjust in January
        assert_eq!(readjustment_events(2025, date(2025, 12, 1), 1), 0);
        assert_eq!(readjustment_events(2025, date(2026, 1, 1), 1), 1);
        assert_eq!(readjustment_events(2025, date(2027, 1, 1), 1), 2);

        // Readjust in July: the anniversary is only reached mid-year
        assert_eq!(readjustment_events(2025, date(2026, 6, 1), 7), 0);
        assert_eq!(readjustment_events(2025, date(2026, 7, 1), 7), 1);
        assert_eq!(readjustment_events(2025, date(2027, 3, 1), 7), 1);
    }

    #[test]
    fn test_flat_projection() {
        let inputs = ContractInputs::new(date(2025, 1, 1), 12)
            .with_annual_rate(10.0)
            .with_initial_installment(1_000.0);
        let projection = project(&inputs).unwrap();

        assert_eq!(projection.term_months(), 12);
        assert_relative_eq!(projection.total_nominal, 12_000.0, epsilon = 1e-9);

        let expected: f64 = (1..=12)
            .map(|m| 1_000.0 / (1.0 + projection.monthly_rate).powi(m))
            .sum();
        assert_relative_eq!(projection.total_present_value, expected, epsilon = 1e-9);
        assert_relative_eq!(projection.total_present_value, 11_400.487_8, epsilon = 1e-3);

        let first = &projection.cash_flow[0];
        assert_eq!(first.month, 1);
        assert_eq!(first.label, "01/2025");
        assert_relative_eq!(first.discount_factor, 1.0 / (1.0 + projection.monthly_rate));
        assert_eq!(projection.cash_flow[11].label, "12/2025");
    }

    #[test]
    fn test_zero_rate_projection() {
        let inputs = ContractInputs::new(date(2025, 1, 1), 1).with_initial_installment(500.0);
        let projection = project(&inputs).unwrap();
        assert_relative_eq!(projection.monthly_rate, 0.0);
        assert_relative_eq!(projection.total_present_value, 500.0);
        assert_relative_eq!(projection.cash_flow[0].discount_factor, 1.0);
    }

    #[test]
    fn test_grace_months_pay_nothing() {
        let inputs = ContractInputs::new(date(2025, 1, 1), 6)
            .with_grace_months(3)
            .with_initial_installment(800.0);
        let projection = project(&inputs).unwrap();
        let installments: Vec<f64> = projection.cash_flow.iter().map(|c| c.installment).collect();
        assert_eq!(installments, vec![0.0, 0.0, 0.0, 800.0, 800.0, 800.0]);
    }

    #[test]
    fn test_month_end_start_clamps() {
        let inputs = ContractInputs::new(date(2025, 1, 31), 3).with_initial_installment(100.0);
        let projection = project(&inputs).unwrap();
        assert_eq!(projection.cash_flow[1].date, date(2025, 2, 28));
        assert_eq!(projection.cash_flow[2].date, date(2025, 3, 31));
        assert_eq!(projection.cash_flow[1].label, "02/2025");
    }

    #[test]
    fn test_zero_term_rejected() {
        let inputs = ContractInputs::new(date(2025, 1, 1), 0);
        assert_eq!(
            project(&inputs).unwrap_err(),
            Ifrs16Error::invalid_contract_term(0)
        );
    }

    #[test]
    fn test_oversized_term_rejected_before_allocation() {
        let inputs = ContractInputs::new(date(2025, 1, 1), 4_000_000_000)
            .with_initial_installment(1.0);
        assert_eq!(
            project(&inputs).unwrap_err(),
            Ifrs16Error::invalid_contract_term(4_000_000_000)
        );
    }

    #[test]
    fn test_rate_below_minus_hundred_rejected() {
        let inputs = ContractInputs::new(date(2025, 1, 1), 12).with_annual_rate(-150.0);
        assert!(matches!(project(&inputs), Err(Ifrs16Error::MathError { .. })));
    }
}
