//! Lease liability amortization and right-of-use depreciation.
//!
//! Month 0 recognizes the liability and the asset at the total present value.
//! Each later month accrues interest on the opening liability, deducts the
//! installment paid, and depreciates the asset on a straight line over the
//! term.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ifrs16_config::ScheduleConfig;
use ifrs16_core::{Date, Ifrs16Error, Ifrs16Result};

use crate::projector::Projection;

/// One row of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// Month number; 0 is the initial recognition.
    pub month: u32,
    /// `MM/YYYY` label.
    pub label: String,
    /// Liability at the start of the month.
    pub opening_liability: f64,
    /// Interest accrued in the month.
    pub interest: f64,
    /// Installment paid in the month.
    pub payment: f64,
    /// Liability at the end of the month.
    pub closing_liability: f64,
    /// Right-of-use asset at cost.
    pub gross_asset: f64,
    /// Depreciation accumulated up to this month.
    pub accumulated_depreciation: f64,
    /// `gross_asset - accumulated_depreciation`.
    pub net_asset: f64,
    /// Interest expense recognized in the month.
    pub interest_expense: f64,
    /// Depreciation expense recognized in the month.
    pub depreciation_expense: f64,
    /// `interest_expense + depreciation_expense`.
    pub total_expense: f64,
}

impl AmortizationEntry {
    /// Initial recognition row.
    fn recognition(label: String, total_present_value: f64) -> Self {
        Self {
            month: 0,
            label,
            opening_liability: 0.0,
            interest: 0.0,
            payment: 0.0,
            closing_liability: total_present_value,
            gross_asset: total_present_value,
            accumulated_depreciation: 0.0,
            net_asset: total_present_value,
            interest_expense: 0.0,
            depreciation_expense: 0.0,
            total_expense: 0.0,
        }
    }

    /// Principal repaid in the month (`payment - interest`).
    pub fn principal(&self) -> f64 {
        self.payment - self.interest
    }

    /// Returns true for the month 0 row.
    pub fn is_recognition(&self) -> bool {
        self.month == 0
    }
}

/// Straight-line monthly depreciation of the right-of-use asset.
///
/// # Errors
///
/// Returns `InvalidContractTerm` when `term_months` is zero.
pub fn monthly_depreciation(total_present_value: f64, term_months: u32) -> Ifrs16Result<f64> {
    if term_months < 1 {
        return Err(Ifrs16Error::invalid_contract_term(i64::from(term_months)));
    }
    Ok(total_present_value / f64::from(term_months))
}

/// Rolls the lease liability forward over the projected cash flow.
///
/// Returns `term + 1` entries, month 0 first. A closing liability within
/// [`ScheduleConfig::snap_threshold`] of zero is stored as exactly zero.
///
/// # Errors
///
/// Returns `InvalidContractTerm` when the projection has no months.
pub fn amortize(
    projection: &Projection,
    start_date: Date,
    config: &ScheduleConfig,
) -> Ifrs16Result<Vec<AmortizationEntry>> {
    let term = u32::try_from(projection.cash_flow.len())
        .map_err(|_| Ifrs16Error::math_error("term does not fit in u32"))?;
    let total_pv = projection.total_present_value;
    let rate = projection.monthly_rate;
    let depreciation = monthly_depreciation(total_pv, term)?;
    let threshold = config.snap_threshold(total_pv);

    let mut entries = Vec::with_capacity(projection.cash_flow.len() + 1);
    entries.push(AmortizationEntry::recognition(
        start_date.month_label(),
        total_pv,
    ));

    let mut liability = total_pv;
    let mut accumulated = 0.0;

    for flow in &projection.cash_flow {
        let opening = liability;
        let interest = opening * rate;
        let payment = flow.installment;
        let closing = snap(opening + interest - payment, threshold);

        if closing < 0.0 {
            warn!(
                month = flow.month,
                closing, "closing liability below zero beyond drift tolerance"
            );
        }

        accumulated += depreciation;
        entries.push(AmortizationEntry {
            month: flow.month,
            label: flow.label.clone(),
            opening_liability: opening,
            interest,
            payment,
            closing_liability: closing,
            gross_asset: total_pv,
            accumulated_depreciation: accumulated,
            net_asset: total_pv - accumulated,
            interest_expense: interest,
            depreciation_expense: depreciation,
            total_expense: interest + depreciation,
        });

        liability = closing;
    }

    debug!(
        term,
        monthly_depreciation = depreciation,
        final_liability = liability,
        "amortized lease liability"
    );

    Ok(entries)
}

fn snap(value: f64, threshold: f64) -> f64 {
    if value.abs() <= threshold {
        0.0
    } else {
        value
    }
}
