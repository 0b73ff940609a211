//! Schedule totals and the final computation result.

use serde::{Deserialize, Serialize};

use ifrs16_core::ContractInputs;

use crate::amortization::AmortizationEntry;
use crate::classifier::ClassifiedEntry;
use crate::projector::{MonthlyCashFlow, Projection};

/// Headline totals of a lease schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTotals {
    /// Sum of nominal installments.
    pub total_nominal: f64,
    /// Initial lease liability.
    pub total_present_value: f64,
    /// Present-value adjustment (`nominal - present value`).
    pub avp: f64,
    /// Interest accrued over the term.
    pub total_interest: f64,
    /// Installments paid over the term.
    pub total_payments: f64,
    /// Depreciation over the term.
    pub total_depreciation: f64,
    /// Straight-line depreciation per month.
    pub monthly_depreciation: f64,
}

/// Everything computed for one contract.
///
/// Produced by value from [`calculate`](crate::calculate); consumers receive
/// it by reference and never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationResult {
    /// Normalized inputs the schedule was computed from.
    pub inputs: ContractInputs,
    /// Monthly effective discount rate.
    pub monthly_rate: f64,
    /// Projected cash flow, months `1..=term`.
    pub cash_flow: Vec<MonthlyCashFlow>,
    /// Amortization rows with the liability split, months `0..=term`.
    pub schedule: Vec<ClassifiedEntry>,
    /// Aggregated totals.
    pub totals: ScheduleTotals,
}

impl ComputationResult {
    /// Amortization rows without the liability split.
    pub fn amortization(&self) -> impl Iterator<Item = &AmortizationEntry> + '_ {
        self.schedule.iter().map(|row| &row.entry)
    }

    /// Initial recognition row (month 0).
    pub fn recognition(&self) -> Option<&ClassifiedEntry> {
        self.schedule.first()
    }

    /// Row for a given month number.
    pub fn entry(&self, month: u32) -> Option<&ClassifiedEntry> {
        self.schedule.get(month as usize)
    }

    /// Lease term in months.
    pub fn term_months(&self) -> u32 {
        self.inputs.term_months
    }

    /// Liability left after the last month.
    pub fn final_liability(&self) -> f64 {
        self.schedule.last().map_or(0.0, |row| row.closing_liability)
    }
}

/// Sums the schedule and assembles the result.
pub fn aggregate(
    inputs: ContractInputs,
    projection: Projection,
    schedule: Vec<ClassifiedEntry>,
) -> ComputationResult {
    let (total_interest, total_payments) = schedule
        .iter()
        .skip(1)
        .fold((0.0, 0.0), |(interest, payments), row| {
            (interest + row.interest, payments + row.payment)
        });

    let monthly_depreciation = schedule
        .get(1)
        .map_or(0.0, |row| row.depreciation_expense);

    let totals = ScheduleTotals {
        total_nominal: projection.total_nominal,
        total_present_value: projection.total_present_value,
        avp: projection.total_nominal - projection.total_present_value,
        total_interest,
        total_payments,
        total_depreciation: monthly_depreciation * f64::from(inputs.term_months),
        monthly_depreciation,
    };

    ComputationResult {
        inputs,
        monthly_rate: projection.monthly_rate,
        cash_flow: projection.cash_flow,
        schedule,
        totals,
    }
}
