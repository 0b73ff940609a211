//! Remeasurement of index-linked contracts.
//!
//! Index observations are supplied by the caller (monthly percentage
//! variations of IGP-M, IPCA, ...). Annual contracts are remeasured in their
//! readjustment month with the trailing twelve-month accumulated index;
//! monthly contracts with the latest monthly value.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use ifrs16_core::types::{Periodicity, ReadjustmentKind};
use ifrs16_core::{ContractInputs, Date, Ifrs16Result};

use crate::aggregator::ComputationResult;
use crate::archive::ArchivedVersion;
use crate::calculator::LeaseCalculator;
use crate::rounding::round_index;

/// Smallest variation, in percent, that triggers a remeasurement.
pub const MIN_VARIATION_PERCENT: f64 = 0.01;

/// A published monthly index value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexObservation {
    /// Index the value belongs to.
    pub kind: ReadjustmentKind,
    /// Reference month of the value.
    pub reference_date: Date,
    /// Monthly variation, percent.
    pub value: f64,
}

impl IndexObservation {
    /// Creates an observation.
    pub fn new(kind: ReadjustmentKind, reference_date: Date, value: f64) -> Self {
        Self {
            kind,
            reference_date,
            value,
        }
    }
}

/// Index value selected for a remeasurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexReading {
    /// Index.
    pub kind: ReadjustmentKind,
    /// Date of the latest observation used.
    pub reference_date: Date,
    /// Value, percent (accumulated for annual readings).
    pub value: f64,
    /// Latest monthly value.
    pub monthly_value: f64,
    /// Number of observations compounded.
    pub months_used: usize,
    /// Returns true for a twelve-month accumulated reading.
    pub accumulated: bool,
}

/// Remeasurement-relevant state of the latest contract version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionSnapshot {
    /// Index driving the readjustment.
    pub kind: ReadjustmentKind,
    /// Remeasurement cadence.
    pub periodicity: Periodicity,
    /// Readjustment month (annual cadence).
    pub readjustment_month: u32,
    /// Index value applied by the version, percent.
    pub readjustment_value: Option<f64>,
    /// Day the version was created.
    pub created_on: Date,
}

impl VersionSnapshot {
    /// Snapshot of an archived version created on `created_on`.
    pub fn from_archived(version: &ArchivedVersion, created_on: Date) -> Self {
        Self {
            kind: version.readjustment_kind,
            periodicity: version.periodicity,
            readjustment_month: version.readjustment_month,
            readjustment_value: version.readjustment_value,
            created_on,
        }
    }
}

/// A detected need for remeasurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemeasurementTrigger {
    /// Index reading that triggered it.
    pub reading: IndexReading,
    /// Index value applied by the current version.
    pub previous_value: f64,
    /// New index value.
    pub new_value: f64,
    /// Relative variation, percent.
    pub variation_percent: f64,
    /// Cadence of the contract.
    pub periodicity: Periodicity,
}

/// Outcome of a remeasurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Remeasurement {
    /// Multiplier applied to the installment.
    pub factor: f64,
    /// New flat installment.
    pub new_installment: f64,
    /// Recomputed schedule.
    pub result: ComputationResult,
}

impl Remeasurement {
    /// Inputs of the remeasured version.
    pub fn inputs(&self) -> &ContractInputs {
        &self.result.inputs
    }
}

fn observations_of(
    observations: &[IndexObservation],
    kind: ReadjustmentKind,
) -> impl Iterator<Item = &IndexObservation> {
    observations.iter().filter(move |obs| obs.kind == kind)
}

/// Most recent observation of `kind` on or before `reference`.
pub fn latest_index(
    observations: &[IndexObservation],
    kind: ReadjustmentKind,
    reference: Date,
) -> Option<IndexReading> {
    observations_of(observations, kind)
        .filter(|obs| obs.reference_date <= reference)
        .max_by_key(|obs| obs.reference_date)
        .map(|obs| IndexReading {
            kind,
            reference_date: obs.reference_date,
            value: obs.value,
            monthly_value: obs.value,
            months_used: 1,
            accumulated: false,
        })
}

/// Trailing twelve-month accumulated index.
///
/// Compounds every observation with `reference - 12 months < date <=
/// reference`; the result is rounded to four decimal places.
pub fn accumulated_annual_index(
    observations: &[IndexObservation],
    kind: ReadjustmentKind,
    reference: Date,
) -> Option<IndexReading> {
    let window_start = reference.add_months(-12).ok()?;
    let mut window: Vec<&IndexObservation> = observations_of(observations, kind)
        .filter(|obs| obs.reference_date > window_start && obs.reference_date <= reference)
        .collect();
    window.sort_by_key(|obs| obs.reference_date);

    let last = window.last()?;
    let factor: f64 = window.iter().map(|obs| 1.0 + obs.value / 100.0).product();

    Some(IndexReading {
        kind,
        reference_date: last.reference_date,
        value: round_index((factor - 1.0) * 100.0),
        monthly_value: last.value,
        months_used: window.len(),
        accumulated: true,
    })
}

/// Reading appropriate for the contract cadence.
pub fn index_for_periodicity(
    periodicity: Periodicity,
    observations: &[IndexObservation],
    kind: ReadjustmentKind,
    reference: Date,
) -> Option<IndexReading> {
    match periodicity {
        Periodicity::Monthly => latest_index(observations, kind, reference),
        Periodicity::Annual => accumulated_annual_index(observations, kind, reference),
    }
}

/// Relative change from `previous` to `new`, percent.
///
/// With no previous value the new value itself is the variation.
pub fn variation_percent(previous: f64, new: f64) -> f64 {
    if previous == 0.0 {
        new
    } else {
        (new - previous) / previous.abs() * 100.0
    }
}

/// Decides whether the version must be remeasured on `today`.
///
/// Returns `None` for manual contracts, for annual contracts outside their
/// readjustment month, when no index newer than the version exists, and
/// when the variation is below [`MIN_VARIATION_PERCENT`].
pub fn check_remeasurement(
    version: &VersionSnapshot,
    observations: &[IndexObservation],
    today: Date,
) -> Option<RemeasurementTrigger> {
    if !version.kind.is_index_linked() {
        return None;
    }

    let month = if (1..=12).contains(&version.readjustment_month) {
        version.readjustment_month
    } else {
        1
    };
    if version.periodicity == Periodicity::Annual && today.month() != month {
        return None;
    }

    let Some(reading) = index_for_periodicity(version.periodicity, observations, version.kind, today)
    else {
        debug!(kind = %version.kind, periodicity = %version.periodicity, "no index available");
        return None;
    };

    let stale = match version.periodicity {
        Periodicity::Monthly => {
            reading.reference_date.year() == version.created_on.year()
                && reading.reference_date.month() == version.created_on.month()
        }
        Periodicity::Annual => reading.reference_date <= version.created_on,
    };
    if stale {
        return None;
    }

    let previous_value = version.readjustment_value.unwrap_or_default();
    let variation = variation_percent(previous_value, reading.value);
    if variation.abs() < MIN_VARIATION_PERCENT {
        return None;
    }

    Some(RemeasurementTrigger {
        new_value: reading.value,
        reading,
        previous_value,
        variation_percent: variation,
        periodicity: version.periodicity,
    })
}

/// Installment multiplier for an index change.
///
/// The ratio of the values when a previous value exists, otherwise the new
/// value applied as a percentage.
pub fn readjustment_factor(previous_value: f64, new_value: f64) -> f64 {
    if previous_value > 0.0 {
        new_value / previous_value
    } else {
        1.0 + new_value / 100.0
    }
}

/// Recomputes the schedule with the installment readjusted by the index.
///
/// The remeasured installment is flat: no further readjustment is applied.
///
/// # Errors
///
/// Propagates calculation errors for the new inputs.
pub fn remeasure(
    calculator: &LeaseCalculator,
    inputs: &ContractInputs,
    previous_value: f64,
    new_value: f64,
) -> Ifrs16Result<Remeasurement> {
    let factor = readjustment_factor(previous_value, new_value);
    let new_installment = inputs.initial_installment * factor;

    let new_inputs = inputs
        .clone()
        .with_initial_installment(new_installment)
        .with_readjustment(0.0, inputs.readjustment_month);
    let result = calculator.calculate(&new_inputs)?;

    info!(
        factor,
        new_installment,
        total_present_value = result.totals.total_present_value,
        "contract remeasured"
    );

    Ok(Remeasurement {
        factor,
        new_installment,
        result,
    })
}

/// Note recorded on a remeasured version, appended to any previous notes.
pub fn remeasurement_note(
    kind: ReadjustmentKind,
    periodicity: Periodicity,
    new_value: f64,
    previous_notes: Option<&str>,
) -> String {
    let cadence = match periodicity {
        Periodicity::Monthly => "monthly",
        Periodicity::Annual => "annual, 12-month accumulated",
    };
    let note = format!("Automatic remeasurement: {kind} ({cadence}) updated to {new_value:.4}%");
    match previous_notes.filter(|n| !n.is_empty()) {
        Some(previous) => format!("{previous}\n\n{note}"),
        None => note,
    }
}
