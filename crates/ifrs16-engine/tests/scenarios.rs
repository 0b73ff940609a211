//! End-to-end lease scenarios.
//!
//! Each scenario runs the full pipeline from contract inputs (or raw form
//! fields) to the classified schedule and checks the reported figures.

use approx::assert_relative_eq;

use ifrs16_config::{ContractField, EngineConfig};
use ifrs16_engine::journal::{initial_recognition, journal_for_period};
use ifrs16_engine::prelude::*;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

// =============================================================================
// TWELVE MONTHS, 10% A YEAR, 1000 A MONTH
// =============================================================================

fn twelve_month_contract() -> ContractInputs {
    ContractInputs::new(date(2025, 1, 1), 12)
        .with_annual_rate(10.0)
        .with_initial_installment(1_000.0)
}

#[test]
fn twelve_month_rate_and_totals() {
    let result = calculate(&twelve_month_contract()).unwrap();

    assert_relative_eq!(result.monthly_rate, 0.007_974, epsilon = 1e-6);
    assert_relative_eq!(result.totals.total_nominal, 12_000.0, epsilon = 1e-9);

    let expected_pv: f64 = (1..=12)
        .map(|m| 1_000.0 / (1.0 + result.monthly_rate).powi(m))
        .sum();
    assert_relative_eq!(result.totals.total_present_value, expected_pv, epsilon = 1e-9);
    assert_relative_eq!(result.totals.total_present_value, 11_400.49, epsilon = 0.01);
    assert_relative_eq!(
        result.totals.avp,
        12_000.0 - result.totals.total_present_value,
        epsilon = 1e-9
    );
}

#[test]
fn twelve_month_schedule_shape() {
    let result = calculate(&twelve_month_contract()).unwrap();

    assert_eq!(result.cash_flow.len(), 12);
    assert_eq!(result.schedule.len(), 13);
    assert!(result.final_liability().abs() < 1e-6);

    let first = &result.schedule[1];
    assert_relative_eq!(
        first.interest,
        result.totals.total_present_value * result.monthly_rate,
        epsilon = 1e-9
    );
    assert_relative_eq!(first.payment, 1_000.0);

    // A twelve-month lease is entirely current at recognition
    let recognition = result.recognition().unwrap();
    assert_relative_eq!(
        recognition.current_portion,
        result.totals.total_present_value,
        epsilon = 1e-6
    );
    assert_relative_eq!(recognition.non_current_portion, 0.0, epsilon = 1e-6);
}

// =============================================================================
// SINGLE MONTH, ZERO RATE
// =============================================================================

#[test]
fn single_month_zero_rate() {
    let inputs = ContractInputs::new(date(2025, 1, 1), 1).with_initial_installment(500.0);
    let result = calculate(&inputs).unwrap();

    assert_relative_eq!(result.totals.total_present_value, 500.0);
    assert_eq!(result.schedule[1].closing_liability, 0.0);
    assert_relative_eq!(result.schedule[0].current_portion, 500.0);
    assert_relative_eq!(result.schedule[0].non_current_portion, 0.0);
    assert_relative_eq!(result.totals.total_depreciation, 500.0);
}

// =============================================================================
// READJUSTMENT
// =============================================================================

#[test]
fn readjustment_in_january() {
    let inputs = ContractInputs::new(date(2025, 6, 1), 25)
        .with_annual_rate(8.0)
        .with_readjustment(5.0, 1)
        .with_initial_installment(1_000.0);
    let result = calculate(&inputs).unwrap();
    let installment = |m: usize| result.cash_flow[m - 1].installment;

    assert_relative_eq!(installment(1), 1_000.0);
    assert_relative_eq!(installment(7), 1_000.0);
    // Month 8 is 01/2026, month 20 is 01/2027
    assert_eq!(result.cash_flow[7].label, "01/2026");
    assert_relative_eq!(installment(8), 1_050.0, epsilon = 1e-9);
    assert_relative_eq!(installment(19), 1_050.0, epsilon = 1e-9);
    assert_relative_eq!(installment(20), 1_102.5, epsilon = 1e-9);
    assert_relative_eq!(installment(25), 1_102.5, epsilon = 1e-9);
}

#[test]
fn readjustment_mid_year() {
    let inputs = ContractInputs::new(date(2025, 1, 1), 24)
        .with_readjustment(10.0, 7)
        .with_initial_installment(100.0);
    let result = calculate(&inputs).unwrap();

    // 01/2026..06/2026 are before the anniversary month
    assert_relative_eq!(result.cash_flow[17].installment, 100.0);
    assert_relative_eq!(result.cash_flow[18].installment, 110.0, epsilon = 1e-9);
}

// =============================================================================
// GRACE PERIOD
// =============================================================================

#[test]
fn grace_period() {
    let inputs = ContractInputs::new(date(2025, 1, 1), 12)
        .with_annual_rate(12.0)
        .with_grace_months(3)
        .with_initial_installment(900.0);
    let result = calculate(&inputs).unwrap();

    for flow in &result.cash_flow[..3] {
        assert_eq!(flow.installment, 0.0);
    }
    assert_relative_eq!(result.cash_flow[3].installment, 900.0);

    // Liability grows by interest during grace
    assert!(result.schedule[3].closing_liability > result.schedule[0].closing_liability);
    assert!(result.final_liability().abs() < 1e-6);
}

// =============================================================================
// RAW FIELDS AND ERRORS
// =============================================================================

#[test]
fn raw_form_fields_with_fallbacks() {
    let raw = RawContractFields::new("2025-01-01")
        .with(ContractField::AnnualRate, "10")
        .with(ContractField::InitialInstallment, "1000");
    let result = LeaseCalculator::default().calculate_raw(&raw).unwrap();

    // Missing term falls back to sixty months
    assert_eq!(result.term_months(), 60);
    assert_relative_eq!(result.totals.total_nominal, 60_000.0, epsilon = 1e-6);
}

#[test]
fn strict_mode_rejects_missing_fields() {
    let raw = RawContractFields::new("2025-01-01").with(ContractField::TermMonths, "12");
    let calculator = LeaseCalculator::new(EngineConfig::strict()).unwrap();
    assert!(matches!(
        calculator.calculate_raw(&raw),
        Err(Ifrs16Error::InvalidInput { .. })
    ));
}

#[test]
fn zero_term_yields_no_result() {
    let inputs = ContractInputs::new(date(2025, 1, 1), 0).with_initial_installment(100.0);
    assert!(matches!(
        calculate(&inputs),
        Err(Ifrs16Error::InvalidContractTerm { term_months: 0 })
    ));
}

#[test]
fn journal_views_over_result() {
    let inputs = ContractInputs::new(date(2025, 1, 1), 36)
        .with_annual_rate(10.0)
        .with_initial_installment(1_000.0);
    let result = calculate(&inputs).unwrap();

    let recognition = initial_recognition(&result);
    assert!(recognition.is_balanced());

    let period: Period = "06/2026".parse().unwrap();
    let journal = journal_for_period(&result, period).unwrap();
    assert_eq!(journal.month, 18);
    assert_relative_eq!(journal.interest_amount(), result.schedule[18].interest);
}

#[test]
fn archived_version_round_trip_reproduces_schedule() {
    let inputs = ContractInputs::new(date(2025, 4, 1), 18)
        .with_annual_rate(11.0)
        .with_grace_months(2)
        .with_readjustment(4.0, 4)
        .with_initial_installment(3_000.0);
    let result = calculate(&inputs).unwrap();
    let version = ArchivedVersion::from_result(&result, Some("initial"));

    let reloaded = ArchivedVersion::from_json(&version.to_json().unwrap()).unwrap();
    let recomputed = calculate(&reloaded.inputs()).unwrap();
    assert_relative_eq!(
        recomputed.totals.total_present_value,
        result.totals.total_present_value,
        epsilon = 1e-9
    );
}
