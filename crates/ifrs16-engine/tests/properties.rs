//! Property-based tests for schedule invariants.
//!
//! For any well-formed contract:
//! - Every month rolls forward: closing = opening + interest - payment
//! - Current + non-current = closing, with 0 <= current <= closing
//! - The liability is fully repaid at the end of the term
//! - Accumulated depreciation reaches the initial asset
//! - The net asset never increases

use approx::assert_relative_eq;
use proptest::prelude::*;

use ifrs16_config::{EngineConfig, ScheduleConfig};
use ifrs16_engine::prelude::*;
use ifrs16_engine::summary::installment_steps;

// =============================================================================
// GENERATORS
// =============================================================================

prop_compose! {
    fn contract()(
        year in 2015i32..2035,
        month in 1u32..=12,
        day in 1u32..=28,
        term in 1u32..=120,
        grace_share in 0.0f64..0.5,
        rate in 0.0f64..30.0,
        readjustment in 0.0f64..15.0,
        readjustment_month in 1u32..=12,
        installment in 1.0f64..100_000.0,
    ) -> ContractInputs {
        let grace = (f64::from(term) * grace_share) as u32;
        ContractInputs::new(Date::from_ymd(year, month, day).unwrap(), term)
            .with_grace_months(grace)
            .with_annual_rate(rate)
            .with_readjustment(readjustment, readjustment_month)
            .with_initial_installment(installment)
    }
}

fn tolerance(result: &ComputationResult) -> f64 {
    1e-6 * result.totals.total_nominal.max(1.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn roll_forward_holds(inputs in contract()) {
        let result = calculate(&inputs).unwrap();
        let tol = tolerance(&result);
        for pair in result.schedule.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);
            prop_assert!((cur.opening_liability - prev.closing_liability).abs() <= tol);
            let rolled = cur.opening_liability + cur.interest - cur.payment;
            prop_assert!((cur.closing_liability - rolled).abs() <= tol);
        }
    }

    #[test]
    fn split_is_consistent(inputs in contract()) {
        let result = calculate(&inputs).unwrap();
        let tol = tolerance(&result);
        for row in &result.schedule {
            prop_assert!((row.current_portion + row.non_current_portion - row.closing_liability).abs() <= tol);
            prop_assert!(row.current_portion >= 0.0);
            prop_assert!(row.current_portion <= row.closing_liability.max(0.0) + tol);
        }
    }

    #[test]
    fn liability_is_repaid(inputs in contract()) {
        let result = calculate(&inputs).unwrap();
        prop_assert!(result.final_liability().abs() <= tolerance(&result));
    }

    #[test]
    fn asset_is_fully_depreciated(inputs in contract()) {
        let result = calculate(&inputs).unwrap();
        let tol = tolerance(&result);
        let last = result.schedule.last().unwrap();
        prop_assert!((last.accumulated_depreciation - result.totals.total_present_value).abs() <= tol);
        for pair in result.schedule.windows(2) {
            prop_assert!(pair[1].net_asset <= pair[0].net_asset + tol);
        }
    }

    #[test]
    fn interest_unwinds_the_discount(inputs in contract()) {
        let result = calculate(&inputs).unwrap();
        let totals = result.totals;
        prop_assert!((totals.total_payments - totals.total_nominal).abs() <= tolerance(&result));
        prop_assert!((totals.total_interest - totals.avp).abs() <= tolerance(&result));
    }

    #[test]
    fn wider_window_never_lowers_current(inputs in contract(), window in 1u32..24) {
        // A flat annuity repays principal every month
        let inputs = inputs.with_grace_months(0).with_readjustment(0.0, 1);
        let narrow = EngineConfig {
            schedule: ScheduleConfig::default().with_current_window(window),
            ..EngineConfig::default()
        };
        let wide = EngineConfig {
            schedule: ScheduleConfig::default().with_current_window(window + 1),
            ..EngineConfig::default()
        };
        let a = LeaseCalculator::new(narrow).unwrap().calculate(&inputs).unwrap();
        let b = LeaseCalculator::new(wide).unwrap().calculate(&inputs).unwrap();
        prop_assert!(b.schedule[0].current_portion + tolerance(&a) >= a.schedule[0].current_portion);
    }

    #[test]
    fn steps_are_increasing_for_positive_readjustment(inputs in contract()) {
        let result = calculate(&inputs).unwrap();
        let steps = installment_steps(&result);
        prop_assert!(!steps.is_empty());
        for pair in steps.windows(2) {
            prop_assert!(pair[1].installment >= pair[0].installment);
            prop_assert!(pair[1].month > pair[0].month);
        }
    }
}

#[test]
fn deterministic_portfolio_sweep() {
    // Deterministic pseudo-random contracts across the parameter space
    for seed in 0u64..200 {
        let hash = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        let term = 1 + (hash % 240) as u32;
        let inputs = ContractInputs::new(
            Date::from_ymd(2020 + (hash % 10) as i32, 1 + (hash % 12) as u32, 1).unwrap(),
            term,
        )
        .with_grace_months((hash % 6) as u32 % term)
        .with_annual_rate((hash % 2_500) as f64 / 100.0)
        .with_readjustment((hash % 1_000) as f64 / 100.0, 1 + ((hash >> 8) % 12) as u32)
        .with_initial_installment(100.0 + (hash % 50_000) as f64);

        let result = calculate(&inputs).unwrap();
        assert_eq!(result.schedule.len(), term as usize + 1);
        assert_relative_eq!(
            result.totals.total_depreciation,
            result.totals.total_present_value,
            epsilon = 1e-6 * result.totals.total_present_value.max(1.0)
        );
    }
}
