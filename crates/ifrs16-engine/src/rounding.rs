//! Decimal rounding of reported figures.
//!
//! Schedules are computed in `f64`. Reported amounts are rounded through
//! `rust_decimal`: money to cents half away from zero, index percentages to
//! four places half to even.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to `dp` places with the given strategy.
///
/// Values outside the `Decimal` range are returned unchanged. A negative
/// zero result is returned as `0.0`.
pub fn round_with(value: f64, dp: u32, strategy: RoundingStrategy) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, strategy))
        .and_then(|d| d.to_f64())
        .map_or(value, |rounded| rounded + 0.0)
}

/// Money amount as a two-place decimal, half away from zero.
pub fn money(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or_default()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a money amount to cents, half away from zero.
pub fn round_money(value: f64) -> f64 {
    round_with(value, 2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an index percentage to four places, half to even.
pub fn round_index(value: f64) -> f64 {
    round_with(value, 4, RoundingStrategy::MidpointNearestEven)
}
