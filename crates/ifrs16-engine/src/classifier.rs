//! Current / non-current split of the lease liability.
//!
//! The current portion of a month's closing liability is the principal that
//! will be repaid in the following months up to the look-ahead window
//! (twelve months by default), capped by what remains of the term.

use serde::{Deserialize, Serialize};

use crate::amortization::AmortizationEntry;

/// An amortization row with its liability split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedEntry {
    /// The underlying amortization row.
    #[serde(flatten)]
    pub entry: AmortizationEntry,
    /// Liability due within the window.
    pub current_portion: f64,
    /// Liability due after the window.
    pub non_current_portion: f64,
}

impl std::ops::Deref for ClassifiedEntry {
    type Target = AmortizationEntry;

    fn deref(&self) -> &Self::Target {
        &self.entry
    }
}

/// Splits every closing liability into current and non-current portions.
///
/// Principal sums are taken from a prefix-sum table, so the whole schedule
/// is classified in linear time.
pub fn classify(entries: &[AmortizationEntry], term_months: u32, window: u32) -> Vec<ClassifiedEntry> {
    // prefix[i] = principal repaid over entries[0..i]
    let mut prefix = Vec::with_capacity(entries.len() + 1);
    prefix.push(0.0);
    let mut running = 0.0;
    for entry in entries {
        running += entry.principal();
        prefix.push(running);
    }

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let span = lookahead(entry, term_months, window, entries.len() - index - 1);
            let raw = prefix[index + 1 + span] - prefix[index + 1];
            split(entry, raw)
        })
        .collect()
}

/// Number of following rows that fall into the window of `entry`.
fn lookahead(entry: &AmortizationEntry, term_months: u32, window: u32, remaining: usize) -> usize {
    let to_maturity = term_months.saturating_sub(entry.month);
    (window.min(to_maturity) as usize).min(remaining)
}

fn split(entry: &AmortizationEntry, raw_current: f64) -> ClassifiedEntry {
    let closing = entry.closing_liability;
    let current = raw_current.max(0.0).min(closing.max(0.0));
    ClassifiedEntry {
        entry: entry.clone(),
        current_portion: current,
        non_current_portion: closing - current,
    }
}

/// Quadratic reference classifier, one window scan per row.
#[cfg(test)]
pub(crate) fn classify_naive(
    entries: &[AmortizationEntry],
    term_months: u32,
    window: u32,
) -> Vec<ClassifiedEntry> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let span = lookahead(entry, term_months, window, entries.len() - index - 1);
            let raw: f64 = entries[index + 1..=index + span]
                .iter()
                .map(AmortizationEntry::principal)
                .sum();
            split(entry, raw)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::amortize;
    use crate::projector::project;
    use approx::assert_relative_eq;
    use ifrs16_config::ScheduleConfig;
    use ifrs16_core::{ContractInputs, Date};

    fn entries(inputs: &ContractInputs) -> Vec<AmortizationEntry> {
        let projection = project(inputs).unwrap();
        amortize(&projection, inputs.start_date, &ScheduleConfig::default()).unwrap()
    }

    fn contract(term: u32) -> ContractInputs {
        ContractInputs::new(Date::from_ymd(2025, 3, 1).unwrap(), term)
            .with_annual_rate(9.0)
            .with_grace_months(1)
            .with_readjustment(4.0, 3)
            .with_initial_installment(1_200.0)
    }

    #[test]
    fn test_split_sums_to_closing() {
        let inputs = contract(36);
        for row in classify(&entries(&inputs), 36, 12) {
            assert_relative_eq!(
                row.current_portion + row.non_current_portion,
                row.closing_liability,
                epsilon = 1e-9
            );
            assert!(row.current_portion >= 0.0);
            assert!(row.current_portion <= row.closing_liability.max(0.0));
        }
    }

    #[test]
    fn test_matches_naive_scan() {
        for term in [1, 5, 12, 13, 40] {
            let inputs = contract(term);
            let rows = entries(&inputs);
            let fast = classify(&rows, term, 12);
            let slow = classify_naive(&rows, term, 12);
            for (a, b) in fast.iter().zip(&slow) {
                assert_relative_eq!(a.current_portion, b.current_portion, epsilon = 1e-6);
                assert_relative_eq!(a.non_current_portion, b.non_current_portion, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_short_term_is_all_current() {
        let inputs = contract(12);
        let rows = classify(&entries(&inputs), 12, 12);
        for row in &rows {
            assert_relative_eq!(row.non_current_portion, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_last_row_has_no_current_portion() {
        let inputs = contract(24);
        let rows = classify(&entries(&inputs), 24, 12);
        let last = rows.last().unwrap();
        assert_eq!(last.current_portion, 0.0);
        assert_relative_eq!(last.non_current_portion, last.closing_liability);
    }

    #[test]
    fn test_custom_window() {
        let inputs = contract(24);
        let rows = entries(&inputs);
        let narrow = classify(&rows, 24, 6);
        let wide = classify(&rows, 24, 12);
        assert!(narrow[0].current_portion < wide[0].current_portion);
    }

    #[test]
    fn test_grace_row_current_is_clamped_at_zero() {
        // During grace only interest accrues, so principal is negative
        let inputs = ContractInputs::new(Date::from_ymd(2025, 1, 1).unwrap(), 24)
            .with_annual_rate(10.0)
            .with_grace_months(18)
            .with_initial_installment(1_000.0);
        let rows = classify(&entries(&inputs), 24, 3);
        assert_eq!(rows[0].current_portion, 0.0);
        assert_relative_eq!(rows[0].non_current_portion, rows[0].closing_liability);
    }
}
