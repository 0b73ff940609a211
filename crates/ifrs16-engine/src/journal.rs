//! Journal entries derived from a computed schedule.
//!
//! Initial recognition books the right-of-use asset against the lease
//! liability, split into its current and non-current parts. Every month of
//! the term then carries three entries:
//!
//! 1. Interest: D finance expense / C lease liability
//! 2. Depreciation: D depreciation expense / C accumulated depreciation
//! 3. Payment: D lease liability / C cash

use std::fmt;

use serde::{Deserialize, Serialize};

use ifrs16_core::types::MAX_TERM_MONTHS;
use ifrs16_core::{Date, Period};

use crate::aggregator::ComputationResult;

/// Ledger accounts touched by lease accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Account {
    /// Right-of-use asset
    RightOfUseAsset,
    /// Lease liability due within twelve months
    LeaseLiabilityCurrent,
    /// Lease liability due after twelve months
    LeaseLiabilityNonCurrent,
    /// Lease liability (unsplit)
    LeaseLiability,
    /// Finance (interest) expense
    FinanceExpense,
    /// Depreciation expense
    DepreciationExpense,
    /// Accumulated depreciation of the right-of-use asset
    AccumulatedDepreciation,
    /// Cash
    Cash,
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Account::RightOfUseAsset => "Right-of-use asset",
            Account::LeaseLiabilityCurrent => "Lease liability (current)",
            Account::LeaseLiabilityNonCurrent => "Lease liability (non-current)",
            Account::LeaseLiability => "Lease liability",
            Account::FinanceExpense => "Finance expense",
            Account::DepreciationExpense => "Depreciation expense",
            Account::AccumulatedDepreciation => "Accumulated depreciation",
            Account::Cash => "Cash",
        };
        write!(f, "{name}")
    }
}

/// Debit or credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Debit
    Debit,
    /// Credit
    Credit,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Debit => write!(f, "D"),
            Side::Credit => write!(f, "C"),
        }
    }
}

/// A single posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Account posted to.
    pub account: Account,
    /// Debit or credit.
    pub side: Side,
    /// Amount posted.
    pub amount: f64,
}

impl JournalLine {
    fn debit(account: Account, amount: f64) -> Self {
        Self {
            account,
            side: Side::Debit,
            amount,
        }
    }

    fn credit(account: Account, amount: f64) -> Self {
        Self {
            account,
            side: Side::Credit,
            amount,
        }
    }
}

/// What a journal entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Initial recognition of asset and liability
    InitialRecognition,
    /// Monthly interest accrual
    Interest,
    /// Monthly depreciation
    Depreciation,
    /// Installment payment
    Payment,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryKind::InitialRecognition => "Initial recognition",
            EntryKind::Interest => "Interest",
            EntryKind::Depreciation => "Depreciation",
            EntryKind::Payment => "Payment",
        };
        write!(f, "{name}")
    }
}

/// A balanced set of postings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// What the entry records.
    pub kind: EntryKind,
    /// Postings, debits first.
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    fn pair(kind: EntryKind, debit: Account, credit: Account, amount: f64) -> Self {
        Self {
            kind,
            lines: vec![
                JournalLine::debit(debit, amount),
                JournalLine::credit(credit, amount),
            ],
        }
    }

    /// Sum of debit lines.
    pub fn debits(&self) -> f64 {
        self.side_total(Side::Debit)
    }

    /// Sum of credit lines.
    pub fn credits(&self) -> f64 {
        self.side_total(Side::Credit)
    }

    fn side_total(&self, side: Side) -> f64 {
        self.lines
            .iter()
            .filter(|line| line.side == side)
            .map(|line| line.amount)
            .sum()
    }

    /// Returns true if debits equal credits within a cent fraction.
    pub fn is_balanced(&self) -> bool {
        (self.debits() - self.credits()).abs() < 1e-6
    }
}

/// The three entries of one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyJournal {
    /// Month number (1-based).
    pub month: u32,
    /// Competence period.
    pub period: Period,
    /// Interest accrual.
    pub interest: JournalEntry,
    /// Depreciation.
    pub depreciation: JournalEntry,
    /// Installment payment.
    pub payment: JournalEntry,
}

impl MonthlyJournal {
    /// The entries in posting order.
    pub fn entries(&self) -> [&JournalEntry; 3] {
        [&self.interest, &self.depreciation, &self.payment]
    }

    /// Interest expense of the month.
    pub fn interest_amount(&self) -> f64 {
        self.interest.debits()
    }

    /// Depreciation expense of the month.
    pub fn depreciation_amount(&self) -> f64 {
        self.depreciation.debits()
    }

    /// Installment paid in the month.
    pub fn payment_amount(&self) -> f64 {
        self.payment.debits()
    }
}

/// Totals over a set of monthly journals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalTotals {
    /// Interest expense.
    pub interest: f64,
    /// Depreciation expense.
    pub depreciation: f64,
    /// Installments paid.
    pub payments: f64,
}

/// Initial recognition entry.
pub fn initial_recognition(result: &ComputationResult) -> JournalEntry {
    let (current, non_current) = result
        .recognition()
        .map_or((0.0, 0.0), |row| (row.current_portion, row.non_current_portion));

    JournalEntry {
        kind: EntryKind::InitialRecognition,
        lines: vec![
            JournalLine::debit(Account::RightOfUseAsset, result.totals.total_present_value),
            JournalLine::credit(Account::LeaseLiabilityCurrent, current),
            JournalLine::credit(Account::LeaseLiabilityNonCurrent, non_current),
        ],
    }
}

/// Journal of every month of the term, in order.
pub fn monthly_journal(result: &ComputationResult) -> Vec<MonthlyJournal> {
    result
        .schedule
        .iter()
        .skip(1)
        .zip(&result.cash_flow)
        .map(|(row, flow)| MonthlyJournal {
            month: row.month,
            period: Period::from_date(flow.date),
            interest: JournalEntry::pair(
                EntryKind::Interest,
                Account::FinanceExpense,
                Account::LeaseLiability,
                row.interest_expense,
            ),
            depreciation: JournalEntry::pair(
                EntryKind::Depreciation,
                Account::DepreciationExpense,
                Account::AccumulatedDepreciation,
                row.depreciation_expense,
            ),
            payment: JournalEntry::pair(
                EntryKind::Payment,
                Account::LeaseLiability,
                Account::Cash,
                row.payment,
            ),
        })
        .collect()
}

/// Journal of the month falling in `period`, if the contract covers it.
pub fn journal_for_period(result: &ComputationResult, period: Period) -> Option<MonthlyJournal> {
    monthly_journal(result)
        .into_iter()
        .find(|journal| journal.period == period)
}

/// Periods covered by the contract, in order.
pub fn contract_periods(result: &ComputationResult) -> Vec<Period> {
    result
        .cash_flow
        .iter()
        .map(|flow| Period::from_date(flow.date))
        .collect()
}

/// Sums a sequence of monthly journals.
pub fn journal_totals<'a>(journals: impl IntoIterator<Item = &'a MonthlyJournal>) -> JournalTotals {
    journals
        .into_iter()
        .fold(JournalTotals::default(), |totals, journal| JournalTotals {
            interest: totals.interest + journal.interest_amount(),
            depreciation: totals.depreciation + journal.depreciation_amount(),
            payments: totals.payments + journal.payment_amount(),
        })
}

// =============================================================================
// PORTFOLIO COMPETENCE RANGE
// =============================================================================

/// Start and term of a registered contract, as stored in its latest version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSpan {
    /// Contract start date.
    pub start: Date,
    /// Term in months; spans outside `1..=MAX_TERM_MONTHS` are ignored.
    pub term_months: i64,
}

impl ContractSpan {
    /// Creates a span.
    pub fn new(start: Date, term_months: i64) -> Self {
        Self { start, term_months }
    }

    /// First and last period covered, `None` for a term no contract can have.
    pub fn periods(&self) -> Option<(Period, Period)> {
        if !(1..=i64::from(MAX_TERM_MONTHS)).contains(&self.term_months) {
            return None;
        }
        let first = Period::from_date(self.start);
        let offset = i32::try_from(self.term_months - 1).ok()?;
        Some((first, first.add_months(offset)?))
    }

    /// Returns true if `period` falls within the span.
    pub fn contains(&self, period: Period) -> bool {
        self.periods()
            .is_some_and(|(first, last)| first <= period && period <= last)
    }
}

/// Earliest start and latest end across `spans`.
pub fn competence_range(spans: &[ContractSpan]) -> Option<(Period, Period)> {
    spans.iter().filter_map(ContractSpan::periods).fold(
        None,
        |acc: Option<(Period, Period)>, (first, last)| match acc {
            None => Some((first, last)),
            Some((lo, hi)) => Some((lo.min(first), hi.max(last))),
        },
    )
}

/// Every period from the earliest start to the latest end across `spans`.
///
/// Gaps between contracts are included. Empty when no span has a usable
/// term. Periods are produced lazily.
pub fn competence_periods(spans: &[ContractSpan]) -> impl Iterator<Item = Period> {
    let range = competence_range(spans);
    std::iter::successors(range.map(|(first, _)| first), move |current| {
        let (_, last) = range?;
        current.next().filter(|next| *next <= last)
    })
}

/// Returns true if `period` belongs to some contract.
///
/// An empty portfolio accepts every period.
pub fn period_in_portfolio(spans: &[ContractSpan], period: Period) -> bool {
    spans.is_empty() || spans.iter().any(|span| span.contains(period))
}
