//! CSV export of computed schedules.
//!
//! Files are semicolon-delimited with amounts rounded to cents, the layout
//! spreadsheet tools in pt-BR locales open without an import dialog.

use std::io::Write;

use serde::Serialize;

use crate::aggregator::ComputationResult;
use crate::error::EngineResult;
use crate::rounding::{round_money, round_with};

/// Field delimiter of exported files.
pub const DELIMITER: u8 = b';';

#[derive(Serialize)]
struct AmortizationCsvRow<'a> {
    month: u32,
    label: &'a str,
    opening_liability: f64,
    interest: f64,
    payment: f64,
    closing_liability: f64,
    current_portion: f64,
    non_current_portion: f64,
    net_asset: f64,
    total_expense: f64,
}

#[derive(Serialize)]
struct CashFlowCsvRow<'a> {
    month: u32,
    label: &'a str,
    installment: f64,
    discount_factor: f64,
    present_value: f64,
}

fn writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().delimiter(DELIMITER).from_writer(out)
}

/// Writes one row per amortization entry, month 0 first.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_amortization_csv<W: Write>(result: &ComputationResult, out: W) -> EngineResult<()> {
    let mut wtr = writer(out);
    for row in &result.schedule {
        wtr.serialize(AmortizationCsvRow {
            month: row.month,
            label: &row.label,
            opening_liability: round_money(row.opening_liability),
            interest: round_money(row.interest),
            payment: round_money(row.payment),
            closing_liability: round_money(row.closing_liability),
            current_portion: round_money(row.current_portion),
            non_current_portion: round_money(row.non_current_portion),
            net_asset: round_money(row.net_asset),
            total_expense: round_money(row.total_expense),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes one row per projected month. Discount factors keep six places.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_cash_flow_csv<W: Write>(result: &ComputationResult, out: W) -> EngineResult<()> {
    let mut wtr = writer(out);
    for flow in &result.cash_flow {
        wtr.serialize(CashFlowCsvRow {
            month: flow.month,
            label: &flow.label,
            installment: round_money(flow.installment),
            discount_factor: round_with(
                flow.discount_factor,
                6,
                rust_decimal::RoundingStrategy::MidpointAwayFromZero,
            ),
            present_value: round_money(flow.present_value),
        })?;
    }
    wtr.flush()?;
    Ok(())
}
