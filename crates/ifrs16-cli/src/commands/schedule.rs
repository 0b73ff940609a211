//! Schedule command implementation.
//!
//! Computes a lease schedule and prints one view of it.

use std::path::Path;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use ifrs16_engine::export::{write_amortization_csv, write_cash_flow_csv};
use ifrs16_engine::journal::monthly_journal;
use ifrs16_engine::rounding::round_money;
use ifrs16_engine::summary::{installment_steps, Headline};
use ifrs16_engine::ComputationResult;

use crate::cli::OutputFormat;
use crate::commands::{compute, ContractArgs};
use crate::output::{
    format_money, format_percent, print_header, print_json, print_output, print_table, KeyValue,
};

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub contract: ContractArgs,

    /// What to print
    #[arg(long, value_enum, default_value = "summary")]
    pub view: View,
}

/// Schedule views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// Headline figures, totals and installment evolution
    Summary,
    /// Monthly installments and present values
    CashFlow,
    /// Liability roll-forward and asset depreciation
    Amortization,
    /// Current / non-current liability split
    Split,
    /// Monthly journal amounts
    Journal,
}

/// Cash-flow table row.
#[derive(Debug, Serialize, Tabled)]
struct CashFlowRow {
    #[tabled(rename = "Month")]
    month: u32,
    #[tabled(rename = "Date")]
    label: String,
    #[tabled(rename = "Installment")]
    installment: f64,
    #[tabled(rename = "Discount factor")]
    discount_factor: String,
    #[tabled(rename = "Present value")]
    present_value: f64,
}

/// Amortization table row.
#[derive(Debug, Serialize, Tabled)]
struct AmortizationRow {
    #[tabled(rename = "Month")]
    month: u32,
    #[tabled(rename = "Date")]
    label: String,
    #[tabled(rename = "Opening")]
    opening_liability: f64,
    #[tabled(rename = "Interest")]
    interest: f64,
    #[tabled(rename = "Payment")]
    payment: f64,
    #[tabled(rename = "Closing")]
    closing_liability: f64,
    #[tabled(rename = "Current")]
    current_portion: f64,
    #[tabled(rename = "Non-current")]
    non_current_portion: f64,
    #[tabled(rename = "Net asset")]
    net_asset: f64,
    #[tabled(rename = "Total expense")]
    total_expense: f64,
}

/// Liability split table row.
#[derive(Debug, Serialize, Tabled)]
struct SplitRow {
    #[tabled(rename = "Month")]
    month: u32,
    #[tabled(rename = "Date")]
    label: String,
    #[tabled(rename = "Liability")]
    closing_liability: f64,
    #[tabled(rename = "Current")]
    current_portion: f64,
    #[tabled(rename = "Non-current")]
    non_current_portion: f64,
}

/// Monthly journal table row.
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct JournalRow {
    #[tabled(rename = "Month")]
    pub month: u32,
    #[tabled(rename = "Period")]
    pub period: String,
    #[tabled(rename = "D Finance exp. / C Liability")]
    pub interest: f64,
    #[tabled(rename = "D Depreciation / C Accum. dep.")]
    pub depreciation: f64,
    #[tabled(rename = "D Liability / C Cash")]
    pub payment: f64,
}

/// Installment step row.
#[derive(Debug, Serialize, Tabled)]
struct StepRow {
    #[tabled(rename = "From")]
    label: String,
    #[tabled(rename = "Installment")]
    installment: String,
}

#[derive(Serialize)]
struct SummaryPayload<'a> {
    headline: Headline,
    totals: &'a ifrs16_engine::ScheduleTotals,
    installment_steps: Vec<ifrs16_engine::summary::InstallmentStep>,
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let result = compute(&args.contract, config)?;

    match args.view {
        View::Summary => print_summary(&result, format),
        View::CashFlow => match format {
            OutputFormat::Csv => Ok(write_cash_flow_csv(&result, std::io::stdout())?),
            _ => print_output(&cash_flow_rows(&result), format),
        },
        View::Amortization => match format {
            OutputFormat::Csv => Ok(write_amortization_csv(&result, std::io::stdout())?),
            _ => print_output(&amortization_rows(&result), format),
        },
        View::Split => print_output(&split_rows(&result), format),
        View::Journal => print_output(&journal_rows(&result), format),
    }
}

fn print_summary(result: &ComputationResult, format: OutputFormat) -> Result<()> {
    let headline = Headline::from_result(result);
    let steps = installment_steps(result);

    if format == OutputFormat::Json {
        return print_json(&SummaryPayload {
            headline,
            totals: &result.totals,
            installment_steps: steps,
        });
    }

    let totals = &result.totals;
    let figures = vec![
        KeyValue::new(
            "Monthly rate",
            format_percent(headline.monthly_rate_percent, 4),
        ),
        KeyValue::money("Lease liability", headline.lease_liability),
        KeyValue::money("Right-of-use asset", headline.right_of_use_asset),
        KeyValue::money("Total nominal", headline.total_nominal),
        KeyValue::money("Present-value adjustment", headline.avp),
        KeyValue::money("Current liability", headline.current_liability),
        KeyValue::money("Non-current liability", headline.non_current_liability),
        KeyValue::money("Total interest", totals.total_interest),
        KeyValue::money("Total payments", totals.total_payments),
        KeyValue::money("Total depreciation", totals.total_depreciation),
        KeyValue::money("Monthly depreciation", totals.monthly_depreciation),
    ];
    let step_rows: Vec<StepRow> = steps
        .iter()
        .map(|step| StepRow {
            label: step.label.clone(),
            installment: format_money(step.installment),
        })
        .collect();

    if format == OutputFormat::Csv {
        return print_output(&figures, format);
    }

    print_header("Lease schedule");
    print_table(&figures)?;
    print_header("Installment evolution");
    print_table(&step_rows)
}

fn cash_flow_rows(result: &ComputationResult) -> Vec<CashFlowRow> {
    result
        .cash_flow
        .iter()
        .map(|flow| CashFlowRow {
            month: flow.month,
            label: flow.label.clone(),
            installment: round_money(flow.installment),
            discount_factor: format!("{:.6}", flow.discount_factor),
            present_value: round_money(flow.present_value),
        })
        .collect()
}

fn amortization_rows(result: &ComputationResult) -> Vec<AmortizationRow> {
    result
        .schedule
        .iter()
        .map(|row| AmortizationRow {
            month: row.month,
            label: row.label.clone(),
            opening_liability: round_money(row.opening_liability),
            interest: round_money(row.interest),
            payment: round_money(row.payment),
            closing_liability: round_money(row.closing_liability),
            current_portion: round_money(row.current_portion),
            non_current_portion: round_money(row.non_current_portion),
            net_asset: round_money(row.net_asset),
            total_expense: round_money(row.total_expense),
        })
        .collect()
}

fn split_rows(result: &ComputationResult) -> Vec<SplitRow> {
    result
        .schedule
        .iter()
        .map(|row| SplitRow {
            month: row.month,
            label: row.label.clone(),
            closing_liability: round_money(row.closing_liability),
            current_portion: round_money(row.current_portion),
            non_current_portion: round_money(row.non_current_portion),
        })
        .collect()
}

pub(crate) fn journal_rows(result: &ComputationResult) -> Vec<JournalRow> {
    monthly_journal(result)
        .iter()
        .map(|journal| JournalRow {
            month: journal.month,
            period: journal.period.to_string(),
            interest: round_money(journal.interest_amount()),
            depreciation: round_money(journal.depreciation_amount()),
            payment: round_money(journal.payment_amount()),
        })
        .collect()
}
