//! Journal command implementation.
//!
//! Prints the initial recognition entry and the monthly entries, either for
//! every month or for a single competence period.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use ifrs16_core::Period;
use ifrs16_engine::journal::{
    competence_range, initial_recognition, journal_for_period, period_in_portfolio,
    ContractSpan, JournalEntry, MonthlyJournal,
};

use crate::cli::OutputFormat;
use crate::commands::schedule::journal_rows;
use crate::commands::{compute, ContractArgs};
use crate::error::CliError;
use crate::output::{format_money, print_header, print_json, print_output, print_table, print_warning};

/// Arguments for the journal command.
#[derive(Args, Debug)]
pub struct JournalArgs {
    #[command(flatten)]
    pub contract: ContractArgs,

    /// Competence period (MM/YYYY); all months when omitted
    #[arg(long)]
    pub period: Option<Period>,

    /// Registered contracts (JSON array of {start, term_months}) used to
    /// check the period against the whole portfolio
    #[arg(long, value_name = "FILE")]
    pub portfolio: Option<PathBuf>,
}

/// One posting line for display.
#[derive(Debug, Serialize, Tabled)]
struct PostingRow {
    #[tabled(rename = "Entry")]
    entry: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Debit")]
    debit: String,
    #[tabled(rename = "Credit")]
    credit: String,
}

#[derive(Serialize)]
struct PeriodPayload<'a> {
    period: Period,
    in_portfolio: bool,
    journal: Option<&'a MonthlyJournal>,
}

/// Execute the journal command.
pub fn execute(args: JournalArgs, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let result = compute(&args.contract, config)?;
    let spans = match &args.portfolio {
        Some(path) => load_portfolio(path)?,
        None => Vec::new(),
    };

    let Some(period) = args.period else {
        if format == OutputFormat::Table {
            print_header("Initial recognition");
            print_table(&posting_rows(&[&initial_recognition(&result)]))?;
            print_header("Monthly entries");
        }
        return print_output(&journal_rows(&result), format);
    };

    let journal = journal_for_period(&result, period);
    let in_portfolio = period_in_portfolio(&spans, period);

    if !in_portfolio {
        print_warning(&format!("{period} does not belong to any registered contract"));
    } else if journal.is_none() {
        print_warning(&format!("No entries for {period} in this contract"));
    }
    if !spans.is_empty() && format == OutputFormat::Table {
        if let Some((first, last)) = competence_range(&spans) {
            eprintln!("Portfolio competence range: {first} - {last}");
        }
    }

    match format {
        OutputFormat::Json => print_json(&PeriodPayload {
            period,
            in_portfolio,
            journal: journal.as_ref(),
        }),
        _ => {
            let entries: Vec<&JournalEntry> = journal
                .as_ref()
                .map(|j| j.entries().to_vec())
                .unwrap_or_default();
            if format == OutputFormat::Table {
                print_header(&format!("Entries for {period}"));
            }
            print_output(&posting_rows(&entries), format)
        }
    }
}

fn posting_rows(entries: &[&JournalEntry]) -> Vec<PostingRow> {
    entries
        .iter()
        .flat_map(|entry| {
            entry.lines.iter().map(move |line| {
                let amount = format_money(line.amount);
                let (debit, credit) = match line.side {
                    ifrs16_engine::journal::Side::Debit => (amount, String::new()),
                    ifrs16_engine::journal::Side::Credit => (String::new(), amount),
                };
                PostingRow {
                    entry: entry.kind.to_string(),
                    account: format!("{} - {}", line.side, line.account),
                    debit,
                    credit,
                }
            })
        })
        .collect()
}

fn load_portfolio(path: &Path) -> Result<Vec<ContractSpan>> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        CliError::InvalidPortfolioFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
        .into()
    })
}
