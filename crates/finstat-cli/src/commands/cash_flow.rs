use clap::Args;
use serde::Serialize;
use serde_json::Value;

use finstat_core::dataset::FinancialDataset;
use finstat_core::statements::CashFlow;
use finstat_core::types::FiscalYear;

use crate::commands::resolve_year;

/// Arguments for the cash-flow statement
#[derive(Args)]
pub struct CashFlowArgs {
    /// Fiscal year, e.g. 2024 (defaults to the latest dataset year)
    #[arg(long)]
    pub year: Option<FiscalYear>,
}

/// Cash-flow history may be shorter than the other statement series, so
/// absence is rendered as an explicit state rather than an error.
#[derive(Serialize)]
struct CashFlowView {
    year: FiscalYear,
    available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    statement: Option<CashFlow>,
}

pub fn run_cash_flow(
    args: CashFlowArgs,
    dataset: &FinancialDataset,
) -> Result<Value, Box<dyn std::error::Error>> {
    let year = resolve_year(args.year, dataset)?;
    // Unknown years are still an error; only missing cash-flow history for
    // a known year is the valid "not available" state.
    dataset.balance_sheet(year)?;

    let view = match dataset.cash_flow(year) {
        Some(statement) => CashFlowView {
            year,
            available: true,
            statement: Some(statement.clone()),
        },
        None => CashFlowView {
            year,
            available: false,
            statement: None,
        },
    };
    Ok(serde_json::to_value(view)?)
}
