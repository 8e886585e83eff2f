use clap::Args;
use serde_json::Value;

use finstat_core::dataset::FinancialDataset;
use finstat_core::summary;
use finstat_core::types::FiscalYear;

use crate::commands::resolve_year;

/// Arguments for the company summary
#[derive(Args)]
pub struct SummaryArgs {
    /// Fiscal year, e.g. 2024 (defaults to the latest dataset year)
    #[arg(long)]
    pub year: Option<FiscalYear>,
}

pub fn run_summary(
    args: SummaryArgs,
    dataset: &FinancialDataset,
) -> Result<Value, Box<dyn std::error::Error>> {
    let year = resolve_year(args.year, dataset)?;
    let result = summary::analyze_summary(dataset, year)?;
    Ok(serde_json::to_value(result)?)
}
