use clap::Args;
use serde_json::Value;

use finstat_core::dataset::FinancialDataset;
use finstat_core::ratios;
use finstat_core::types::FiscalYear;

use crate::commands::resolve_year;

/// Arguments for the ratio report
#[derive(Args)]
pub struct RatiosArgs {
    /// Fiscal year, e.g. 2024 (defaults to the latest dataset year)
    #[arg(long)]
    pub year: Option<FiscalYear>,
}

pub fn run_ratios(
    args: RatiosArgs,
    dataset: &FinancialDataset,
) -> Result<Value, Box<dyn std::error::Error>> {
    let year = resolve_year(args.year, dataset)?;
    let result = ratios::analyze_ratios(dataset, year)?;
    Ok(serde_json::to_value(result)?)
}
