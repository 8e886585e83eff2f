use clap::Args;
use serde_json::Value;

use finstat_core::dataset::FinancialDataset;
use finstat_core::growth;
use finstat_core::types::FiscalYear;

use crate::commands::resolve_year;

/// Arguments for year-over-year growth
#[derive(Args)]
pub struct GrowthArgs {
    /// Fiscal year, e.g. 2024 (defaults to the latest dataset year)
    #[arg(long)]
    pub year: Option<FiscalYear>,

    /// Compare against this year instead of the one directly before
    #[arg(long)]
    pub previous: Option<FiscalYear>,
}

pub fn run_growth(
    args: GrowthArgs,
    dataset: &FinancialDataset,
) -> Result<Value, Box<dyn std::error::Error>> {
    let year = resolve_year(args.year, dataset)?;
    if let Some(previous) = args.previous {
        let report = growth::year_over_year(dataset, year, previous)?;
        return Ok(serde_json::to_value(report)?);
    }
    let result = growth::analyze_growth(dataset, year)?;
    Ok(serde_json::to_value(result)?)
}
