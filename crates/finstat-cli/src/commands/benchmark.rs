use clap::Args;
use serde_json::Value;

use finstat_core::dataset::FinancialDataset;
use finstat_core::health::{self, IndustryBenchmarks};
use finstat_core::types::FiscalYear;

use crate::commands::resolve_year;

/// Arguments for the peer benchmark comparison
#[derive(Args)]
pub struct BenchmarkArgs {
    /// Fiscal year, e.g. 2024 (defaults to the latest dataset year)
    #[arg(long)]
    pub year: Option<FiscalYear>,

    /// Compare against top-quartile performers instead of the industry
    /// average
    #[arg(long)]
    pub top_performers: bool,
}

pub fn run_benchmark(
    args: BenchmarkArgs,
    dataset: &FinancialDataset,
) -> Result<Value, Box<dyn std::error::Error>> {
    let year = resolve_year(args.year, dataset)?;
    let bench = if args.top_performers {
        IndustryBenchmarks::top_performers()
    } else {
        IndustryBenchmarks::industry_average()
    };
    let result = health::analyze_benchmark(dataset, year, &bench)?;
    Ok(serde_json::to_value(result)?)
}
