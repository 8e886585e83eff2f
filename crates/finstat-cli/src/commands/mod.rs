pub mod benchmark;
pub mod cash_flow;
pub mod growth;
pub mod ratios;
pub mod report;
pub mod summary;
pub mod trends;

use finstat_core::dataset::FinancialDataset;
use finstat_core::types::FiscalYear;

/// Resolve the `--year` argument, falling back to the latest dataset year.
pub fn resolve_year(
    year: Option<FiscalYear>,
    dataset: &FinancialDataset,
) -> Result<FiscalYear, Box<dyn std::error::Error>> {
    year.or_else(|| dataset.latest_year())
        .ok_or_else(|| "dataset contains no fiscal years".into())
}
