use serde_json::Value;

use finstat_core::dataset::FinancialDataset;
use finstat_core::ratios;

pub fn run_trends(dataset: &FinancialDataset) -> Result<Value, Box<dyn std::error::Error>> {
    let result = ratios::analyze_trends(dataset)?;
    Ok(serde_json::to_value(result)?)
}
