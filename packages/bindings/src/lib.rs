use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use finstat_core::dataset::FinancialDataset;
use finstat_core::types::FiscalYear;
use finstat_core::{growth, ratios, summary};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Request shape shared by the per-year entry points: a fiscal year plus an
/// optional dataset override. Without a dataset the embedded sample company
/// is used.
#[derive(Deserialize)]
struct YearRequest {
    year: FiscalYear,
    #[serde(default)]
    dataset: Option<serde_json::Value>,
}

/// Request shape for dataset-wide entry points.
#[derive(Deserialize)]
struct DatasetRequest {
    #[serde(default)]
    dataset: Option<serde_json::Value>,
}

fn resolve_dataset(
    raw: Option<serde_json::Value>,
) -> Result<FinancialDataset, finstat_core::FinStatError> {
    match raw {
        Some(value) => FinancialDataset::from_value(value),
        None => Ok(FinancialDataset::builtin()),
    }
}

// ---------------------------------------------------------------------------
// Ratios
// ---------------------------------------------------------------------------

#[napi]
pub fn get_ratios(input_json: String) -> NapiResult<String> {
    let req: YearRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let dataset = resolve_dataset(req.dataset).map_err(to_napi_error)?;
    let output = ratios::analyze_ratios(&dataset, req.year).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn get_trends(input_json: String) -> NapiResult<String> {
    let req: DatasetRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let dataset = resolve_dataset(req.dataset).map_err(to_napi_error)?;
    let output = ratios::analyze_trends(&dataset).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

#[napi]
pub fn get_growth(input_json: String) -> NapiResult<String> {
    let req: YearRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let dataset = resolve_dataset(req.dataset).map_err(to_napi_error)?;
    let output = growth::analyze_growth(&dataset, req.year).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[napi]
pub fn get_summary(input_json: String) -> NapiResult<String> {
    let req: YearRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let dataset = resolve_dataset(req.dataset).map_err(to_napi_error)?;
    let output = summary::analyze_summary(&dataset, req.year).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
