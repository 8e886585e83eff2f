use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FinStatError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Ratios and percentages. Percentage fields carry the `_pct` suffix and
/// hold the value after the ×100 step (24.7 = 24.7%).
pub type Rate = Decimal;

/// Calendar year identifying one reporting period.
///
/// Ordering is calendar order, which is what every lookup and trend walk
/// relies on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FiscalYear(pub u16);

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FiscalYear {
    type Err = FinStatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u16>().map(FiscalYear).map_err(|_| {
            FinStatError::InvalidInput {
                field: "year".into(),
                reason: format!("'{s}' is not a calendar year"),
            }
        })
    }
}

/// The statement families a dataset carries, named in lookup errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatementKind {
    BalanceSheet,
    ProfitLoss,
    CashFlow,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementKind::BalanceSheet => "balance sheet",
            StatementKind::ProfitLoss => "profit & loss",
            StatementKind::CashFlow => "cash flow",
        };
        write!(f, "{name}")
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiscal_year_ordering_is_calendar_order() {
        assert!(FiscalYear(2022) < FiscalYear(2023));
        assert!(FiscalYear(2024) > FiscalYear(2023));
    }

    #[test]
    fn test_fiscal_year_parse_roundtrip() {
        let year: FiscalYear = "2024".parse().unwrap();
        assert_eq!(year, FiscalYear(2024));
        assert_eq!(year.to_string(), "2024");
    }

    #[test]
    fn test_fiscal_year_parse_rejects_garbage() {
        let result = "twenty24".parse::<FiscalYear>();
        assert!(matches!(
            result,
            Err(FinStatError::InvalidInput { .. })
        ));
    }
}
