use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;

use crate::dataset::FinancialDataset;
use crate::error::FinStatError;
use crate::ratios::checked_div;
use crate::types::{with_metadata, ComputationOutput, FiscalYear, Rate};
use crate::FinStatResult;

/// Year-over-year growth for the figures the reporting layer headlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthReport {
    pub year: FiscalYear,
    pub previous_year: FiscalYear,
    pub revenue_growth_pct: Rate,
    pub net_profit_growth_pct: Rate,
    pub equity_growth_pct: Rate,
    pub cash_growth_pct: Rate,
}

/// Growth for a year, or the explicit not-applicable marker for the
/// earliest dataset year. Not-applicable is a valid state, never an error
/// and never a silent zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GrowthOutcome {
    Available(GrowthReport),
    NotApplicable { year: FiscalYear },
}

/// Percentage growth: (current - previous) / previous * 100.
///
/// Fails with `DivisionByZero` when `previous` is zero.
pub fn growth_pct(current: Decimal, previous: Decimal, context: &str) -> FinStatResult<Rate> {
    Ok(checked_div(current - previous, previous, context)? * dec!(100))
}

/// Growth figures between two dataset years. `previous` must precede
/// `current`; both must carry balance-sheet and profit & loss records.
pub fn year_over_year(
    dataset: &FinancialDataset,
    current: FiscalYear,
    previous: FiscalYear,
) -> FinStatResult<GrowthReport> {
    if previous >= current {
        return Err(FinStatError::InvalidInput {
            field: "previous".into(),
            reason: format!("Previous year {previous} must precede {current}."),
        });
    }

    let cur_pl = dataset.profit_loss(current)?;
    let prev_pl = dataset.profit_loss(previous)?;
    let cur_bs = dataset.balance_sheet(current)?;
    let prev_bs = dataset.balance_sheet(previous)?;

    Ok(GrowthReport {
        year: current,
        previous_year: previous,
        revenue_growth_pct: growth_pct(
            cur_pl.net_revenue,
            prev_pl.net_revenue,
            "revenue growth (prior-year revenue)",
        )?,
        net_profit_growth_pct: growth_pct(
            cur_pl.net_profit,
            prev_pl.net_profit,
            "net profit growth (prior-year net profit)",
        )?,
        equity_growth_pct: growth_pct(
            cur_bs.equity,
            prev_bs.equity,
            "equity growth (prior-year equity)",
        )?,
        cash_growth_pct: growth_pct(
            cur_bs.cash,
            prev_bs.cash,
            "cash growth (prior-year cash)",
        )?,
    })
}

/// Growth for `year` against the dataset year before it. `Ok(None)` for the
/// earliest dataset year.
pub fn growth_for(
    dataset: &FinancialDataset,
    year: FiscalYear,
) -> FinStatResult<Option<GrowthReport>> {
    // Validates the year exists even when there is nothing to compare to.
    dataset.profit_loss(year)?;

    match dataset.previous_year(year) {
        Some(previous) => year_over_year(dataset, year, previous).map(Some),
        None => Ok(None),
    }
}

/// Envelope-wrapped growth analysis for one dataset year.
pub fn analyze_growth(
    dataset: &FinancialDataset,
    year: FiscalYear,
) -> FinStatResult<ComputationOutput<GrowthOutcome>> {
    let start = Instant::now();

    let outcome = match growth_for(dataset, year)? {
        Some(report) => GrowthOutcome::Available(report),
        None => GrowthOutcome::NotApplicable { year },
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Year-over-Year Growth",
        &json!({ "company": dataset.company_name(), "year": year }),
        Vec::new(),
        elapsed,
        outcome,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_revenue_growth_2023_to_2024() {
        let dataset = FinancialDataset::builtin();
        let report =
            year_over_year(&dataset, FiscalYear(2024), FiscalYear(2023)).unwrap();
        // (44_788_100 - 36_031_549) / 36_031_549 * 100
        assert!((report.revenue_growth_pct - dec!(24.30)).abs() < dec!(0.01));
        assert!(report.net_profit_growth_pct > dec!(35));
    }

    #[test]
    fn test_earliest_year_is_not_applicable() {
        let dataset = FinancialDataset::builtin();
        let result = growth_for(&dataset, FiscalYear(2022)).unwrap();
        assert_eq!(result, None);

        let output = analyze_growth(&dataset, FiscalYear(2022)).unwrap();
        assert_eq!(
            output.result,
            GrowthOutcome::NotApplicable {
                year: FiscalYear(2022)
            }
        );
    }

    #[test]
    fn test_growth_for_resolves_previous_year() {
        let dataset = FinancialDataset::builtin();
        let report = growth_for(&dataset, FiscalYear(2023)).unwrap().unwrap();
        assert_eq!(report.previous_year, FiscalYear(2022));
    }

    #[test]
    fn test_unknown_year_is_not_found() {
        let dataset = FinancialDataset::builtin();
        let err = growth_for(&dataset, FiscalYear(2019)).unwrap_err();
        assert!(matches!(err, FinStatError::NotFound { .. }));
    }

    #[test]
    fn test_reversed_year_pair_rejected() {
        let dataset = FinancialDataset::builtin();
        let err =
            year_over_year(&dataset, FiscalYear(2023), FiscalYear(2024)).unwrap_err();
        assert!(matches!(err, FinStatError::InvalidInput { .. }));
    }

    #[test]
    fn test_zero_previous_value_is_division_by_zero() {
        let err = growth_pct(dec!(10), Decimal::ZERO, "test denominator").unwrap_err();
        match err {
            FinStatError::DivisionByZero { context } => {
                assert_eq!(context, "test denominator");
            }
            other => panic!("expected DivisionByZero, got {other:?}"),
        }
    }
}
