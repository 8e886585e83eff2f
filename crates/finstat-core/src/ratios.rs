use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;

use crate::dataset::FinancialDataset;
use crate::error::FinStatError;
use crate::statements::{BalanceSheet, CashFlow, ProfitLoss};
use crate::types::{with_metadata, ComputationOutput, FiscalYear, Money, Rate};
use crate::FinStatResult;

/// Liquidity, solvency and profitability ratios for one fiscal year.
///
/// Always derived fresh from that year's balance sheet and profit & loss
/// account; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioReport {
    /// Current assets / current liabilities
    pub current_ratio: Rate,
    /// (Cash + receivables) / current liabilities
    pub quick_ratio: Rate,
    /// Equity as a percentage of total assets
    pub solvency_pct: Rate,
    /// Net profit as a percentage of equity
    pub return_on_equity_pct: Rate,
    /// Operating result as a percentage of total assets
    pub return_on_assets_pct: Rate,
    /// Net profit as a percentage of net revenue
    pub net_margin_pct: Rate,
    /// Gross margin as a percentage of net revenue
    pub gross_margin_pct: Rate,
    /// Current assets minus current liabilities
    pub working_capital: Money,
}

/// One trend row: the ratio report for a single dataset year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRatios {
    pub year: FiscalYear,
    #[serde(flatten)]
    pub ratios: RatioReport,
}

/// Division that surfaces a zero denominator as an explicit error instead
/// of a silent infinity or NaN.
pub(crate) fn checked_div(
    numerator: Decimal,
    denominator: Decimal,
    context: &str,
) -> FinStatResult<Decimal> {
    if denominator.is_zero() {
        return Err(FinStatError::DivisionByZero {
            context: context.to_string(),
        });
    }
    Ok(numerator / denominator)
}

/// Derive the ratio report from one year's balance sheet and profit & loss
/// account.
///
/// Pure and deterministic: the same records always produce a bit-identical
/// report, so it is safe to call repeatedly and concurrently. Fails with
/// `DivisionByZero` when current liabilities, total assets, equity or net
/// revenue is zero.
pub fn compute_ratios(bs: &BalanceSheet, pl: &ProfitLoss) -> FinStatResult<RatioReport> {
    let hundred = dec!(100);
    let current_assets = bs.current_assets();
    let total_assets = bs.total_assets();

    let current_ratio = checked_div(
        current_assets,
        bs.current_liabilities,
        "current ratio (current liabilities)",
    )?;
    let quick_ratio = checked_div(
        bs.cash + bs.receivables,
        bs.current_liabilities,
        "quick ratio (current liabilities)",
    )?;
    let solvency_pct = checked_div(bs.equity, total_assets, "solvency (total assets)")? * hundred;
    let return_on_equity_pct =
        checked_div(pl.net_profit, bs.equity, "return on equity (equity)")? * hundred;
    let return_on_assets_pct = checked_div(
        pl.operating_result,
        total_assets,
        "return on assets (total assets)",
    )? * hundred;
    let net_margin_pct =
        checked_div(pl.net_profit, pl.net_revenue, "net margin (net revenue)")? * hundred;
    let gross_margin_pct =
        checked_div(pl.gross_margin, pl.net_revenue, "gross margin (net revenue)")? * hundred;
    let working_capital = current_assets - bs.current_liabilities;

    Ok(RatioReport {
        current_ratio,
        quick_ratio,
        solvency_pct,
        return_on_equity_pct,
        return_on_assets_pct,
        net_margin_pct,
        gross_margin_pct,
        working_capital,
    })
}

/// Envelope-wrapped ratio analysis for one dataset year.
pub fn analyze_ratios(
    dataset: &FinancialDataset,
    year: FiscalYear,
) -> FinStatResult<ComputationOutput<RatioReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let bs = dataset.balance_sheet(year)?;
    let pl = dataset.profit_loss(year)?;
    check_statement_consistency(pl, dataset.cash_flow(year), year, &mut warnings);

    let report = compute_ratios(bs, pl)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Financial Ratio Analysis (liquidity / solvency / profitability)",
        &json!({ "company": dataset.company_name(), "year": year }),
        warnings,
        elapsed,
        report,
    ))
}

/// Ratio reports for every dataset year, ascending.
pub fn ratio_series(dataset: &FinancialDataset) -> FinStatResult<Vec<YearRatios>> {
    dataset
        .years()
        .into_iter()
        .map(|year| {
            let bs = dataset.balance_sheet(year)?;
            let pl = dataset.profit_loss(year)?;
            Ok(YearRatios {
                year,
                ratios: compute_ratios(bs, pl)?,
            })
        })
        .collect()
}

/// Envelope-wrapped multi-year ratio trend.
pub fn analyze_trends(
    dataset: &FinancialDataset,
) -> FinStatResult<ComputationOutput<Vec<YearRatios>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for year in dataset.years() {
        let pl = dataset.profit_loss(year)?;
        check_statement_consistency(pl, dataset.cash_flow(year), year, &mut warnings);
    }

    let rows = ratio_series(dataset)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Multi-Year Ratio Trend",
        &json!({ "company": dataset.company_name(), "years": dataset.years() }),
        warnings,
        elapsed,
        rows,
    ))
}

/// Cross-check the reported aggregate lines against their components.
/// Mismatches are warnings, not errors: the reported figures stay
/// authoritative for ratio computation.
pub(crate) fn check_statement_consistency(
    pl: &ProfitLoss,
    cf: Option<&CashFlow>,
    year: FiscalYear,
    warnings: &mut Vec<String>,
) {
    if pl.gross_margin != pl.net_revenue - pl.cost_of_revenue {
        warnings.push(format!(
            "Reported gross margin for {year} does not equal net revenue minus cost of revenue."
        ));
    }
    if let Some(cf) = cf {
        if cf.net != cf.component_sum() {
            warnings.push(format!(
                "Reported net cash flow for {year} does not equal the sum of operating, \
                 investing and financing cash flows."
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn sample_balance_sheet() -> BalanceSheet {
        BalanceSheet {
            intangible_fixed_assets: dec!(0),
            tangible_fixed_assets: dec!(100_000),
            financial_fixed_assets: dec!(0),
            receivables: dec!(50_000),
            cash: dec!(150_000),
            equity: dec!(200_000),
            current_liabilities: dec!(100_000),
        }
    }

    fn sample_profit_loss() -> ProfitLoss {
        ProfitLoss {
            net_revenue: dec!(1_000_000),
            cost_of_revenue: dec!(400_000),
            gross_margin: dec!(600_000),
            operating_expenses: dec!(450_000),
            operating_result: dec!(150_000),
            net_profit: dec!(120_000),
        }
    }

    #[test]
    fn test_ratio_formulas() {
        let report = compute_ratios(&sample_balance_sheet(), &sample_profit_loss()).unwrap();
        assert_eq!(report.current_ratio, dec!(2));
        assert_eq!(report.quick_ratio, dec!(2));
        // equity 200k / total assets 300k
        assert_eq!(
            report.solvency_pct,
            dec!(200_000) / dec!(300_000) * dec!(100)
        );
        assert_eq!(report.return_on_equity_pct, dec!(60));
        assert_eq!(report.net_margin_pct, dec!(12));
        assert_eq!(report.gross_margin_pct, dec!(60));
        assert_eq!(report.working_capital, dec!(100_000));
    }

    #[test]
    fn test_builtin_2024_scenario() {
        let dataset = FinancialDataset::builtin();
        let output = analyze_ratios(&dataset, FiscalYear(2024)).unwrap();
        let report = output.result;
        // 12_721_055 / 6_898_906
        assert!((report.current_ratio - dec!(1.8434)).abs() < dec!(0.01));
        // 11_067_411 / 44_788_100 * 100
        assert!((report.net_margin_pct - dec!(24.71)).abs() < dec!(0.01));
        assert_eq!(report.working_capital, dec!(5_822_149));
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_working_capital_reconciles_with_current_ratio() {
        let dataset = FinancialDataset::builtin();
        for row in ratio_series(&dataset).unwrap() {
            let bs = dataset.balance_sheet(row.year).unwrap();
            let recomputed =
                row.ratios.current_ratio * bs.current_liabilities - bs.current_liabilities;
            assert!((recomputed - row.ratios.working_capital).abs() < dec!(0.01));
        }
    }

    #[test]
    fn test_compute_ratios_is_idempotent() {
        let bs = sample_balance_sheet();
        let pl = sample_profit_loss();
        let first = compute_ratios(&bs, &pl).unwrap();
        let second = compute_ratios(&bs, &pl).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_current_liabilities_is_division_by_zero() {
        let mut bs = sample_balance_sheet();
        bs.current_liabilities = Decimal::ZERO;
        let err = compute_ratios(&bs, &sample_profit_loss()).unwrap_err();
        match err {
            FinStatError::DivisionByZero { context } => {
                assert!(context.contains("current ratio"));
            }
            other => panic!("expected DivisionByZero, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_equity_is_division_by_zero() {
        let mut bs = sample_balance_sheet();
        bs.equity = Decimal::ZERO;
        let err = compute_ratios(&bs, &sample_profit_loss()).unwrap_err();
        assert!(matches!(err, FinStatError::DivisionByZero { .. }));
    }

    #[test]
    fn test_zero_revenue_is_division_by_zero() {
        let mut pl = sample_profit_loss();
        pl.net_revenue = Decimal::ZERO;
        let err = compute_ratios(&sample_balance_sheet(), &pl).unwrap_err();
        assert!(matches!(err, FinStatError::DivisionByZero { .. }));
    }

    #[test]
    fn test_margins_finite_for_all_builtin_years() {
        let dataset = FinancialDataset::builtin();
        for row in ratio_series(&dataset).unwrap() {
            // Decimal has no NaN/Infinity; the meaningful bound is that the
            // margins stay inside what the inputs imply.
            assert!(row.ratios.gross_margin_pct > Decimal::ZERO);
            assert!(row.ratios.gross_margin_pct < dec!(100));
            assert!(row.ratios.net_margin_pct > Decimal::ZERO);
            assert!(row.ratios.net_margin_pct < row.ratios.gross_margin_pct);
        }
    }

    #[test]
    fn test_analyze_ratios_unknown_year() {
        let dataset = FinancialDataset::builtin();
        let err = analyze_ratios(&dataset, FiscalYear(2019)).unwrap_err();
        assert!(matches!(err, FinStatError::NotFound { .. }));
    }

    #[test]
    fn test_gross_margin_mismatch_warns() {
        let mut pl = sample_profit_loss();
        pl.gross_margin = dec!(599_000);
        let bs = sample_balance_sheet();
        let dataset = FinancialDataset::new(
            "WarnCo",
            BTreeMap::from([(FiscalYear(2024), bs)]),
            BTreeMap::from([(FiscalYear(2024), pl)]),
            BTreeMap::new(),
        )
        .unwrap();
        let output = analyze_ratios(&dataset, FiscalYear(2024)).unwrap();
        assert_eq!(output.warnings.len(), 1);
        assert!(output.warnings[0].contains("gross margin"));
    }
}
