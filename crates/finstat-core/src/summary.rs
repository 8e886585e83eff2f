use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;

use crate::dataset::FinancialDataset;
use crate::growth::{growth_for, GrowthReport};
use crate::health::{assess_health, HealthAssessment};
use crate::ratios::{check_statement_consistency, compute_ratios, RatioReport};
use crate::types::{with_metadata, ComputationOutput, FiscalYear, Money};
use crate::FinStatResult;

/// The headline figures for one fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFigures {
    pub net_revenue: Money,
    pub net_profit: Money,
    pub equity: Money,
    pub cash: Money,
}

/// Everything the reporting layer needs for one year: key figures, growth
/// (absent for the earliest year), ratios, health labels and the narrative
/// recommendation lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub company_name: String,
    pub year: FiscalYear,
    pub key_figures: KeyFigures,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth: Option<GrowthReport>,
    pub ratios: RatioReport,
    pub health: HealthAssessment,
    pub strengths: Vec<String>,
    pub attention_points: Vec<String>,
}

/// Assemble the full company summary for one dataset year.
pub fn analyze_summary(
    dataset: &FinancialDataset,
    year: FiscalYear,
) -> FinStatResult<ComputationOutput<CompanySummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let bs = dataset.balance_sheet(year)?;
    let pl = dataset.profit_loss(year)?;
    check_statement_consistency(pl, dataset.cash_flow(year), year, &mut warnings);

    let key_figures = KeyFigures {
        net_revenue: pl.net_revenue,
        net_profit: pl.net_profit,
        equity: bs.equity,
        cash: bs.cash,
    };
    let growth = growth_for(dataset, year)?;
    let ratios = compute_ratios(bs, pl)?;
    let health = assess_health(&ratios);
    let (strengths, attention_points) =
        build_recommendations(dataset, year, &ratios, growth.as_ref())?;

    let summary = CompanySummary {
        company_name: dataset.company_name().to_string(),
        year,
        key_figures,
        growth,
        ratios,
        health,
        strengths,
        attention_points,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Company Summary (key figures, health, recommendations)",
        &json!({ "company": dataset.company_name(), "year": year }),
        warnings,
        elapsed,
        summary,
    ))
}

/// Threshold-driven narrative lists. Strengths and attention points mirror
/// what an analyst would call out from the same figures.
fn build_recommendations(
    dataset: &FinancialDataset,
    year: FiscalYear,
    ratios: &RatioReport,
    growth: Option<&GrowthReport>,
) -> FinStatResult<(Vec<String>, Vec<String>)> {
    let bs = dataset.balance_sheet(year)?;
    let pl = dataset.profit_loss(year)?;

    let mut strengths = Vec::new();
    let mut attention_points = Vec::new();

    if let Some(g) = growth {
        if g.revenue_growth_pct >= dec!(15) {
            strengths.push(format!(
                "Net revenue grew {:.1}% year over year.",
                g.revenue_growth_pct
            ));
        }
        if g.net_profit_growth_pct >= dec!(15) {
            strengths.push(format!(
                "Net profit grew {:.1}% year over year.",
                g.net_profit_growth_pct
            ));
        }
    }
    if ratios.net_margin_pct >= dec!(20) {
        strengths.push(format!(
            "Net margin of {:.1}% indicates strong profitability.",
            ratios.net_margin_pct
        ));
    }
    if ratios.solvency_pct >= dec!(50) {
        strengths.push(format!(
            "Solvency of {:.1}% gives a solid capital position.",
            ratios.solvency_pct
        ));
    }
    if ratios.current_ratio >= dec!(1.5) {
        strengths.push(format!(
            "Liquidity is comfortable (current ratio {:.2}).",
            ratios.current_ratio
        ));
    }
    if !pl.net_revenue.is_zero() && bs.cash / pl.net_revenue >= dec!(0.15) {
        strengths.push(
            "The cash position leaves ample room for expansion, product investment \
             or acquisitions."
                .to_string(),
        );
    }

    if ratios.current_ratio < dec!(1.5) {
        attention_points.push(
            "Current ratio is below 1.5; monitor short-term obligations.".to_string(),
        );
    }
    if ratios.working_capital <= dec!(0) {
        attention_points.push(
            "Working capital is not positive; current liabilities exceed current assets."
                .to_string(),
        );
    }
    if ratios.return_on_equity_pct < dec!(15) {
        attention_points.push(format!(
            "Return on equity of {:.1}% is moderate.",
            ratios.return_on_equity_pct
        ));
    }
    if let Some(g) = growth {
        let prev_pl = dataset.profit_loss(g.previous_year)?;
        let prev_bs = dataset.balance_sheet(g.previous_year)?;
        if !prev_pl.operating_expenses.is_zero() && !prev_pl.net_revenue.is_zero() {
            let opex_growth = (pl.operating_expenses - prev_pl.operating_expenses)
                / prev_pl.operating_expenses;
            let revenue_growth =
                (pl.net_revenue - prev_pl.net_revenue) / prev_pl.net_revenue;
            if opex_growth > revenue_growth {
                attention_points.push(
                    "Operating expenses are growing faster than revenue.".to_string(),
                );
            }
        }
        if bs.fixed_assets() < prev_bs.fixed_assets() {
            attention_points.push(
                "Investment in fixed assets declined versus the prior year.".to_string(),
            );
        }
    }

    if attention_points.is_empty() {
        attention_points.push(
            "No immediate attention points; the metrics are within healthy ranges."
                .to_string(),
        );
    }

    Ok((strengths, attention_points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builtin_2024_summary() {
        let dataset = FinancialDataset::builtin();
        let output = analyze_summary(&dataset, FiscalYear(2024)).unwrap();
        let summary = output.result;

        assert_eq!(summary.year, FiscalYear(2024));
        assert_eq!(summary.key_figures.net_revenue, dec!(44_788_100));
        assert!(summary.growth.is_some());
        assert!(summary
            .strengths
            .iter()
            .any(|s| s.contains("revenue grew")));
        // 2024 builtin figures trip none of the warning thresholds
        assert_eq!(
            summary.attention_points,
            vec![
                "No immediate attention points; the metrics are within healthy ranges."
                    .to_string()
            ]
        );
    }

    #[test]
    fn test_earliest_year_has_no_growth_section() {
        let dataset = FinancialDataset::builtin();
        let summary = analyze_summary(&dataset, FiscalYear(2022)).unwrap().result;
        assert_eq!(summary.growth, None);
        // 2022: current ratio ~0.92, solvency ~24% -> both flagged
        assert!(summary
            .attention_points
            .iter()
            .any(|s| s.contains("Current ratio")));
        assert!(summary
            .attention_points
            .iter()
            .any(|s| s.contains("Working capital")));
    }

    #[test]
    fn test_unknown_year_is_not_found() {
        let dataset = FinancialDataset::builtin();
        let err = analyze_summary(&dataset, FiscalYear(2019)).unwrap_err();
        assert!(matches!(err, crate::FinStatError::NotFound { .. }));
    }
}
