use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Instant;

use crate::dataset::FinancialDataset;
use crate::ratios::{compute_ratios, RatioReport};
use crate::types::{with_metadata, ComputationOutput, FiscalYear, Money, Rate};
use crate::FinStatResult;

/// Qualitative labels for one year's ratio report, one per health
/// dimension the reporting layer displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthAssessment {
    /// Current-ratio based: "Excellent", "Good", or "Needs attention"
    pub liquidity: String,
    /// Solvency based: "Very healthy", "Healthy", or "At risk"
    pub solvency: String,
    /// ROE based: "Excellent", "Good", or "Moderate"
    pub return_on_equity: String,
    /// "Positive" or "Negative"
    pub working_capital: String,
}

/// Peer figures used for the benchmark comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryBenchmarks {
    pub net_margin_pct: Rate,
    pub return_on_equity_pct: Rate,
    pub current_ratio: Rate,
    pub solvency_pct: Rate,
}

impl IndustryBenchmarks {
    /// Industry averages.
    pub fn industry_average() -> Self {
        IndustryBenchmarks {
            net_margin_pct: dec!(15),
            return_on_equity_pct: dec!(25),
            current_ratio: dec!(1.5),
            solvency_pct: dec!(40),
        }
    }

    /// Top-quartile performers.
    pub fn top_performers() -> Self {
        IndustryBenchmarks {
            net_margin_pct: dec!(25),
            return_on_equity_pct: dec!(35),
            current_ratio: dec!(2.0),
            solvency_pct: dec!(50),
        }
    }
}

impl Default for IndustryBenchmarks {
    fn default() -> Self {
        Self::industry_average()
    }
}

/// Per-metric deltas against a peer set. Positive = better than peers for
/// every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub net_margin_vs_peers: Decimal,
    pub return_on_equity_vs_peers: Decimal,
    pub current_ratio_vs_peers: Decimal,
    pub solvency_vs_peers: Decimal,
    /// "Ahead of peers", "In line with peers", or "Behind peers"
    pub overall_position: String,
}

/// Classify one year's ratios into the health labels.
pub fn assess_health(ratios: &RatioReport) -> HealthAssessment {
    HealthAssessment {
        liquidity: classify_current_ratio(ratios.current_ratio),
        solvency: classify_solvency(ratios.solvency_pct),
        return_on_equity: classify_return_on_equity(ratios.return_on_equity_pct),
        working_capital: classify_working_capital(ratios.working_capital),
    }
}

/// Current ratio: >= 2 excellent, >= 1.5 good, below that short-term
/// obligations deserve attention.
fn classify_current_ratio(value: Rate) -> String {
    if value >= dec!(2) {
        "Excellent".to_string()
    } else if value >= dec!(1.5) {
        "Good".to_string()
    } else {
        "Needs attention".to_string()
    }
}

/// Solvency: >= 50% very healthy, >= 30% healthy, below that the capital
/// position is at risk.
fn classify_solvency(pct: Rate) -> String {
    if pct >= dec!(50) {
        "Very healthy".to_string()
    } else if pct >= dec!(30) {
        "Healthy".to_string()
    } else {
        "At risk".to_string()
    }
}

/// Return on equity: >= 20% excellent, >= 15% good, below that moderate.
fn classify_return_on_equity(pct: Rate) -> String {
    if pct >= dec!(20) {
        "Excellent".to_string()
    } else if pct >= dec!(15) {
        "Good".to_string()
    } else {
        "Moderate".to_string()
    }
}

fn classify_working_capital(value: Money) -> String {
    if value > Decimal::ZERO {
        "Positive".to_string()
    } else {
        "Negative".to_string()
    }
}

/// Compare one year's ratios against a peer set.
pub fn compare_to_benchmarks(
    ratios: &RatioReport,
    bench: &IndustryBenchmarks,
) -> BenchmarkComparison {
    let net_margin_vs = ratios.net_margin_pct - bench.net_margin_pct;
    let roe_vs = ratios.return_on_equity_pct - bench.return_on_equity_pct;
    let current_ratio_vs = ratios.current_ratio - bench.current_ratio;
    let solvency_vs = ratios.solvency_pct - bench.solvency_pct;

    let ahead_count = [net_margin_vs, roe_vs, current_ratio_vs, solvency_vs]
        .iter()
        .filter(|v| **v > Decimal::ZERO)
        .count();
    let behind_count = [net_margin_vs, roe_vs, current_ratio_vs, solvency_vs]
        .iter()
        .filter(|v| **v < Decimal::ZERO)
        .count();

    let overall_position = if ahead_count >= 3 {
        "Ahead of peers".to_string()
    } else if behind_count >= 3 {
        "Behind peers".to_string()
    } else {
        "In line with peers".to_string()
    };

    BenchmarkComparison {
        net_margin_vs_peers: net_margin_vs,
        return_on_equity_vs_peers: roe_vs,
        current_ratio_vs_peers: current_ratio_vs,
        solvency_vs_peers: solvency_vs,
        overall_position,
    }
}

/// Envelope-wrapped benchmark comparison for one dataset year.
pub fn analyze_benchmark(
    dataset: &FinancialDataset,
    year: FiscalYear,
    bench: &IndustryBenchmarks,
) -> FinStatResult<ComputationOutput<BenchmarkComparison>> {
    let start = Instant::now();

    let bs = dataset.balance_sheet(year)?;
    let pl = dataset.profit_loss(year)?;
    let ratios = compute_ratios(bs, pl)?;
    let comparison = compare_to_benchmarks(&ratios, bench);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Peer Benchmark Comparison",
        &json!({ "company": dataset.company_name(), "year": year, "benchmarks": bench }),
        Vec::new(),
        elapsed,
        comparison,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_current_ratio_thresholds() {
        assert_eq!(classify_current_ratio(dec!(2.0)), "Excellent");
        assert_eq!(classify_current_ratio(dec!(1.5)), "Good");
        assert_eq!(classify_current_ratio(dec!(1.49)), "Needs attention");
    }

    #[test]
    fn test_solvency_thresholds() {
        assert_eq!(classify_solvency(dec!(50)), "Very healthy");
        assert_eq!(classify_solvency(dec!(30)), "Healthy");
        assert_eq!(classify_solvency(dec!(29.9)), "At risk");
    }

    #[test]
    fn test_builtin_2024_health() {
        let dataset = FinancialDataset::builtin();
        let bs = dataset.balance_sheet(FiscalYear(2024)).unwrap();
        let pl = dataset.profit_loss(FiscalYear(2024)).unwrap();
        let ratios = compute_ratios(bs, pl).unwrap();
        let health = assess_health(&ratios);
        // Current ratio ~1.84, solvency ~59.4%, ROE ~110%, positive WC
        assert_eq!(health.liquidity, "Good");
        assert_eq!(health.solvency, "Very healthy");
        assert_eq!(health.return_on_equity, "Excellent");
        assert_eq!(health.working_capital, "Positive");
    }

    #[test]
    fn test_builtin_2024_ahead_of_industry_average() {
        let dataset = FinancialDataset::builtin();
        let output = analyze_benchmark(
            &dataset,
            FiscalYear(2024),
            &IndustryBenchmarks::industry_average(),
        )
        .unwrap();
        assert_eq!(output.result.overall_position, "Ahead of peers");
        assert!(output.result.net_margin_vs_peers > Decimal::ZERO);
    }

    #[test]
    fn test_mixed_position_is_in_line() {
        let ratios = RatioReport {
            current_ratio: dec!(1.6),
            quick_ratio: dec!(1.6),
            solvency_pct: dec!(45),
            return_on_equity_pct: dec!(20),
            return_on_assets_pct: dec!(10),
            net_margin_pct: dec!(10),
            gross_margin_pct: dec!(40),
            working_capital: dec!(1_000),
        };
        let comparison =
            compare_to_benchmarks(&ratios, &IndustryBenchmarks::industry_average());
        // Ahead on current ratio and solvency, behind on margin and ROE
        assert_eq!(comparison.overall_position, "In line with peers");
    }
}
