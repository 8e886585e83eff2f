use clap::Args;
use std::fmt::Write as _;
use std::fs;

use finstat_core::dataset::FinancialDataset;
use finstat_core::summary::{self, CompanySummary};
use finstat_core::types::FiscalYear;

use crate::commands::resolve_year;
use crate::format::{format_currency, format_pct, format_ratio, format_signed_pct};

/// Arguments for the plain-text report
#[derive(Args)]
pub struct ReportArgs {
    /// Fiscal year, e.g. 2024 (defaults to the latest dataset year)
    #[arg(long)]
    pub year: Option<FiscalYear>,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub out: Option<String>,
}

pub fn run_report(
    args: ReportArgs,
    dataset: &FinancialDataset,
) -> Result<String, Box<dyn std::error::Error>> {
    let year = resolve_year(args.year, dataset)?;
    let output = summary::analyze_summary(dataset, year)?;
    let text = render_report(dataset, &output.result);

    if let Some(path) = args.out {
        fs::write(&path, &text)?;
        return Ok(format!("Report written to {path}"));
    }
    Ok(text)
}

/// Render the summary as the downloadable plain-text report.
fn render_report(dataset: &FinancialDataset, summary: &CompanySummary) -> String {
    let mut out = String::new();

    let title = format!(
        "{} FINANCIAL REPORT {}",
        summary.company_name.to_uppercase(),
        summary.year
    );
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out);

    section(&mut out, "KEY FIGURES");
    let kf = &summary.key_figures;
    let _ = writeln!(out, "Net revenue: {}", format_currency(kf.net_revenue));
    let _ = writeln!(out, "Net profit: {}", format_currency(kf.net_profit));
    let _ = writeln!(out, "Equity: {}", format_currency(kf.equity));
    let _ = writeln!(out, "Cash: {}", format_currency(kf.cash));
    let _ = writeln!(out);

    if let Some(growth) = &summary.growth {
        section(&mut out, &format!("GROWTH VS {}", growth.previous_year));
        let _ = writeln!(
            out,
            "Net revenue: {}",
            format_signed_pct(growth.revenue_growth_pct)
        );
        let _ = writeln!(
            out,
            "Net profit: {}",
            format_signed_pct(growth.net_profit_growth_pct)
        );
        let _ = writeln!(out, "Equity: {}", format_signed_pct(growth.equity_growth_pct));
        let _ = writeln!(out, "Cash: {}", format_signed_pct(growth.cash_growth_pct));
        let _ = writeln!(out);
    }

    section(&mut out, "RATIOS");
    let r = &summary.ratios;
    let _ = writeln!(out, "Current ratio: {}", format_ratio(r.current_ratio));
    let _ = writeln!(out, "Quick ratio: {}", format_ratio(r.quick_ratio));
    let _ = writeln!(out, "Solvency: {}", format_pct(r.solvency_pct));
    let _ = writeln!(out, "Return on equity: {}", format_pct(r.return_on_equity_pct));
    let _ = writeln!(out, "Return on assets: {}", format_pct(r.return_on_assets_pct));
    let _ = writeln!(out, "Net margin: {}", format_pct(r.net_margin_pct));
    let _ = writeln!(out, "Gross margin: {}", format_pct(r.gross_margin_pct));
    let _ = writeln!(out, "Working capital: {}", format_currency(r.working_capital));
    let _ = writeln!(out);

    if let Some(cf) = dataset.cash_flow(summary.year) {
        section(&mut out, "CASH FLOW");
        let _ = writeln!(out, "Operating: {}", format_currency(cf.operating));
        let _ = writeln!(out, "Investing: {}", format_currency(cf.investing));
        let _ = writeln!(out, "Financing: {}", format_currency(cf.financing));
        let _ = writeln!(out, "Net: {}", format_currency(cf.net));
        let _ = writeln!(out);
    }

    section(&mut out, "ASSESSMENT");
    let h = &summary.health;
    let _ = writeln!(out, "Liquidity: {}", h.liquidity);
    let _ = writeln!(out, "Solvency: {}", h.solvency);
    let _ = writeln!(out, "Return on equity: {}", h.return_on_equity);
    let _ = writeln!(out, "Working capital: {}", h.working_capital);
    let _ = writeln!(out);

    section(&mut out, "STRENGTHS");
    for item in &summary.strengths {
        let _ = writeln!(out, "- {item}");
    }
    let _ = writeln!(out);

    section(&mut out, "ATTENTION POINTS");
    for item in &summary.attention_points {
        let _ = writeln!(out, "- {item}");
    }

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(title.len()));
}
