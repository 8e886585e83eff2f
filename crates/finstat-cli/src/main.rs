mod commands;
mod format;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use finstat_core::dataset::FinancialDataset;

use commands::benchmark::BenchmarkArgs;
use commands::cash_flow::CashFlowArgs;
use commands::growth::GrowthArgs;
use commands::ratios::RatiosArgs;
use commands::report::ReportArgs;
use commands::summary::SummaryArgs;

/// Financial statement analysis with decimal precision
#[derive(Parser)]
#[command(
    name = "finstat",
    version,
    about = "Financial statement ratio analysis",
    long_about = "Analyse a company's balance-sheet, profit & loss and cash-flow figures \
                  with decimal precision. Computes liquidity, solvency and profitability \
                  ratios, year-over-year growth, health assessments, peer benchmarks and \
                  a plain-text report."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Path to a JSON dataset file (defaults to piped stdin, then the
    /// embedded sample company)
    #[arg(long, global = true)]
    data: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ratio report for one fiscal year
    Ratios(RatiosArgs),
    /// Year-over-year growth figures
    Growth(GrowthArgs),
    /// Ratio table across all dataset years
    Trends,
    /// Key figures, health labels and recommendations
    Summary(SummaryArgs),
    /// Cash-flow statement for one fiscal year
    CashFlow(CashFlowArgs),
    /// Compare ratios against peer benchmarks
    Benchmark(BenchmarkArgs),
    /// Render the plain-text financial report
    Report(ReportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("finstat {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let dataset = match load_dataset(cli.data.as_deref()) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Ratios(args) => commands::ratios::run_ratios(args, &dataset),
        Commands::Growth(args) => commands::growth::run_growth(args, &dataset),
        Commands::Trends => commands::trends::run_trends(&dataset),
        Commands::Summary(args) => commands::summary::run_summary(args, &dataset),
        Commands::CashFlow(args) => commands::cash_flow::run_cash_flow(args, &dataset),
        Commands::Benchmark(args) => commands::benchmark::run_benchmark(args, &dataset),
        // The report command renders text, not a JSON value, so it bypasses
        // the shared output formatters.
        Commands::Report(args) => match commands::report::run_report(args, &dataset) {
            Ok(text) => {
                println!("{}", text);
                process::exit(0);
            }
            Err(e) => Err(e),
        },
        Commands::Version => unreachable!(),
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

/// Resolve the dataset: explicit file, then piped stdin, then the embedded
/// sample company.
fn load_dataset(path: Option<&str>) -> Result<FinancialDataset, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return input::file::read_dataset(path);
    }
    if let Some(dataset) = input::stdin::read_stdin_dataset()? {
        return Ok(dataset);
    }
    Ok(FinancialDataset::builtin())
}
