use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use itax_cli::logging::init_tracing;
use itax_cli::report::{ScenarioOutcome, SlabTableReport};
use itax_core::{
    DeductionInputs, FinancialYear, Regime, RegimeComparison, RegimeTaxOrchestrator,
    SalaryDetails,
};
use itax_data::{Scenario, csv_loader, parse_decimal, scenario};
use rust_decimal::Decimal;
use tracing::{debug, info};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indian income tax calculator comparing the new and old regimes.
#[derive(Debug, Parser)]
#[command(name = "itax", version, about, long_about = None)]
struct Cli {
    /// Log calculation details (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute both regimes and recommend the cheaper one.
    Compare(CompareArgs),

    /// Print the slab tables.
    Slabs {
        /// Only print this regime (`new` or `old`).
        #[arg(long, value_parser = parse_regime)]
        regime: Option<Regime>,

        /// Financial year, e.g. `2025-26`.
        #[arg(long, default_value = "2025-26", value_parser = parse_year)]
        year: FinancialYear,
    },
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("input").required(true).args(["scenario", "csv", "income"])))]
struct CompareArgs {
    /// TOML scenario file.
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// CSV file with one scenario per row.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Gross annual income, compared with no deductions.
    #[arg(long, value_parser = parse_decimal)]
    income: Option<Decimal>,

    /// Print JSON instead of a text report.
    #[arg(long)]
    json: bool,
}

fn parse_regime(s: &str) -> Result<Regime, String> {
    Regime::parse(s).ok_or_else(|| format!("unknown regime '{s}', expected 'new' or 'old'"))
}

fn parse_year(s: &str) -> Result<FinancialYear, String> {
    FinancialYear::parse(s).ok_or_else(|| format!("invalid financial year '{s}'"))
}

// ─── commands ────────────────────────────────────────────────────────────────

fn load_scenarios(args: &CompareArgs) -> Result<Vec<Scenario>> {
    if let Some(path) = &args.scenario {
        let s = scenario::load_from_file(path)
            .with_context(|| format!("Failed to load scenario: {}", path.display()))?;
        return Ok(vec![s]);
    }
    if let Some(path) = &args.csv {
        return csv_loader::load_from_file(path)
            .with_context(|| format!("Failed to load CSV: {}", path.display()));
    }
    let income = args.income.unwrap_or_default();
    Ok(vec![Scenario {
        name: "Quick comparison".to_string(),
        financial_year: FinancialYear::FY_2025_26,
        gross_income: income,
        salary: SalaryDetails::default(),
        deductions: DeductionInputs::default(),
    }])
}

fn compare(args: &CompareArgs) -> Result<()> {
    let scenarios = load_scenarios(args)?;
    info!("Comparing {} scenario(s)", scenarios.len());

    let comparisons = scenarios
        .iter()
        .map(|s| {
            let engine = RegimeTaxOrchestrator::for_year(s.financial_year)
                .with_context(|| format!("Scenario '{}'", s.name))?;
            debug!(scenario = %s.name, fy = %s.financial_year, "running comparison");
            Ok(engine.compare(s.gross_income, &s.deductions, &s.salary))
        })
        .collect::<Result<Vec<RegimeComparison>>>()?;

    let outcomes: Vec<ScenarioOutcome<'_>> = scenarios
        .iter()
        .zip(&comparisons)
        .map(|(scenario, comparison)| ScenarioOutcome {
            scenario,
            comparison,
        })
        .collect();

    if args.json {
        let json = serde_json::to_string_pretty(&outcomes).context("Failed to serialise results")?;
        println!("{json}");
    } else {
        for (i, outcome) in outcomes.iter().enumerate() {
            if i > 0 {
                println!();
            }
            print!("{outcome}");
        }
    }

    Ok(())
}

fn slabs(
    regime: Option<Regime>,
    year: FinancialYear,
) -> Result<()> {
    let engine = RegimeTaxOrchestrator::for_year(year)?;
    let regimes = match regime {
        Some(r) => vec![r],
        None => Regime::ALL.to_vec(),
    };

    for (i, r) in regimes.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        print!("{}", SlabTableReport(engine.slab_table(r)));
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Command::Compare(args) => compare(args),
        Command::Slabs { regime, year } => slabs(*regime, *year),
    }
}
