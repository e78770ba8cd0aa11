//! CLI commands for running projections
//!
//! Provides `run`, which computes and prints or exports a scenario's ledger,
//! and `init`, which writes a starting scenario file.

use crate::config::Settings;
use crate::error::{CashflowError, CashflowResult};
use crate::export::{export_ledger_json, export_ledger_yaml};
use crate::reports::CashflowReport;
use crate::services::{MonetizationModel, Scenario};
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal table with summary and charts
    Table,
    /// CSV, one row per month
    Csv,
    /// JSON ledger export
    Json,
    /// YAML ledger export, human-readable
    Yaml,
}

/// Monetization model choices for new scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelChoice {
    /// Per-class instructor cost in 4-week blocks
    WeeklyChunks,
    /// Hourly instructor cost at a flat rate
    FlatRate,
}

/// Arguments of `run`
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Scenario file (.yaml, .yml or .json)
    pub scenario: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Write to a file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Leave the text charts out of the table output
    #[arg(long)]
    pub no_charts: bool,

    /// Compact JSON output
    #[arg(long)]
    pub compact: bool,
}

/// Arguments of `init`
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Scenario file to create (.yaml, .yml or .json)
    pub scenario: PathBuf,

    /// Scenario name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Monetization model
    #[arg(short, long, value_enum, default_value = "weekly-chunks")]
    pub model: ModelChoice,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Handle the run command
pub fn handle_run_command(settings: &Settings, args: RunArgs) -> CashflowResult<()> {
    let mut scenario = Scenario::load(&args.scenario)?;
    scenario.apply_defaults(settings);

    let report = CashflowReport::generate(&scenario, &settings.currency_symbol)?;
    let show_charts = settings.show_charts && !args.no_charts;

    match args.output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                CashflowError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            write_report(&report, args.format, show_charts, !args.compact, &mut writer)?;
            writer
                .flush()
                .map_err(|e| CashflowError::Export(e.to_string()))?;
            println!("Cash flow report exported to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_report(&report, args.format, show_charts, !args.compact, &mut writer)?;
        }
    }

    Ok(())
}

/// Write a report in the requested format
pub fn write_report<W: Write>(
    report: &CashflowReport,
    format: OutputFormat,
    show_charts: bool,
    pretty: bool,
    writer: &mut W,
) -> CashflowResult<()> {
    match format {
        OutputFormat::Table => write!(writer, "{}", report.format_terminal(show_charts))
            .map_err(|e| CashflowError::Export(e.to_string())),
        OutputFormat::Csv => report.export_csv(writer),
        OutputFormat::Json => export_ledger_json(report, writer, pretty),
        OutputFormat::Yaml => export_ledger_yaml(report, writer),
    }
}

/// Handle the init command
pub fn handle_init_command(settings: &Settings, args: InitArgs) -> CashflowResult<()> {
    if args.scenario.exists() && !args.force {
        return Err(CashflowError::Duplicate {
            entity_type: "Scenario file",
            identifier: format!("{} (use --force to overwrite)", args.scenario.display()),
        });
    }

    let mut scenario = Scenario::template(settings);
    if let Some(name) = args.name {
        scenario.name = name;
    }
    if args.model == ModelChoice::FlatRate {
        scenario.model = MonetizationModel::FlatRate(settings.flat_rate);
    }

    scenario.save(&args.scenario)?;
    info!(path = %args.scenario.display(), "created scenario");

    println!("Created scenario: {}", args.scenario.display());
    println!(
        "  {} courses in the catalog, model: {}",
        scenario.active_catalog().len(),
        scenario.model.label()
    );
    println!(
        "  Fixed costs: {} per month",
        settings.format_money(scenario.fixed_cost_profile()?.monthly_total())
    );
    println!();
    println!(
        "Schedule courses with: cashflow schedule add --scenario {} <COURSE> --month <M> --enrollment <N>",
        args.scenario.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scheduled_scenario(temp_dir: &TempDir) -> PathBuf {
        let path = temp_dir.path().join("plan.yaml");
        let settings = Settings::default();
        let mut scenario = Scenario::template(&settings);
        scenario.schedule_course("Odontología", 3, 10, &settings).unwrap();
        scenario.save(&path).unwrap();
        path
    }

    #[test]
    fn test_write_report_formats() {
        let temp_dir = TempDir::new().unwrap();
        let scenario = Scenario::load(&scheduled_scenario(&temp_dir)).unwrap();
        let report = CashflowReport::generate(&scenario, "$").unwrap();

        let mut table = Vec::new();
        write_report(&report, OutputFormat::Table, false, true, &mut table).unwrap();
        assert!(String::from_utf8(table).unwrap().contains("March"));

        let mut csv = Vec::new();
        write_report(&report, OutputFormat::Csv, false, true, &mut csv).unwrap();
        let csv = String::from_utf8(csv).unwrap();
        assert!(csv.contains("3,March,750.00,400.00,400.00,800.00,800.00,-850.00,-2450.00"));

        let mut json = Vec::new();
        write_report(&report, OutputFormat::Json, false, false, &mut json).unwrap();
        assert!(String::from_utf8(json).unwrap().starts_with('{'));
    }

    #[test]
    fn test_run_writes_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let scenario = scheduled_scenario(&temp_dir);
        let output = temp_dir.path().join("ledger.csv");

        handle_run_command(
            &Settings::default(),
            RunArgs {
                scenario,
                format: OutputFormat::Csv,
                output: Some(output.clone()),
                no_charts: false,
                compact: false,
            },
        )
        .unwrap();

        let contents = std::fs::read_to_string(output).unwrap();
        assert_eq!(contents.lines().count(), 13);
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plan.yaml");
        let args = |force| InitArgs {
            scenario: path.clone(),
            name: Some("Plan".into()),
            model: ModelChoice::FlatRate,
            force,
        };

        handle_init_command(&Settings::default(), args(false)).unwrap();
        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.name, "Plan");
        assert_eq!(scenario.model.label(), "flat rate");

        let err = handle_init_command(&Settings::default(), args(false)).unwrap_err();
        assert!(matches!(err, CashflowError::Duplicate { .. }));

        handle_init_command(&Settings::default(), args(true)).unwrap();
    }
}
