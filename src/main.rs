use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use course_cashflow::cli::{
    handle_catalog_command, handle_init_command, handle_run_command, handle_schedule_command,
    CatalogCommands, InitArgs, RunArgs, ScheduleCommands,
};
use course_cashflow::config::{paths::CashflowPaths, settings::Settings};
use course_cashflow::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "cashflow",
    version,
    about = "Twelve-month cash flow projection for course programs",
    long_about = "cashflow projects the monthly revenue, launch and instructor costs, \
                  fixed overhead and cumulative result of a schedule of courses \
                  over a twelve-month window."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a scenario's ledger and print or export it
    Run(RunArgs),

    /// Write a starting scenario file
    Init(InitArgs),

    /// Course catalog commands
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Course schedule commands
    #[command(subcommand)]
    Schedule(ScheduleCommands),

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the settings file
        #[arg(long)]
        save: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and settings
    let paths = CashflowPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Run(args)) => handle_run_command(&settings, args)?,
        Some(Commands::Init(args)) => handle_init_command(&settings, args)?,
        Some(Commands::Catalog(cmd)) => handle_catalog_command(&settings, cmd)?,
        Some(Commands::Schedule(cmd)) => handle_schedule_command(&settings, cmd)?,
        Some(Commands::Config { save }) => {
            if save {
                settings.save(&paths)?;
            }

            println!("Course Cash Flow Configuration");
            println!("==============================");
            println!("Config directory: {}", paths.config_dir().display());
            println!(
                "Settings file:    {}{}",
                paths.settings_file().display(),
                if paths.is_initialized() { "" } else { " (not written, using defaults)" }
            );
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Show charts:     {}", settings.show_charts);
            println!("  Run costs:");
            println!(
                "    Coordinator:           {}",
                settings.format_money(settings.instance_costs.coordinator)
            );
            println!(
                "    Secondary coordinator: {}",
                settings.format_money(settings.instance_costs.secondary_coordinator)
            );
            println!(
                "    Per class:             {}",
                settings.format_money(settings.instance_costs.per_class_instructor)
            );
            println!("  Fixed costs per month:");
            for (label, amount) in settings.fixed_costs.items() {
                println!("    {:<22} {}", format!("{}:", label), settings.format_money(amount));
            }
            println!(
                "    {:<22} {}",
                "Total:",
                settings.format_money(settings.fixed_costs.monthly_total())
            );
            println!("  Flat rate:");
            println!(
                "    Hourly rate:           {}",
                settings.format_money(settings.flat_rate.hourly_rate)
            );
        }
        None => {
            println!("cashflow - course cash flow projection");
            println!();
            println!("Run 'cashflow --help' for usage information.");
            println!("Run 'cashflow init plan.yaml' to create a scenario.");
        }
    }

    Ok(())
}
