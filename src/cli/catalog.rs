//! Catalog CLI commands
//!
//! Implements CLI commands for listing course templates and for editing the
//! catalog stored in a scenario file.

use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::display::catalog::{format_catalog_list, format_course_details};
use crate::error::{CashflowError, CashflowResult};
use crate::models::{CourseCatalogEntry, CourseCategory, CourseInstance, CourseUpdate, Money};
use crate::services::Scenario;

/// Catalog subcommands
#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// List all courses
    List {
        /// Scenario whose catalog to list (built-in catalog if omitted)
        #[arg(short, long)]
        scenario: Option<PathBuf>,
    },

    /// Show course details and its month-by-month class plan
    Show {
        /// Course name
        course: String,
        /// Scenario whose catalog and costs to use
        #[arg(short, long)]
        scenario: Option<PathBuf>,
        /// Start month (1-12) for the sample schedule
        #[arg(short = 'm', long, default_value_t = 1)]
        start_month: u32,
    },

    /// Add a course to a scenario's catalog
    Add {
        /// Scenario file to edit
        #[arg(short, long)]
        scenario: PathBuf,
        /// Course name
        name: String,
        /// Price per enrollment (e.g., "150" or "79.50")
        #[arg(short, long)]
        price: String,
        /// Duration in weeks (may be fractional, e.g. 9.5)
        #[arg(short, long)]
        weeks: f64,
        /// Classes per week
        #[arg(short, long, default_value_t = 1)]
        classes_per_week: u32,
        /// Category: small, large or any other tag
        #[arg(long, default_value = "small")]
        category: String,
    },

    /// Edit a course in a scenario's catalog
    Edit {
        /// Scenario file to edit
        #[arg(short, long)]
        scenario: PathBuf,
        /// Course name
        course: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New price
        #[arg(short, long)]
        price: Option<String>,
        /// New duration in weeks
        #[arg(short, long)]
        weeks: Option<f64>,
        /// New classes per week
        #[arg(short, long)]
        classes_per_week: Option<u32>,
        /// New category
        #[arg(long)]
        category: Option<String>,
    },

    /// Remove a course from a scenario's catalog
    Remove {
        /// Scenario file to edit
        #[arg(short, long)]
        scenario: PathBuf,
        /// Course name
        course: String,
        /// Also remove the course's scheduled runs
        #[arg(long)]
        force: bool,
    },
}

/// Handle a catalog command
pub fn handle_catalog_command(settings: &Settings, cmd: CatalogCommands) -> CashflowResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        CatalogCommands::List { scenario } => {
            let scenario = load_or_default(scenario.as_deref(), settings)?;
            println!("{}", format_catalog_list(&scenario.active_catalog(), symbol));
        }

        CatalogCommands::Show {
            course,
            scenario,
            start_month,
        } => {
            let scenario = load_or_default(scenario.as_deref(), settings)?;
            let entry = scenario.active_catalog().lookup(&course)?;
            let sample = CourseInstance::with_costs(
                entry.clone(),
                start_month,
                0,
                scenario.instance_costs.unwrap_or(settings.instance_costs),
            )?;
            print!("{}", format_course_details(&entry, &sample, symbol));
        }

        CatalogCommands::Add {
            scenario: path,
            name,
            price,
            weeks,
            classes_per_week,
            category,
        } => {
            let mut scenario = Scenario::load(&path)?;
            let entry = CourseCatalogEntry::new(
                name,
                parse_price(&price)?,
                weeks,
                classes_per_week,
                category.parse()?,
            )?;

            let added = scenario.catalog_mut().add(entry)?;
            scenario.save(&path)?;

            println!("Added course: {}", added.name);
            println!("  Price: {}", added.price.format_with_symbol(symbol));
            println!(
                "  {} weeks, {} class(es) per week, {} month(s)",
                added.duration_weeks,
                added.classes_per_week,
                added.months_spanned()
            );
        }

        CatalogCommands::Edit {
            scenario: path,
            course,
            name,
            price,
            weeks,
            classes_per_week,
            category,
        } => {
            let update = CourseUpdate {
                name,
                price: price.as_deref().map(parse_price).transpose()?,
                duration_weeks: weeks,
                classes_per_week,
                category: category
                    .as_deref()
                    .map(str::parse::<CourseCategory>)
                    .transpose()?,
            };

            if update.is_empty() {
                println!(
                    "No changes specified. Use --name, --price, --weeks, --classes-per-week or --category."
                );
                return Ok(());
            }

            let mut scenario = Scenario::load(&path)?;
            let old_name = scenario.active_catalog().lookup(&course)?.name.clone();
            let renamed = update.name.is_some();
            let updated = scenario.catalog_mut().update(&course, update)?;

            if renamed {
                let old = old_name.to_lowercase();
                for line in scenario
                    .schedule
                    .iter_mut()
                    .filter(|line| line.course.to_lowercase() == old)
                {
                    line.course = updated.name.clone();
                }
            }

            scenario.save(&path)?;
            println!("Updated course: {}", updated.name);
        }

        CatalogCommands::Remove {
            scenario: path,
            course,
            force,
        } => {
            let mut scenario = Scenario::load(&path)?;
            let (removed, dropped) = scenario.remove_course(&course, force)?;
            scenario.save(&path)?;

            println!("Removed course: {}", removed.name);
            if dropped > 0 {
                println!("  Also removed {} scheduled run(s)", dropped);
            }
        }
    }

    Ok(())
}

fn load_or_default(path: Option<&Path>, settings: &Settings) -> CashflowResult<Scenario> {
    match path {
        Some(path) => Scenario::load(path),
        None => Ok(Scenario::template(settings)),
    }
}

fn parse_price(s: &str) -> CashflowResult<Money> {
    Money::parse(s).map_err(|e| CashflowError::InvalidInput(format!("Invalid price: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_scenario() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plan.yaml");
        let settings = Settings::default();
        let mut scenario = Scenario::template(&settings);
        scenario.schedule_course("Odontología", 2, 5, &settings).unwrap();
        scenario.save(&path).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_add_course() {
        let (_temp_dir, path) = create_scenario();
        let settings = Settings::default();

        handle_catalog_command(
            &settings,
            CatalogCommands::Add {
                scenario: path.clone(),
                name: "Cardiología".into(),
                price: "180.50".into(),
                weeks: 6.0,
                classes_per_week: 2,
                category: "small".into(),
            },
        )
        .unwrap();

        let entry = Scenario::load(&path)
            .unwrap()
            .active_catalog()
            .lookup("cardiología")
            .unwrap();
        assert_eq!(entry.price, Money::from_cents(18050));
        assert_eq!(entry.classes_per_week, 2);

        let err = handle_catalog_command(
            &settings,
            CatalogCommands::Add {
                scenario: path,
                name: "Cardiología".into(),
                price: "-5".into(),
                weeks: 6.0,
                classes_per_week: 1,
                category: "small".into(),
            },
        )
        .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_rename_follows_schedule() {
        let (_temp_dir, path) = create_scenario();

        handle_catalog_command(
            &Settings::default(),
            CatalogCommands::Edit {
                scenario: path.clone(),
                course: "odontología".into(),
                name: Some("Odontología Básica".into()),
                price: Some("80".into()),
                weeks: None,
                classes_per_week: None,
                category: None,
            },
        )
        .unwrap();

        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.schedule[0].course, "Odontología Básica");
        let ledger = scenario.compute().unwrap();
        assert_eq!(
            ledger.get(crate::models::Month::new(2).unwrap()).revenue,
            Money::from_units(400)
        );
    }

    #[test]
    fn test_remove_requires_force_when_scheduled() {
        let (_temp_dir, path) = create_scenario();
        let remove = |force| CatalogCommands::Remove {
            scenario: path.clone(),
            course: "Odontología".into(),
            force,
        };

        assert!(handle_catalog_command(&Settings::default(), remove(false)).is_err());
        handle_catalog_command(&Settings::default(), remove(true)).unwrap();

        let scenario = Scenario::load(&path).unwrap();
        assert!(scenario.schedule.is_empty());
        assert_eq!(scenario.active_catalog().len(), 7);
    }

    #[test]
    fn test_show_rejects_bad_start_month() {
        let err = handle_catalog_command(
            &Settings::default(),
            CatalogCommands::Show {
                course: "Oftalmología".into(),
                scenario: None,
                start_month: 13,
            },
        )
        .unwrap_err();
        assert!(err.is_invalid_input());
    }
}
