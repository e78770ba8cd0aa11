//! Schedule CLI commands
//!
//! Adds course runs to a scenario file and clears them again.

use clap::Subcommand;
use std::path::PathBuf;

use crate::config::Settings;
use crate::display::report::separator;
use crate::display::wrap_caveat;
use crate::error::CashflowResult;
use crate::models::{CourseCashflow, Month};
use crate::services::Scenario;

/// Schedule subcommands
#[derive(Subcommand, Debug)]
pub enum ScheduleCommands {
    /// Schedule a course run
    Add {
        /// Scenario file to edit
        #[arg(short, long)]
        scenario: PathBuf,
        /// Course name
        course: String,
        /// Start month (1-12)
        #[arg(short, long)]
        month: u32,
        /// Number of enrolled students
        #[arg(short, long)]
        enrollment: i64,
    },

    /// List scheduled runs
    List {
        /// Scenario file
        #[arg(short, long)]
        scenario: PathBuf,
    },

    /// Remove scheduled runs
    Clear {
        /// Scenario file to edit
        #[arg(short, long)]
        scenario: PathBuf,
        /// Only runs starting in this month (1-12)
        #[arg(short, long)]
        month: Option<u32>,
    },
}

/// Handle a schedule command
pub fn handle_schedule_command(settings: &Settings, cmd: ScheduleCommands) -> CashflowResult<()> {
    match cmd {
        ScheduleCommands::Add {
            scenario: path,
            course,
            month,
            enrollment,
        } => {
            let mut scenario = Scenario::load(&path)?;
            let run = scenario.schedule_course(&course, month, enrollment, settings)?;
            scenario.save(&path)?;

            println!(
                "Scheduled {} starting {} with {} student(s)",
                run.course_name(),
                run.start_month(),
                enrollment
            );
            if run.wraps_year_end() {
                print!("{}", wrap_caveat(run.start_month()));
            }
        }

        ScheduleCommands::List { scenario: path } => {
            let mut scenario = Scenario::load(&path)?;
            scenario.apply_defaults(settings);
            let runs = scenario.resolve()?;

            if runs.is_empty() {
                println!("No courses scheduled.");
                return Ok(());
            }

            println!("{:<36} {:<10} {:>14} {:>14}", "Course", "Start", "Revenue", "Launch cost");
            println!("{}", separator(77));
            for run in &runs {
                let marker = if run.wraps_year_end() { " *" } else { "" };
                println!(
                    "{:<36} {:<10} {:>14} {:>14}{}",
                    run.course_name(),
                    run.start_month(),
                    settings.format_money(run.revenue()),
                    settings.format_money(run.launch_cost()),
                    marker
                );
            }
            println!();
            println!("{} run(s)", runs.len());
        }

        ScheduleCommands::Clear {
            scenario: path,
            month,
        } => {
            let month = month.map(Month::new).transpose()?;
            let mut scenario = Scenario::load(&path)?;
            let removed = scenario.clear_schedule(month);
            scenario.save(&path)?;

            match month {
                Some(month) => println!("Removed {} run(s) starting in {}", removed, month),
                None => println!("Removed {} run(s)", removed),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_scenario() -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("plan.json");
        Scenario::template(&Settings::default()).save(&path).unwrap();
        (temp_dir, path)
    }

    fn add(path: &PathBuf, course: &str, month: u32, enrollment: i64) -> CashflowResult<()> {
        handle_schedule_command(
            &Settings::default(),
            ScheduleCommands::Add {
                scenario: path.clone(),
                course: course.into(),
                month,
                enrollment,
            },
        )
    }

    #[test]
    fn test_add_and_clear() {
        let (_temp_dir, path) = create_scenario();

        add(&path, "Oftalmología", 11, 12).unwrap();
        add(&path, "Odontología", 3, 10).unwrap();
        add(&path, "Odontología", 11, 4).unwrap();
        assert_eq!(Scenario::load(&path).unwrap().schedule.len(), 3);

        handle_schedule_command(
            &Settings::default(),
            ScheduleCommands::Clear {
                scenario: path.clone(),
                month: Some(11),
            },
        )
        .unwrap();
        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.schedule.len(), 1);
        assert_eq!(scenario.schedule[0].start_month, 3);
    }

    #[test]
    fn test_add_rejects_invalid_lines() {
        let (_temp_dir, path) = create_scenario();

        assert!(add(&path, "Cardiología", 1, 4).unwrap_err().is_not_found());
        assert!(add(&path, "Odontología", 13, 4).unwrap_err().is_invalid_input());
        assert!(add(&path, "Odontología", 1, -1).unwrap_err().is_invalid_input());
        assert!(Scenario::load(&path).unwrap().schedule.is_empty());
    }

    #[test]
    fn test_clear_rejects_bad_month() {
        let (_temp_dir, path) = create_scenario();
        let err = handle_schedule_command(
            &Settings::default(),
            ScheduleCommands::Clear {
                scenario: path,
                month: Some(0),
            },
        )
        .unwrap_err();
        assert!(err.is_invalid_input());
    }
}
