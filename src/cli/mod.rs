//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the scenario and report layers.

pub mod catalog;
pub mod run;
pub mod schedule;

pub use catalog::{handle_catalog_command, CatalogCommands};
pub use run::{handle_init_command, handle_run_command, InitArgs, OutputFormat, RunArgs};
pub use schedule::{handle_schedule_command, ScheduleCommands};
