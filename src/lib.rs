//! course-cashflow - twelve-month cash flow projection for course programs
//!
//! This library projects the monthly revenue, costs and cumulative result of
//! a program of scheduled courses. Each course run earns its enrollment fees
//! and launch costs in its start month and spreads instructor costs over the
//! months its classes are delivered; a fixed overhead is charged to every
//! month of the window.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Tracing subscriber setup
//! - `models`: Core data models (catalog, course runs, fixed costs, ledger)
//! - `services`: Scenario bundles and ledger aggregation
//! - `reports`: The cash flow report
//! - `export`: JSON and YAML ledger export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use course_cashflow::models::{CourseCatalog, CourseInstance, FixedCostProfile};
//! use course_cashflow::services::compute_ledger;
//!
//! let catalog = CourseCatalog::builtin();
//! let run = CourseInstance::new(catalog.lookup("Oftalmología")?, 3, 12)?;
//! let ledger = compute_ledger([&run], &FixedCostProfile::default())?;
//! println!("{}", ledger.final_cumulative_net());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{CashflowError, CashflowResult};
