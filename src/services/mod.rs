//! Service layer for course-cashflow
//!
//! The service layer provides the computations on top of the models:
//! ledger aggregation and resolution of scenario files into course runs.

pub mod ledger;
pub mod scenario;

pub use ledger::compute_ledger;
pub use scenario::{CourseRun, MonetizationModel, Scenario, ScenarioFormat, ScheduledCourse};
