//! Core data models for course-cashflow
//!
//! This module contains the data structures of the projection domain: course
//! templates and their catalog, scheduled course runs, fixed overhead and the
//! monthly ledger they fold into.

pub mod cashflow;
pub mod catalog;
pub mod course;
pub mod fixed_costs;
pub mod flat_rate;
pub mod instance;
pub mod ledger;
pub mod money;
pub mod month;

pub use cashflow::CourseCashflow;
pub use catalog::{CourseCatalog, CourseUpdate};
pub use course::{CourseCatalogEntry, CourseCategory};
pub use fixed_costs::FixedCostProfile;
pub use flat_rate::{FlatRateCourse, FlatRatePolicy, HourSplit};
pub use instance::{ClassDistribution, CourseInstance, InstanceCosts};
pub use ledger::{LedgerEntry, LedgerTotals, MonthlyLedger};
pub use money::Money;
pub use month::Month;
