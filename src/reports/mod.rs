//! Reports module for course-cashflow
//!
//! Provides the twelve-month cash flow projection of a scenario.

pub mod cashflow;

pub use cashflow::{CashflowReport, WrappedRun};
