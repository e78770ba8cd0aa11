//! Display formatting for terminal output
//!
//! Provides utilities for formatting catalogs and reports for the terminal,
//! including tables and text bar charts.

pub mod catalog;
pub mod report;

pub use catalog::{format_catalog_list, format_course_details, wrap_caveat};
