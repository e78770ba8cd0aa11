//! Export module for course-cashflow
//!
//! Writes a computed ledger in machine-readable formats:
//! - JSON: full ledger with schema versioning
//! - YAML: the same document with a descriptive header
//!
//! CSV output lives on the report itself.

pub mod json;
pub mod yaml;

pub use json::{export_ledger_json, LedgerExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_ledger_yaml;
