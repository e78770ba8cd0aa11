//! JSON Export functionality
//!
//! Exports a computed ledger to JSON format with schema versioning.

use crate::error::{CashflowError, CashflowResult};
use crate::models::{LedgerEntry, LedgerTotals};
use crate::reports::CashflowReport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Ledger export structure
#[derive(Debug, Clone, Serialize)]
pub struct LedgerExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub generated_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Scenario name
    pub scenario: String,

    /// Monetization model label
    pub model: String,

    /// Currency symbol the amounts are expressed in
    pub currency_symbol: String,

    /// Twelve monthly entries, January first
    pub months: Vec<LedgerEntry>,

    /// Column sums over the window
    pub totals: LedgerTotals,

    /// Courses whose costs wrap past December
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub wrapped_courses: Vec<String>,
}

impl LedgerExport {
    /// Create an export from a generated report
    pub fn from_report(report: &CashflowReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            scenario: report.scenario_name.clone(),
            model: report.model.clone(),
            currency_symbol: report.currency_symbol.clone(),
            months: report.ledger.entries().to_vec(),
            totals: report.ledger.totals(),
            wrapped_courses: report
                .wrapped_runs
                .iter()
                .map(|run| run.course.clone())
                .collect(),
        }
    }
}

/// Export a ledger report to JSON format
pub fn export_ledger_json<W: Write>(
    report: &CashflowReport,
    writer: &mut W,
    pretty: bool,
) -> CashflowResult<()> {
    let export = LedgerExport::from_report(report);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
            .map_err(|e| CashflowError::Export(e.to_string()))?;
    } else {
        serde_json::to_writer(&mut *writer, &export)
            .map_err(|e| CashflowError::Export(e.to_string()))?;
    }
    writeln!(writer).map_err(|e| CashflowError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FixedCostProfile, Money, Month};
    use crate::services::{Scenario, ScheduledCourse};

    fn create_test_report() -> CashflowReport {
        let scenario = Scenario {
            name: "Export test".into(),
            fixed_costs: Some(FixedCostProfile {
                platform: Money::from_units(100),
                ..Default::default()
            }),
            schedule: vec![ScheduledCourse {
                course: "Odontología".into(),
                start_month: 12,
                enrollment: 8,
                costs: None,
            }],
            ..Default::default()
        };
        CashflowReport::generate(&scenario, "$").unwrap()
    }

    #[test]
    fn test_json_export() {
        let report = create_test_report();

        let mut json_output = Vec::new();
        export_ledger_json(&report, &mut json_output, true).unwrap();

        let json_string = String::from_utf8(json_output).unwrap();
        assert!(json_string.contains("\"schema_version\": \"1.0.0\""));
        assert!(json_string.contains("\"scenario\": \"Export test\""));
        assert!(json_string.contains("\"months\""));
    }

    #[test]
    fn test_json_months_and_totals() {
        let report = create_test_report();

        let mut json_output = Vec::new();
        export_ledger_json(&report, &mut json_output, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&json_output).unwrap();
        let months = value["months"].as_array().unwrap();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0]["month"], 1);

        let december = &months[Month::DECEMBER.index()];
        assert_eq!(december["revenue"], 600);
        assert_eq!(value["totals"]["revenue"], 600);
        assert_eq!(value["totals"]["fixed_costs"], 1200);
        // A four-week course started in December stays inside the window
        assert!(value.get("wrapped_courses").is_none());
    }
}
