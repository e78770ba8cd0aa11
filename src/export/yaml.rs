//! YAML Export functionality
//!
//! Exports a computed ledger to YAML format for human-readable review.

use crate::error::{CashflowError, CashflowResult};
use crate::export::json::LedgerExport;
use crate::reports::CashflowReport;
use std::io::Write;

/// Export a ledger report to YAML format
pub fn export_ledger_yaml<W: Write>(report: &CashflowReport, writer: &mut W) -> CashflowResult<()> {
    let export = LedgerExport::from_report(report);
    let err = |e: std::io::Error| CashflowError::Export(e.to_string());

    writeln!(writer, "# Course Cash Flow Projection").map_err(err)?;
    writeln!(writer, "# Scenario: {}", export.scenario).map_err(err)?;
    writeln!(
        writer,
        "# Generated: {}",
        export.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )
    .map_err(err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(err)?;
    writeln!(writer, "#").map_err(err)?;
    writeln!(
        writer,
        "# Amounts are in {} units; months run January to December.",
        export.currency_symbol
    )
    .map_err(err)?;
    writeln!(writer).map_err(err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| CashflowError::Export(e.to_string()))?;

    Ok(())
}
