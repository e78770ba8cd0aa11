//! Cash Flow Report
//!
//! Projects a scenario over twelve months and renders the ledger as a table,
//! two text charts and CSV.

use std::io::Write;

use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};
use tracing::debug;

use crate::display::report::{double_separator, format_bar, format_header, format_signed_bar, separator};
use crate::error::{CashflowError, CashflowResult};
use crate::models::{LedgerEntry, Money, Month, MonthlyLedger};
use crate::services::{compute_ledger, Scenario};

const REPORT_WIDTH: usize = 78;
const BAR_WIDTH: usize = 14;
const HALF_BAR_WIDTH: usize = 12;

/// A course run whose instructor costs wrap past December
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedRun {
    pub course: String,
    pub start_month: Month,
}

/// Twelve-month cash-flow projection of a scenario
#[derive(Debug, Clone)]
pub struct CashflowReport {
    /// Scenario name
    pub scenario_name: String,
    /// Monetization model label
    pub model: String,
    /// Number of scheduled course runs
    pub run_count: usize,
    /// The computed ledger
    pub ledger: MonthlyLedger,
    /// Runs affected by the year-end wrap
    pub wrapped_runs: Vec<WrappedRun>,
    /// Currency symbol for formatting
    pub currency_symbol: String,
}

#[derive(Tabled)]
struct LedgerRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Variable costs")]
    variable_costs: String,
    #[tabled(rename = "Fixed costs")]
    fixed_costs: String,
    #[tabled(rename = "Monthly result")]
    net: String,
    #[tabled(rename = "Cumulative result")]
    cumulative_net: String,
}

impl CashflowReport {
    /// Generate the report for a scenario
    pub fn generate(scenario: &Scenario, currency_symbol: &str) -> CashflowResult<Self> {
        let runs = scenario.resolve()?;
        let profile = scenario.fixed_cost_profile()?;
        let ledger = compute_ledger(&runs, &profile)?;

        let wrapped_runs: Vec<WrappedRun> = runs
            .iter()
            .filter(|run| run.wraps_year_end())
            .map(|run| WrappedRun {
                course: run.course_name().to_string(),
                start_month: run.start_month(),
            })
            .collect();

        debug!(
            scenario = %scenario.name,
            wrapped = wrapped_runs.len(),
            "generated cash flow report"
        );

        Ok(Self {
            scenario_name: scenario.name.clone(),
            model: scenario.model.label().to_string(),
            run_count: runs.len(),
            ledger,
            wrapped_runs,
            currency_symbol: currency_symbol.to_string(),
        })
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// The ledger as a table with a totals row
    pub fn format_table(&self) -> String {
        let mut rows: Vec<LedgerRow> = self
            .ledger
            .iter()
            .map(|entry| LedgerRow {
                month: entry.month.name().to_string(),
                revenue: self.money(entry.revenue),
                variable_costs: self.money(entry.variable_costs()),
                fixed_costs: self.money(entry.fixed_costs),
                net: self.money(entry.net),
                cumulative_net: self.money(entry.cumulative_net),
            })
            .collect();

        let totals = self.ledger.totals();
        rows.push(LedgerRow {
            month: "Total".to_string(),
            revenue: self.money(totals.revenue),
            variable_costs: self.money(totals.variable_costs()),
            fixed_costs: self.money(totals.fixed_costs),
            net: self.money(totals.net),
            cumulative_net: self.money(self.ledger.final_cumulative_net()),
        });

        let mut table = Table::new(rows);
        table
            .with(Style::psql())
            .modify(Columns::new(1..), Alignment::right())
            .modify(Rows::first(), Alignment::center());
        table.to_string()
    }

    /// Revenue against variable and fixed costs, one row per month
    pub fn format_revenue_chart(&self) -> String {
        let max = self
            .ledger
            .iter()
            .flat_map(|e| [e.revenue, e.variable_costs(), e.fixed_costs])
            .max()
            .unwrap_or_default()
            .to_decimal();

        let mut output = String::new();
        output.push_str("Revenue (R), variable costs (V) and fixed costs (F)\n");
        for entry in self.ledger.iter() {
            output.push_str(&format!(
                "{}  R {}  V {}  F {}\n",
                entry.month.short_name(),
                format_bar(entry.revenue.to_decimal(), max, BAR_WIDTH),
                format_bar(entry.variable_costs().to_decimal(), max, BAR_WIDTH),
                format_bar(entry.fixed_costs.to_decimal(), max, BAR_WIDTH),
            ));
        }
        output
    }

    /// Monthly and cumulative result around a zero axis
    pub fn format_result_chart(&self) -> String {
        let max_abs = self
            .ledger
            .iter()
            .flat_map(|e| [e.net.abs(), e.cumulative_net.abs()])
            .max()
            .unwrap_or_default()
            .to_decimal();

        let mut output = String::new();
        output.push_str("Monthly result (left) and cumulative result (right)\n");
        for entry in self.ledger.iter() {
            output.push_str(&format!(
                "{}  {}  {}  {:>12}\n",
                entry.month.short_name(),
                format_signed_bar(entry.net.to_decimal(), max_abs, HALF_BAR_WIDTH),
                format_signed_bar(entry.cumulative_net.to_decimal(), max_abs, HALF_BAR_WIDTH),
                self.money(entry.cumulative_net),
            ));
        }
        output
    }

    /// Headline figures below the table
    fn format_summary(&self) -> String {
        let totals = self.ledger.totals();
        let mut output = String::new();

        output.push_str(&format!("Revenue:           {:>15}\n", self.money(totals.revenue)));
        output.push_str(&format!(
            "Launch costs:      {:>15}\n",
            self.money(totals.launch_costs)
        ));
        output.push_str(&format!(
            "Instructor costs:  {:>15}\n",
            self.money(totals.instructor_costs)
        ));
        output.push_str(&format!(
            "Fixed costs:       {:>15}\n",
            self.money(totals.fixed_costs)
        ));
        output.push_str(&separator(35));
        output.push('\n');
        output.push_str(&format!(
            "Year result:       {:>15}\n",
            self.money(self.ledger.final_cumulative_net())
        ));

        let (low_month, low) = self.ledger.lowest_cumulative();
        if low.is_negative() {
            output.push_str(&format!(
                "Lowest cumulative: {:>15} ({})\n",
                self.money(low),
                low_month
            ));
        }

        match self.ledger.break_even_month() {
            Some(month) => output.push_str(&format!("Break-even month:  {:>15}\n", month.name())),
            None => output.push_str("Break-even month:            none\n"),
        }

        output
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, show_charts: bool) -> String {
        let mut output = String::new();

        output.push_str(&format_header(
            &format!("Cash Flow Projection: {}", self.scenario_name),
            REPORT_WIDTH,
        ));
        output.push('\n');
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "Model: {}    Course runs: {}\n\n",
            self.model, self.run_count
        ));

        output.push_str(&self.format_table());
        output.push_str("\n\n");
        output.push_str(&self.format_summary());

        if show_charts {
            output.push('\n');
            output.push_str(&self.format_revenue_chart());
            output.push('\n');
            output.push_str(&self.format_result_chart());
        }

        if !self.wrapped_runs.is_empty() {
            output.push('\n');
            output.push_str(
                "Note: these runs continue past December. Their later costs are booked in the \
                 early months of this same year, not in a following year:\n",
            );
            for run in &self.wrapped_runs {
                output.push_str(&format!("  - {} (starts {})\n", run.course, run.start_month));
            }
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> CashflowResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "Month",
            "Month Name",
            "Revenue",
            "Launch Costs",
            "Instructor Costs",
            "Variable Costs",
            "Fixed Costs",
            "Net",
            "Cumulative Net",
        ])?;

        for entry in self.ledger.iter() {
            csv_writer.write_record(csv_row(entry))?;
        }

        csv_writer
            .flush()
            .map_err(|e| CashflowError::Export(e.to_string()))?;
        Ok(())
    }
}

fn csv_row(entry: &LedgerEntry) -> [String; 9] {
    let amount = |m: Money| format!("{:.2}", m.to_decimal());
    [
        entry.month.number().to_string(),
        entry.month.name().to_string(),
        amount(entry.revenue),
        amount(entry.launch_costs),
        amount(entry.instructor_costs),
        amount(entry.variable_costs()),
        amount(entry.fixed_costs),
        amount(entry.net),
        amount(entry.cumulative_net),
    ]
}
