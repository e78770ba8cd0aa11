//! Monthly ledger aggregation
//!
//! Folds scheduled course runs and the fixed-cost profile into the
//! twelve-month ledger. Every contribution is an integer-cent addition keyed
//! by month, so the result does not depend on the order runs are supplied in.

use tracing::{debug, info};

use crate::error::{CashflowError, CashflowResult};
use crate::models::{
    CourseCashflow, FixedCostProfile, LedgerEntry, Money, Month, MonthlyLedger,
};

/// Compute the twelve-month ledger for a set of course runs
///
/// Revenue and launch costs land in each run's start month, instructor costs
/// land in the months the run's classes are delivered (wrapping past December
/// into the same window), and the profile's monthly total is charged once to
/// every month.
///
/// Fails with `InvalidInput` if any monthly figure or column total does not
/// fit in the money type.
pub fn compute_ledger<'a, C, I>(
    instances: I,
    profile: &FixedCostProfile,
) -> CashflowResult<MonthlyLedger>
where
    C: CourseCashflow + ?Sized + 'a,
    I: IntoIterator<Item = &'a C>,
{
    let mut entries: [LedgerEntry; 12] = std::array::from_fn(|i| LedgerEntry::empty(Month::from_index(i)));
    let mut folded = 0usize;

    for instance in instances {
        let start = instance.start_month();
        let slot = &mut entries[start.index()];
        slot.revenue = accumulate(slot.revenue, instance.revenue(), start)?;
        slot.launch_costs = accumulate(slot.launch_costs, instance.launch_cost(), start)?;

        for (month, cost) in instance.instructor_cost_by_absolute_month() {
            let slot = &mut entries[month.index()];
            slot.instructor_costs = accumulate(slot.instructor_costs, cost, month)?;
        }

        debug!(
            course = instance.course_name(),
            start = start.number(),
            revenue = %instance.revenue(),
            wraps = instance.wraps_year_end(),
            "folded course run"
        );
        folded += 1;
    }

    let fixed = profile.monthly_total();
    let mut cumulative = Money::zero();
    for entry in entries.iter_mut() {
        entry.fixed_costs = fixed;
        entry.net = entry
            .revenue
            .checked_sub(entry.launch_costs)
            .and_then(|net| net.checked_sub(entry.instructor_costs))
            .and_then(|net| net.checked_sub(entry.fixed_costs))
            .ok_or_else(|| overflow(entry.month))?;
        cumulative = accumulate(cumulative, entry.net, entry.month)?;
        entry.cumulative_net = cumulative;
    }
    check_column_totals(&entries)?;

    info!(
        runs = folded,
        fixed_per_month = %fixed,
        year_result = %cumulative,
        "computed monthly ledger"
    );

    Ok(MonthlyLedger::from_entries(entries))
}

fn accumulate(total: Money, amount: Money, month: Month) -> CashflowResult<Money> {
    total.checked_add(amount).ok_or_else(|| overflow(month))
}

fn overflow(month: Month) -> CashflowError {
    CashflowError::InvalidInput(format!("ledger amounts for {} are too large to represent", month))
}

/// Column sums and the cost subtotals built from them must fit as well
fn check_column_totals(entries: &[LedgerEntry]) -> CashflowResult<()> {
    let revenue = column_total(entries, |e| e.revenue);
    let costs = column_total(entries, |e| e.launch_costs)
        .zip(column_total(entries, |e| e.instructor_costs))
        .and_then(|(launch, instructor)| launch.checked_add(instructor))
        .zip(column_total(entries, |e| e.fixed_costs))
        .and_then(|(variable, fixed)| variable.checked_add(fixed));

    match (revenue, costs) {
        (Some(_), Some(_)) => Ok(()),
        _ => Err(CashflowError::InvalidInput(
            "ledger totals are too large to represent".into(),
        )),
    }
}

fn column_total(entries: &[LedgerEntry], column: impl Fn(&LedgerEntry) -> Money) -> Option<Money> {
    entries
        .iter()
        .try_fold(Money::zero(), |total, entry| total.checked_add(column(entry)))
}
