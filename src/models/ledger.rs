//! Twelve-month cash-flow ledger

use serde::{Deserialize, Serialize};

use super::money::{self, Money};
use super::month::{Month, MONTHS_PER_YEAR};

/// One month of the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub month: Month,
    #[serde(with = "money::as_units")]
    pub revenue: Money,
    #[serde(with = "money::as_units")]
    pub launch_costs: Money,
    #[serde(with = "money::as_units")]
    pub instructor_costs: Money,
    #[serde(with = "money::as_units")]
    pub fixed_costs: Money,
    #[serde(with = "money::as_units")]
    pub net: Money,
    #[serde(with = "money::as_units")]
    pub cumulative_net: Money,
}

impl LedgerEntry {
    /// An empty slot for `month`
    pub fn empty(month: Month) -> Self {
        Self {
            month,
            revenue: Money::zero(),
            launch_costs: Money::zero(),
            instructor_costs: Money::zero(),
            fixed_costs: Money::zero(),
            net: Money::zero(),
            cumulative_net: Money::zero(),
        }
    }

    /// Launch plus instructor costs
    pub fn variable_costs(&self) -> Money {
        self.launch_costs + self.instructor_costs
    }

    /// Everything spent in the month
    pub fn total_costs(&self) -> Money {
        self.variable_costs() + self.fixed_costs
    }
}

/// Column sums over the whole window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerTotals {
    #[serde(with = "money::as_units")]
    pub revenue: Money,
    #[serde(with = "money::as_units")]
    pub launch_costs: Money,
    #[serde(with = "money::as_units")]
    pub instructor_costs: Money,
    #[serde(with = "money::as_units")]
    pub fixed_costs: Money,
    #[serde(with = "money::as_units")]
    pub net: Money,
}

impl LedgerTotals {
    pub fn variable_costs(&self) -> Money {
        self.launch_costs + self.instructor_costs
    }
}

/// The twelve monthly entries in calendar order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyLedger {
    entries: [LedgerEntry; MONTHS_PER_YEAR],
}

impl MonthlyLedger {
    /// Build a ledger from finished entries
    pub(crate) fn from_entries(entries: [LedgerEntry; MONTHS_PER_YEAR]) -> Self {
        Self { entries }
    }

    /// Entries in calendar order, January first
    pub fn entries(&self) -> &[LedgerEntry; MONTHS_PER_YEAR] {
        &self.entries
    }

    /// Iterate entries in calendar order
    pub fn iter(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter()
    }

    /// Entry for a month
    pub fn get(&self, month: Month) -> &LedgerEntry {
        &self.entries[month.index()]
    }

    /// Column sums
    pub fn totals(&self) -> LedgerTotals {
        self.entries.iter().fold(LedgerTotals::default(), |mut t, e| {
            t.revenue += e.revenue;
            t.launch_costs += e.launch_costs;
            t.instructor_costs += e.instructor_costs;
            t.fixed_costs += e.fixed_costs;
            t.net += e.net;
            t
        })
    }

    /// Cumulative result at the end of December
    pub fn final_cumulative_net(&self) -> Money {
        self.entries[MONTHS_PER_YEAR - 1].cumulative_net
    }

    /// First month whose cumulative result is no longer negative
    pub fn break_even_month(&self) -> Option<Month> {
        self.entries
            .iter()
            .find(|e| !e.cumulative_net.is_negative())
            .map(|e| e.month)
    }

    /// Lowest cumulative result and the month it occurs in
    pub fn lowest_cumulative(&self) -> (Month, Money) {
        self.entries
            .iter()
            .map(|e| (e.month, e.cumulative_net))
            .min_by_key(|(_, cumulative)| *cumulative)
            .unwrap_or((Month::JANUARY, Money::zero()))
    }
}

impl<'a> IntoIterator for &'a MonthlyLedger {
    type Item = &'a LedgerEntry;
    type IntoIter = std::slice::Iter<'a, LedgerEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
