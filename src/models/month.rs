//! Calendar month within the twelve-month projection window
//!
//! Months are numbered 1 (January) through 12 (December). Offsetting a month
//! wraps modulo 12 and stays inside the same window: there is no year axis.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CashflowError, CashflowResult};

/// Number of months in the projection window
pub const MONTHS_PER_YEAR: usize = 12;

/// A month of the projection window, always in 1..=12
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Month(u8);

impl Month {
    pub const JANUARY: Month = Month(1);
    pub const DECEMBER: Month = Month(12);

    /// Create a month from its 1-based number
    pub fn new(number: u32) -> CashflowResult<Self> {
        if (1..=MONTHS_PER_YEAR as u32).contains(&number) {
            Ok(Self(number as u8))
        } else {
            Err(CashflowError::InvalidInput(format!(
                "start month {} is outside 1-12",
                number
            )))
        }
    }

    /// Create a month from a 0-based slot index, wrapping past December
    pub fn from_index(index: usize) -> Self {
        Self((index % MONTHS_PER_YEAR) as u8 + 1)
    }

    /// The 1-based month number
    pub const fn number(&self) -> u32 {
        self.0 as u32
    }

    /// The 0-based slot index in a ledger
    pub const fn index(&self) -> usize {
        self.0 as usize - 1
    }

    /// The month `offset` months after this one, wrapping modulo 12
    ///
    /// # Examples
    /// ```
    /// use course_cashflow::models::Month;
    /// let november = Month::new(11).unwrap();
    /// assert_eq!(november.offset(3).number(), 2);
    /// ```
    pub fn offset(&self, offset: usize) -> Self {
        Self::from_index(self.index() + offset)
    }

    /// Whether `offset` months after this one falls past December
    pub fn wraps_after(&self, offset: usize) -> bool {
        self.index() + offset >= MONTHS_PER_YEAR
    }

    /// All twelve months in calendar order
    pub fn all() -> impl Iterator<Item = Month> + Clone {
        (0..MONTHS_PER_YEAR).map(Month::from_index)
    }

    /// Full English month name
    pub fn name(&self) -> &'static str {
        chrono::Month::try_from(self.0)
            .map(|m| m.name())
            .unwrap_or("Unknown")
    }

    /// Three-letter abbreviation used in tables and charts
    pub fn short_name(&self) -> &'static str {
        &self.name()[..3]
    }
}

impl TryFrom<u32> for Month {
    type Error = CashflowError;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        Month::new(number)
    }
}

impl From<Month> for u32 {
    fn from(month: Month) -> Self {
        month.number()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_validates_range() {
        assert!(Month::new(1).is_ok());
        assert!(Month::new(12).is_ok());

        let err = Month::new(0).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(Month::new(13).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_offset_wraps_into_same_window() {
        let november = Month::new(11).unwrap();
        let tail: Vec<u32> = (0..4).map(|i| november.offset(i).number()).collect();
        assert_eq!(tail, vec![11, 12, 1, 2]);
        assert!(!november.wraps_after(1));
        assert!(november.wraps_after(2));
    }

    #[test]
    fn test_all_in_calendar_order() {
        let numbers: Vec<u32> = Month::all().map(|m| m.number()).collect();
        assert_eq!(numbers, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_names() {
        assert_eq!(Month::JANUARY.name(), "January");
        assert_eq!(Month::DECEMBER.short_name(), "Dec");
        assert_eq!(format!("{}", Month::new(3).unwrap()), "March");
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        let month: Month = serde_json::from_str("4").unwrap();
        assert_eq!(month.number(), 4);
        assert!(serde_json::from_str::<Month>("13").is_err());
    }
}
