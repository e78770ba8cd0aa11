//! Scheduled course instances (weekly-chunk policy)
//!
//! A course instance binds a catalog entry to a start month and an
//! enrollment count. Instructor cost follows the classes actually delivered:
//! the course is consumed four weeks at a time and each block is charged to
//! one calendar month.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::cashflow::CourseCashflow;
use super::course::CourseCatalogEntry;
use super::money::{self, Money};
use super::month::Month;
use crate::error::{CashflowError, CashflowResult};

/// Weeks of classes charged to a single month
pub const WEEKS_PER_MONTH: f64 = 4.0;

/// Per-instance cost constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceCosts {
    /// Course coordinator fee, charged once at the start month
    #[serde(with = "money::as_units")]
    pub coordinator: Money,

    /// Secondary coordinator fee, charged once at the start month
    #[serde(with = "money::as_units")]
    pub secondary_coordinator: Money,

    /// Instructor fee per class delivered
    #[serde(with = "money::as_units")]
    pub per_class_instructor: Money,
}

impl Default for InstanceCosts {
    fn default() -> Self {
        Self {
            coordinator: Money::from_units(200),
            secondary_coordinator: Money::from_units(200),
            per_class_instructor: Money::from_units(100),
        }
    }
}

impl InstanceCosts {
    /// Reject negative cost constants
    pub fn validate(&self) -> CashflowResult<()> {
        let fields = [
            ("coordinator cost", self.coordinator),
            ("secondary coordinator cost", self.secondary_coordinator),
            ("per-class instructor cost", self.per_class_instructor),
        ];

        for (label, amount) in fields {
            if amount.is_negative() {
                return Err(CashflowError::InvalidInput(format!(
                    "{} cannot be negative: {}",
                    label, amount
                )));
            }
        }

        Ok(())
    }
}

/// Lazy per-month class counts of a course, relative to its start month
///
/// Each item covers up to four weeks; the last one may be smaller. Clone the
/// iterator (or ask the instance for a new one) to walk it again.
#[derive(Debug, Clone)]
pub struct ClassDistribution {
    weeks_remaining: f64,
    classes_per_week: u32,
}

impl ClassDistribution {
    /// Distribution for a course of `duration_weeks` with `classes_per_week`
    pub fn new(duration_weeks: f64, classes_per_week: u32) -> Self {
        Self {
            weeks_remaining: duration_weeks,
            classes_per_week,
        }
    }
}

impl Iterator for ClassDistribution {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.weeks_remaining <= 0.0 {
            return None;
        }

        let weeks = self.weeks_remaining.min(WEEKS_PER_MONTH);
        self.weeks_remaining -= WEEKS_PER_MONTH;
        Some(weeks * self.classes_per_week as f64)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = if self.weeks_remaining > 0.0 {
            (self.weeks_remaining / WEEKS_PER_MONTH).ceil() as usize
        } else {
            0
        };
        (len, Some(len))
    }
}

impl ExactSizeIterator for ClassDistribution {}

impl std::iter::FusedIterator for ClassDistribution {}

/// One scheduled run of a catalog course
#[derive(Debug, Clone)]
pub struct CourseInstance {
    course: Arc<CourseCatalogEntry>,
    start_month: Month,
    enrollment_count: u32,
    costs: InstanceCosts,
}

impl CourseInstance {
    /// Schedule a course with the default cost constants
    pub fn new(
        course: Arc<CourseCatalogEntry>,
        start_month: u32,
        enrollment_count: i64,
    ) -> CashflowResult<Self> {
        Self::with_costs(course, start_month, enrollment_count, InstanceCosts::default())
    }

    /// Schedule a course with explicit cost constants
    pub fn with_costs(
        course: Arc<CourseCatalogEntry>,
        start_month: u32,
        enrollment_count: i64,
        costs: InstanceCosts,
    ) -> CashflowResult<Self> {
        course.validate()?;
        let start_month = Month::new(start_month)?;
        let enrollment_count = validate_enrollment(&course.name, enrollment_count)?;
        costs.validate()?;

        representable(
            &course.name,
            "revenue",
            course.price.checked_times(enrollment_count as u64),
        )?;
        representable(
            &course.name,
            "launch cost",
            costs.coordinator.checked_add(costs.secondary_coordinator),
        )?;
        representable(
            &course.name,
            "instructor cost",
            costs.per_class_instructor.checked_scale(course.total_classes()),
        )?;

        Ok(Self {
            course,
            start_month,
            enrollment_count,
            costs,
        })
    }

    /// The catalog entry this instance was built from
    pub fn course(&self) -> &Arc<CourseCatalogEntry> {
        &self.course
    }

    /// Number of enrolled students
    pub fn enrollment_count(&self) -> u32 {
        self.enrollment_count
    }

    /// Cost constants in effect for this instance
    pub fn costs(&self) -> &InstanceCosts {
        &self.costs
    }

    /// Per-month class counts relative to the start month
    pub fn class_distribution(&self) -> ClassDistribution {
        ClassDistribution::new(self.course.duration_weeks, self.course.classes_per_week)
    }

    /// Instructor cost per calendar month if the course started in `start`
    pub fn instructor_costs_from(&self, start: Month) -> impl Iterator<Item = (Month, Money)> + '_ {
        let per_class = self.costs.per_class_instructor;
        self.class_distribution()
            .enumerate()
            .map(move |(offset, classes)| (start.offset(offset), per_class.scale(classes)))
    }
}

impl CourseCashflow for CourseInstance {
    fn course_name(&self) -> &str {
        &self.course.name
    }

    fn start_month(&self) -> Month {
        self.start_month
    }

    fn revenue(&self) -> Money {
        self.course.price.times(self.enrollment_count as u64)
    }

    fn launch_cost(&self) -> Money {
        self.costs.coordinator + self.costs.secondary_coordinator
    }

    fn instructor_cost_by_absolute_month(&self) -> Vec<(Month, Money)> {
        self.instructor_costs_from(self.start_month).collect()
    }
}

/// Check an enrollment count is non-negative and representable
pub(crate) fn validate_enrollment(course: &str, enrollment_count: i64) -> CashflowResult<u32> {
    u32::try_from(enrollment_count).map_err(|_| {
        CashflowError::InvalidInput(format!(
            "enrollment for '{}' must be between 0 and {}, got {}",
            course,
            u32::MAX,
            enrollment_count
        ))
    })
}

/// Fail when an amount of a run overflowed the money type
pub(crate) fn representable(
    course: &str,
    what: &str,
    amount: Option<Money>,
) -> CashflowResult<Money> {
    amount.ok_or_else(|| {
        CashflowError::InvalidInput(format!(
            "{} of '{}' is too large to represent",
            what, course
        ))
    })
}
