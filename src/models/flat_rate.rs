//! Flat-rate course instances (hourly policy)
//!
//! An alternative monetization model: instructors are paid by the hour at a
//! flat rate, with each class counting as one hour. Either the whole course
//! is charged in the start month, or a fixed number of hours is charged in
//! the first and second month of the run.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::cashflow::CourseCashflow;
use super::course::CourseCatalogEntry;
use super::instance::{representable, validate_enrollment};
use super::money::{self, Money};
use super::month::Month;
use crate::error::{CashflowError, CashflowResult};

/// Hours charged in the first two months of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourSplit {
    pub first_month_hours: f64,
    pub second_month_hours: f64,
}

/// Parameters of the hourly policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatRatePolicy {
    /// Instructor pay per class hour
    #[serde(with = "money::as_units")]
    pub hourly_rate: Money,

    /// Fee paid to the course referent, once per run
    #[serde(with = "money::as_units")]
    pub referent_cost: Money,

    /// Fee paid to the secondary coordinator, once per run
    #[serde(with = "money::as_units")]
    pub secondary_coordinator_cost: Money,

    /// Fixed first/second month hours; `None` charges every class up front
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour_split: Option<HourSplit>,
}

impl Default for FlatRatePolicy {
    fn default() -> Self {
        Self {
            hourly_rate: Money::from_units(100),
            referent_cost: Money::from_units(200),
            secondary_coordinator_cost: Money::from_units(200),
            hour_split: None,
        }
    }
}

impl FlatRatePolicy {
    /// Reject negative rates, fees and hours
    pub fn validate(&self) -> CashflowResult<()> {
        let amounts = [
            ("hourly rate", self.hourly_rate),
            ("referent cost", self.referent_cost),
            ("secondary coordinator cost", self.secondary_coordinator_cost),
        ];
        for (label, amount) in amounts {
            if amount.is_negative() {
                return Err(CashflowError::InvalidInput(format!(
                    "{} cannot be negative: {}",
                    label, amount
                )));
            }
        }

        if let Some(split) = self.hour_split {
            for (label, hours) in [
                ("first month hours", split.first_month_hours),
                ("second month hours", split.second_month_hours),
            ] {
                if !hours.is_finite() || hours < 0.0 {
                    return Err(CashflowError::InvalidInput(format!(
                        "{} must be a non-negative number, got {}",
                        label, hours
                    )));
                }
            }
        }

        Ok(())
    }
}

/// One scheduled run of a catalog course under the hourly policy
#[derive(Debug, Clone)]
pub struct FlatRateCourse {
    course: Arc<CourseCatalogEntry>,
    start_month: Month,
    enrollment_count: u32,
    policy: FlatRatePolicy,
}

impl FlatRateCourse {
    /// Schedule a course under the given hourly policy
    pub fn new(
        course: Arc<CourseCatalogEntry>,
        start_month: u32,
        enrollment_count: i64,
        policy: FlatRatePolicy,
    ) -> CashflowResult<Self> {
        course.validate()?;
        let start_month = Month::new(start_month)?;
        let enrollment_count = validate_enrollment(&course.name, enrollment_count)?;
        policy.validate()?;

        let name = course.name.as_str();
        let rate = policy.hourly_rate;
        representable(name, "revenue", course.price.checked_times(enrollment_count as u64))?;
        representable(
            name,
            "launch cost",
            policy.referent_cost.checked_add(policy.secondary_coordinator_cost),
        )?;
        match policy.hour_split {
            None => {
                representable(name, "instructor cost", rate.checked_scale(course.total_classes()))?;
            }
            Some(split) => {
                let first = representable(
                    name,
                    "instructor cost",
                    rate.checked_scale(split.first_month_hours),
                )?;
                let second = representable(
                    name,
                    "instructor cost",
                    rate.checked_scale(split.second_month_hours),
                )?;
                representable(name, "instructor cost", first.checked_add(second))?;
            }
        }

        Ok(Self {
            course,
            start_month,
            enrollment_count,
            policy,
        })
    }

    /// The catalog entry this run was built from
    pub fn course(&self) -> &Arc<CourseCatalogEntry> {
        &self.course
    }

    /// Policy parameters in effect
    pub fn policy(&self) -> &FlatRatePolicy {
        &self.policy
    }
}

impl CourseCashflow for FlatRateCourse {
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
        self.policy.referent_cost + self.policy.secondary_coordinator_cost
    }

    fn instructor_cost_by_absolute_month(&self) -> Vec<(Month, Money)> {
        let rate = self.policy.hourly_rate;
        match self.policy.hour_split {
            None => vec![(self.start_month, rate.scale(self.course.total_classes()))],
            Some(split) => vec![
                (self.start_month, rate.scale(split.first_month_hours)),
                (self.start_month.offset(1), rate.scale(split.second_month_hours)),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CourseCategory;

    fn dermatology() -> Arc<CourseCatalogEntry> {
        Arc::new(
            CourseCatalogEntry::new(
                "Casos clínicos de dermatología",
                Money::from_units(70),
                8.0,
                1,
                CourseCategory::SmallAnimal,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_whole_course_charged_in_start_month() {
        let course = FlatRateCourse::new(dermatology(), 4, 12, FlatRatePolicy::default()).unwrap();

        assert_eq!(course.revenue(), Money::from_units(840));
        assert_eq!(course.launch_cost(), Money::from_units(400));
        assert_eq!(
            course.instructor_cost_by_absolute_month(),
            vec![(Month::new(4).unwrap(), Money::from_units(800))]
        );
    }

    #[test]
    fn test_hour_split_spreads_over_two_months() {
        let policy = FlatRatePolicy {
            hour_split: Some(HourSplit {
                first_month_hours: 4.0,
                second_month_hours: 3.0,
            }),
            ..Default::default()
        };
        let course = FlatRateCourse::new(dermatology(), 12, 5, policy).unwrap();

        assert_eq!(
            course.instructor_cost_by_absolute_month(),
            vec![
                (Month::DECEMBER, Money::from_units(400)),
                (Month::JANUARY, Money::from_units(300)),
            ]
        );
        assert!(course.wraps_year_end());
    }

    #[test]
    fn test_rejects_invalid_policy() {
        let policy = FlatRatePolicy {
            hourly_rate: Money::from_units(-5),
            ..Default::default()
        };
        assert!(FlatRateCourse::new(dermatology(), 1, 1, policy)
            .unwrap_err()
            .is_invalid_input());

        let policy = FlatRatePolicy {
            hour_split: Some(HourSplit {
                first_month_hours: -1.0,
                second_month_hours: 4.0,
            }),
            ..Default::default()
        };
        assert!(FlatRateCourse::new(dermatology(), 1, 1, policy)
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_rejects_amounts_that_overflow() {
        let policy = FlatRatePolicy {
            hourly_rate: Money::from_cents(i64::MAX / 4),
            ..Default::default()
        };
        let err = FlatRateCourse::new(dermatology(), 1, 1, policy).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("instructor cost"));

        let policy = FlatRatePolicy {
            hour_split: Some(HourSplit {
                first_month_hours: 1e30,
                second_month_hours: 1.0,
            }),
            ..Default::default()
        };
        assert!(FlatRateCourse::new(dermatology(), 1, 1, policy)
            .unwrap_err()
            .is_invalid_input());

        let mut expensive = CourseCatalogEntry::clone(&dermatology());
        expensive.price = Money::from_units(10_000_000_000_000);
        let err = FlatRateCourse::new(Arc::new(expensive), 1, 100_000, FlatRatePolicy::default())
            .unwrap_err();
        assert!(err.to_string().contains("revenue"));
    }

    #[test]
    fn test_policy_fields_default_when_omitted() {
        let policy: FlatRatePolicy = serde_yaml::from_str("hourly_rate: 50\n").unwrap();
        assert_eq!(policy.hourly_rate, Money::from_units(50));
        assert_eq!(policy.referent_cost, Money::from_units(200));
        assert_eq!(policy.secondary_coordinator_cost, Money::from_units(200));
        assert_eq!(policy.hour_split, None);
    }

    #[test]
    fn test_rejects_invalid_schedule() {
        let policy = FlatRatePolicy::default();
        assert!(FlatRateCourse::new(dermatology(), 13, 1, policy)
            .unwrap_err()
            .is_invalid_input());
        assert!(FlatRateCourse::new(dermatology(), 1, -3, policy)
            .unwrap_err()
            .is_invalid_input());
    }
}
