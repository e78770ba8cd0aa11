//! Cash-flow capability shared by every course-instance policy
//!
//! The ledger aggregator only needs to know when a course starts, what it
//! earns, what it costs to launch and how its instructor cost lands on the
//! calendar. Each monetization policy implements this trait.

use super::money::Money;
use super::month::Month;

/// A scheduled course run that contributes to the monthly ledger
pub trait CourseCashflow {
    /// Name of the catalog course this run was built from
    fn course_name(&self) -> &str;

    /// Month the course starts; revenue and launch costs land here
    fn start_month(&self) -> Month;

    /// Total enrollment revenue, recognized in the start month
    fn revenue(&self) -> Money;

    /// One-time launch cost, recognized in the start month
    fn launch_cost(&self) -> Money;

    /// Instructor cost per calendar month, one entry per month the course
    /// runs, starting at the start month
    ///
    /// Months wrap past December into the same projection window.
    fn instructor_cost_by_absolute_month(&self) -> Vec<(Month, Money)>;

    /// Whether any instructor cost wraps past December
    fn wraps_year_end(&self) -> bool {
        let start = self.start_month();
        let months = self.instructor_cost_by_absolute_month().len();
        months > 0 && start.wraps_after(months - 1)
    }
}

impl<T: CourseCashflow + ?Sized> CourseCashflow for Box<T> {
    fn course_name(&self) -> &str {
        (**self).course_name()
    }

    fn start_month(&self) -> Month {
        (**self).start_month()
    }

    fn revenue(&self) -> Money {
        (**self).revenue()
    }

    fn launch_cost(&self) -> Money {
        (**self).launch_cost()
    }

    fn instructor_cost_by_absolute_month(&self) -> Vec<(Month, Money)> {
        (**self).instructor_cost_by_absolute_month()
    }

    fn wraps_year_end(&self) -> bool {
        (**self).wraps_year_end()
    }
}
