//! Course catalog entries
//!
//! A catalog entry is the static template of a course: what it costs to
//! enroll, how many weeks it runs and how many classes it holds per week.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::{self, Money};
use crate::error::{CashflowError, CashflowResult};

/// Maximum length of a course name
const MAX_NAME_LEN: usize = 100;

/// Longest course accepted, in weeks (ten years)
pub const MAX_DURATION_WEEKS: f64 = 520.0;

/// Species a course is aimed at
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CourseCategory {
    /// Small animals (pets)
    #[default]
    SmallAnimal,
    /// Large animals, mainly bovine
    LargeAnimal,
    /// Free-form tag
    Other(String),
}

impl fmt::Display for CourseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmallAnimal => f.pad("Small animal"),
            Self::LargeAnimal => f.pad("Large animal"),
            Self::Other(tag) => f.pad(tag),
        }
    }
}

impl FromStr for CourseCategory {
    type Err = CashflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        match tag.to_lowercase().replace(['-', ' '], "_").as_str() {
            "small" | "small_animal" | "small_animals" => Ok(Self::SmallAnimal),
            "large" | "large_animal" | "large_animals" | "bovine" => Ok(Self::LargeAnimal),
            "" => Err(CashflowError::InvalidInput(
                "course category cannot be empty".into(),
            )),
            _ => Ok(Self::Other(tag.to_string())),
        }
    }
}

/// A course template in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseCatalogEntry {
    /// Course name, unique within a catalog
    pub name: String,

    /// Price per enrollment
    #[serde(with = "money::as_units")]
    pub price: Money,

    /// Duration in weeks; fractional weeks are allowed
    pub duration_weeks: f64,

    /// Number of classes held each week
    pub classes_per_week: u32,

    /// Target species
    #[serde(default)]
    pub category: CourseCategory,
}

impl CourseCatalogEntry {
    /// Create a validated catalog entry
    pub fn new(
        name: impl Into<String>,
        price: Money,
        duration_weeks: f64,
        classes_per_week: u32,
        category: CourseCategory,
    ) -> CashflowResult<Self> {
        let entry = Self {
            name: name.into().trim().to_string(),
            price,
            duration_weeks,
            classes_per_week,
            category,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Total classes delivered over the whole course
    pub fn total_classes(&self) -> f64 {
        self.duration_weeks * self.classes_per_week as f64
    }

    /// Number of months the course spans (one per started block of 4 weeks)
    pub fn months_spanned(&self) -> usize {
        (self.duration_weeks / 4.0).ceil() as usize
    }

    /// Validate the entry's invariants
    pub fn validate(&self) -> CashflowResult<()> {
        if self.name.trim().is_empty() {
            return Err(CashflowError::InvalidInput(
                "course name cannot be empty".into(),
            ));
        }

        if self.name.len() > MAX_NAME_LEN {
            return Err(CashflowError::InvalidInput(format!(
                "course name is too long ({} characters, max {})",
                self.name.len(),
                MAX_NAME_LEN
            )));
        }

        if self.price.is_negative() {
            return Err(CashflowError::InvalidInput(format!(
                "price of '{}' cannot be negative: {}",
                self.name, self.price
            )));
        }

        if !self.duration_weeks.is_finite() || self.duration_weeks <= 0.0 {
            return Err(CashflowError::InvalidInput(format!(
                "duration of '{}' must be a positive number of weeks, got {}",
                self.name, self.duration_weeks
            )));
        }

        if self.duration_weeks > MAX_DURATION_WEEKS {
            return Err(CashflowError::InvalidInput(format!(
                "duration of '{}' cannot exceed {} weeks, got {}",
                self.name, MAX_DURATION_WEEKS, self.duration_weeks
            )));
        }

        if self.classes_per_week == 0 {
            return Err(CashflowError::InvalidInput(format!(
                "'{}' must hold at least one class per week",
                self.name
            )));
        }

        Ok(())
    }
}

impl fmt::Display for CourseCatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(duration_weeks: f64, classes_per_week: u32) -> CashflowResult<CourseCatalogEntry> {
        CourseCatalogEntry::new(
            "Oftalmología",
            Money::from_units(150),
            duration_weeks,
            classes_per_week,
            CourseCategory::SmallAnimal,
        )
    }

    #[test]
    fn test_new_entry() {
        let course = entry(9.0, 1).unwrap();
        assert_eq!(course.name, "Oftalmología");
        assert_eq!(course.total_classes(), 9.0);
        assert_eq!(course.months_spanned(), 3);
    }

    #[test]
    fn test_name_is_trimmed_and_required() {
        let course = CourseCatalogEntry::new(
            "  Odontología ",
            Money::from_units(75),
            4.0,
            1,
            CourseCategory::SmallAnimal,
        )
        .unwrap();
        assert_eq!(course.name, "Odontología");

        let err = CourseCatalogEntry::new("  ", Money::zero(), 4.0, 1, CourseCategory::SmallAnimal)
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_rejects_invalid_numbers() {
        assert!(entry(0.0, 1).unwrap_err().is_invalid_input());
        assert!(entry(-4.0, 1).unwrap_err().is_invalid_input());
        assert!(entry(f64::NAN, 1).unwrap_err().is_invalid_input());
        assert!(entry(4.0, 0).unwrap_err().is_invalid_input());
        assert!(entry(1e12, 1).unwrap_err().is_invalid_input());
        assert!(entry(MAX_DURATION_WEEKS, 1).is_ok());

        let negative_price = CourseCatalogEntry::new(
            "Anestesia",
            Money::from_units(-1),
            9.0,
            1,
            CourseCategory::SmallAnimal,
        );
        assert!(negative_price.unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(
            "small".parse::<CourseCategory>().unwrap(),
            CourseCategory::SmallAnimal
        );
        assert_eq!(
            "Large-Animal".parse::<CourseCategory>().unwrap(),
            CourseCategory::LargeAnimal
        );
        assert_eq!(
            "bovine".parse::<CourseCategory>().unwrap(),
            CourseCategory::LargeAnimal
        );
        assert_eq!(
            "Equine".parse::<CourseCategory>().unwrap(),
            CourseCategory::Other("Equine".into())
        );
        assert!("".parse::<CourseCategory>().is_err());
    }

    #[test]
    fn test_serde_uses_units() {
        let yaml = "name: Técnicas quirúrgicas\nprice: 150\nduration_weeks: 4.5\nclasses_per_week: 2\ncategory: small_animal\n";
        let course: CourseCatalogEntry = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(course.price.cents(), 15000);
        assert_eq!(course.total_classes(), 9.0);
        assert_eq!(course.category, CourseCategory::SmallAnimal);
    }
}
