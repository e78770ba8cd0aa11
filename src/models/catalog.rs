//! Course catalog
//!
//! An ordered, name-keyed collection of course templates. Entries are handed
//! out as `Arc`s so course instances can share them read-only.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use super::course::{CourseCatalogEntry, CourseCategory};
use super::money::Money;
use crate::error::{CashflowError, CashflowResult};

/// Field changes applied by [`CourseCatalog::update`]
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub duration_weeks: Option<f64>,
    pub classes_per_week: Option<u32>,
    pub category: Option<CourseCategory>,
}

impl CourseUpdate {
    /// Whether the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.duration_weeks.is_none()
            && self.classes_per_week.is_none()
            && self.category.is_none()
    }
}

/// The active set of course templates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<CourseCatalogEntry>", into = "Vec<CourseCatalogEntry>")]
pub struct CourseCatalog {
    entries: Vec<Arc<CourseCatalogEntry>>,
}

impl CourseCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog of veterinary courses
    pub fn builtin() -> Self {
        use CourseCategory::{LargeAnimal, SmallAnimal};

        let templates: [(&str, i64, f64, u32, CourseCategory); 8] = [
            ("Diagnóstico a Campo", 245, 9.5, 2, LargeAnimal),
            ("Odontología", 75, 4.0, 1, SmallAnimal),
            ("Técnicas quirurgicas", 150, 4.5, 2, SmallAnimal),
            ("Casos clínicos de dermatología", 79, 8.0, 1, SmallAnimal),
            ("Oftalmología", 150, 9.0, 1, SmallAnimal),
            ("Introducción a la Anestesia", 150, 9.0, 1, SmallAnimal),
            ("Ecografía Abdominal - Intermedio", 300, 16.0, 1, SmallAnimal),
            ("Ecografía Abdominal - Inicial", 300, 20.0, 1, SmallAnimal),
        ];

        let entries = templates
            .into_iter()
            .map(|(name, price, weeks, classes, category)| {
                Arc::new(CourseCatalogEntry {
                    name: name.to_string(),
                    price: Money::from_units(price),
                    duration_weeks: weeks,
                    classes_per_week: classes,
                    category,
                })
            })
            .collect();

        Self { entries }
    }

    /// Build a catalog from entries, validating each and rejecting duplicates
    pub fn from_entries(
        entries: impl IntoIterator<Item = CourseCatalogEntry>,
    ) -> CashflowResult<Self> {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.add(entry)?;
        }
        Ok(catalog)
    }

    /// Number of courses
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog holds no courses
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate courses in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CourseCatalogEntry>> {
        self.entries.iter()
    }

    /// Course names in catalog order
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Get a course by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<Arc<CourseCatalogEntry>> {
        self.position(name).map(|i| Arc::clone(&self.entries[i]))
    }

    /// Get a course by name, failing if the catalog has no such course
    pub fn lookup(&self, name: &str) -> CashflowResult<Arc<CourseCatalogEntry>> {
        self.get(name)
            .ok_or_else(|| CashflowError::course_not_found(name.trim()))
    }

    /// Add a new course, trimming its name
    pub fn add(&mut self, mut entry: CourseCatalogEntry) -> CashflowResult<Arc<CourseCatalogEntry>> {
        entry.name = entry.name.trim().to_string();
        entry.validate()?;

        if self.position(&entry.name).is_some() {
            return Err(CashflowError::duplicate_course(entry.name));
        }

        let entry = Arc::new(entry);
        self.entries.push(Arc::clone(&entry));
        info!(course = %entry.name, "added course");
        Ok(entry)
    }

    /// Edit an existing course in place
    ///
    /// Instances built before the edit keep the entry they were built from.
    pub fn update(
        &mut self,
        name: &str,
        update: CourseUpdate,
    ) -> CashflowResult<Arc<CourseCatalogEntry>> {
        let index = self
            .position(name)
            .ok_or_else(|| CashflowError::course_not_found(name.trim()))?;

        let mut entry = CourseCatalogEntry::clone(&self.entries[index]);

        if let Some(new_name) = update.name {
            let new_name = new_name.trim().to_string();
            if let Some(existing) = self.position(&new_name) {
                if existing != index {
                    return Err(CashflowError::duplicate_course(new_name));
                }
            }
            entry.name = new_name;
        }
        if let Some(price) = update.price {
            entry.price = price;
        }
        if let Some(weeks) = update.duration_weeks {
            entry.duration_weeks = weeks;
        }
        if let Some(classes) = update.classes_per_week {
            entry.classes_per_week = classes;
        }
        if let Some(category) = update.category {
            entry.category = category;
        }

        entry.validate()?;

        let entry = Arc::new(entry);
        self.entries[index] = Arc::clone(&entry);
        info!(course = %entry.name, "updated course");
        Ok(entry)
    }

    /// Remove a course, returning it
    pub fn remove(&mut self, name: &str) -> CashflowResult<Arc<CourseCatalogEntry>> {
        let index = self
            .position(name)
            .ok_or_else(|| CashflowError::course_not_found(name.trim()))?;
        Ok(self.entries.remove(index))
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim().to_lowercase();
        self.entries
            .iter()
            .position(|e| e.name.to_lowercase() == name)
    }
}

impl TryFrom<Vec<CourseCatalogEntry>> for CourseCatalog {
    type Error = CashflowError;

    fn try_from(entries: Vec<CourseCatalogEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<CourseCatalog> for Vec<CourseCatalogEntry> {
    fn from(catalog: CourseCatalog) -> Self {
        catalog
            .entries
            .into_iter()
            .map(Arc::unwrap_or_clone)
            .collect()
    }
}
