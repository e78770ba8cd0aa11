//! Scenario input bundles
//!
//! A scenario is everything one projection needs: a catalog snapshot, the
//! schedule of course runs, cost parameters and the monetization model. It
//! is passed explicitly into the aggregator; nothing is kept between runs.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::ledger::compute_ledger;
use crate::config::settings::Settings;
use crate::error::{CashflowError, CashflowResult};
use crate::models::{
    CourseCashflow, CourseCatalog, CourseCatalogEntry, CourseInstance, FixedCostProfile,
    FlatRateCourse, FlatRatePolicy, InstanceCosts, Month, MonthlyLedger,
};

/// A resolved, validated course run of either policy
pub type CourseRun = Box<dyn CourseCashflow + Send + Sync>;

/// How course runs earn and spend money
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MonetizationModel {
    /// Per-enrollment revenue, per-class instructor cost in 4-week blocks
    #[default]
    WeeklyChunks,
    /// Per-enrollment revenue, hourly instructor cost at a flat rate
    FlatRate(FlatRatePolicy),
}

impl MonetizationModel {
    /// Short label for reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::WeeklyChunks => "weekly chunks",
            Self::FlatRate(_) => "flat rate",
        }
    }

    /// Build a validated course run under this model
    pub fn build_run(
        &self,
        course: Arc<CourseCatalogEntry>,
        start_month: u32,
        enrollment: i64,
        costs: InstanceCosts,
    ) -> CashflowResult<CourseRun> {
        Ok(match self {
            Self::WeeklyChunks => Box::new(CourseInstance::with_costs(
                course,
                start_month,
                enrollment,
                costs,
            )?),
            Self::FlatRate(policy) => {
                Box::new(FlatRateCourse::new(course, start_month, enrollment, *policy)?)
            }
        })
    }
}

/// One line of the schedule: a course starting in a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledCourse {
    /// Catalog course name
    pub course: String,

    /// Start month, 1-12
    pub start_month: u32,

    /// Number of enrolled students
    pub enrollment: i64,

    /// Per-run cost overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costs: Option<InstanceCosts>,
}

/// File formats a scenario can be stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Yaml,
    Json,
}

impl ScenarioFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> CashflowResult<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(CashflowError::Import(format!(
                "Unsupported scenario file {}: use .yaml, .yml or .json",
                path.display()
            ))),
        }
    }
}

fn default_name() -> String {
    "Untitled scenario".to_string()
}

/// A complete projection input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Display name
    #[serde(default = "default_name")]
    pub name: String,

    /// Monetization model used for every run
    #[serde(default)]
    pub model: MonetizationModel,

    /// Cost constants for runs without overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_costs: Option<InstanceCosts>,

    /// Monthly overhead
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_costs: Option<FixedCostProfile>,

    /// Course catalog; the built-in catalog when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CourseCatalog>,

    /// Course runs to project
    #[serde(default)]
    pub schedule: Vec<ScheduledCourse>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: default_name(),
            model: MonetizationModel::default(),
            instance_costs: None,
            fixed_costs: None,
            catalog: None,
            schedule: Vec::new(),
        }
    }
}

impl Scenario {
    /// A starting scenario: built-in catalog, configured default costs and
    /// an empty schedule
    pub fn template(settings: &Settings) -> Self {
        Self {
            name: "New scenario".to_string(),
            model: MonetizationModel::WeeklyChunks,
            instance_costs: Some(settings.instance_costs),
            fixed_costs: Some(settings.fixed_costs),
            catalog: Some(CourseCatalog::builtin()),
            schedule: Vec::new(),
        }
    }

    /// Load a scenario from a YAML or JSON file
    pub fn load(path: &Path) -> CashflowResult<Self> {
        let format = ScenarioFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CashflowError::Io(format!("Failed to read scenario {}: {}", path.display(), e))
        })?;

        let scenario: Scenario = match format {
            ScenarioFormat::Yaml => serde_yaml::from_str(&contents)
                .map_err(|e| CashflowError::Import(format!("{}: {}", path.display(), e)))?,
            ScenarioFormat::Json => serde_json::from_str(&contents)
                .map_err(|e| CashflowError::Import(format!("{}: {}", path.display(), e)))?,
        };

        info!(
            path = %path.display(),
            name = %scenario.name,
            runs = scenario.schedule.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }

    /// Write the scenario to a YAML or JSON file
    pub fn save(&self, path: &Path) -> CashflowResult<()> {
        let contents = match ScenarioFormat::from_path(path)? {
            ScenarioFormat::Yaml => serde_yaml::to_string(self)?,
            ScenarioFormat::Json => serde_json::to_string_pretty(self)?,
        };

        std::fs::write(path, contents).map_err(|e| {
            CashflowError::Io(format!("Failed to write scenario {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "saved scenario");
        Ok(())
    }

    /// Fill cost parameters the scenario leaves out from settings
    pub fn apply_defaults(&mut self, settings: &Settings) {
        if self.instance_costs.is_none() {
            self.instance_costs = Some(settings.instance_costs);
        }
        if self.fixed_costs.is_none() {
            self.fixed_costs = Some(settings.fixed_costs);
        }
    }

    /// The catalog in effect for this scenario
    pub fn active_catalog(&self) -> CourseCatalog {
        self.catalog.clone().unwrap_or_else(CourseCatalog::builtin)
    }

    /// Mutable catalog, materializing the built-in one on first edit
    pub fn catalog_mut(&mut self) -> &mut CourseCatalog {
        self.catalog.get_or_insert_with(CourseCatalog::builtin)
    }

    /// The fixed-cost profile in effect, validated
    pub fn fixed_cost_profile(&self) -> CashflowResult<FixedCostProfile> {
        let profile = self.fixed_costs.unwrap_or_default();
        profile.validate()?;
        Ok(profile)
    }

    /// Resolve every schedule line against the catalog
    ///
    /// Fails on the first missing course or invalid value; no line is skipped.
    pub fn resolve(&self) -> CashflowResult<Vec<CourseRun>> {
        let catalog = self.active_catalog();
        let default_costs = self.instance_costs.unwrap_or_default();

        self.schedule
            .iter()
            .map(|line| {
                let course = catalog.lookup(&line.course)?;
                let costs = line.costs.unwrap_or(default_costs);
                self.model
                    .build_run(course, line.start_month, line.enrollment, costs)
            })
            .collect()
    }

    /// Resolve the schedule and compute the ledger
    pub fn compute(&self) -> CashflowResult<MonthlyLedger> {
        let runs = self.resolve()?;
        let profile = self.fixed_cost_profile()?;
        compute_ledger(&runs, &profile)
    }

    /// Add a course run to the schedule after checking it resolves
    ///
    /// The run is built with the costs a later `run` would use: the
    /// scenario's own, else those in `settings`. Returns the built run.
    pub fn schedule_course(
        &mut self,
        course: &str,
        start_month: u32,
        enrollment: i64,
        settings: &Settings,
    ) -> CashflowResult<CourseRun> {
        let entry = self.active_catalog().lookup(course)?;
        let run = self.model.build_run(
            Arc::clone(&entry),
            start_month,
            enrollment,
            self.instance_costs.unwrap_or(settings.instance_costs),
        )?;

        self.schedule.push(ScheduledCourse {
            course: entry.name.clone(),
            start_month,
            enrollment,
            costs: None,
        });
        info!(course = %entry.name, start_month, enrollment, "scheduled course");
        Ok(run)
    }

    /// Remove scheduled runs, all of them or those starting in `month`
    ///
    /// Returns how many lines were removed.
    pub fn clear_schedule(&mut self, month: Option<Month>) -> usize {
        let before = self.schedule.len();
        match month {
            Some(month) => self.schedule.retain(|line| line.start_month != month.number()),
            None => self.schedule.clear(),
        }
        before - self.schedule.len()
    }

    /// Remove a course from the catalog
    ///
    /// A course that is still scheduled is only removed with `cascade`, which
    /// drops its schedule lines as well. Returns the removed entry and the
    /// number of schedule lines dropped.
    pub fn remove_course(
        &mut self,
        course: &str,
        cascade: bool,
    ) -> CashflowResult<(Arc<CourseCatalogEntry>, usize)> {
        let entry = self.active_catalog().lookup(course)?;
        let scheduled = self.runs_of(&entry.name);

        if scheduled > 0 && !cascade {
            return Err(CashflowError::InvalidInput(format!(
                "Course '{}' is scheduled {} time(s). Use --force to remove it with its runs.",
                entry.name, scheduled
            )));
        }

        let removed = self.catalog_mut().remove(&entry.name)?;
        let name = removed.name.to_lowercase();
        self.schedule
            .retain(|line| line.course.to_lowercase() != name);

        info!(course = %removed.name, dropped_runs = scheduled, "removed course");
        Ok((removed, scheduled))
    }

    /// Schedule lines referencing `course`
    pub fn runs_of(&self, course: &str) -> usize {
        let course = course.trim().to_lowercase();
        self.schedule
            .iter()
            .filter(|line| line.course.to_lowercase() == course)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourseCategory, Money};
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
name: Plan 2025
fixed_costs:
  advertising: 200
  taxes: 150
  platform: 100
  conferencing: 50
  professional_fees: 300
catalog:
  - name: Oftalmología
    price: 150
    duration_weeks: 8
    classes_per_week: 1
    category: small_animal
schedule:
  - course: Oftalmología
    start_month: 1
    enrollment: 10
"#;

    fn sample() -> Scenario {
        serde_yaml::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_parse_and_compute() {
        let scenario = sample();
        assert_eq!(scenario.name, "Plan 2025");
        assert_eq!(scenario.model, MonetizationModel::WeeklyChunks);

        let ledger = scenario.compute().unwrap();
        let january = ledger.get(Month::JANUARY);
        assert_eq!(january.revenue, Money::from_units(1500));
        assert_eq!(january.fixed_costs, Money::from_units(800));
        assert_eq!(january.net, Money::from_units(-100));
    }

    #[test]
    fn test_missing_course_aborts() {
        let mut scenario = sample();
        scenario.schedule.push(ScheduledCourse {
            course: "Cardiología".into(),
            start_month: 2,
            enrollment: 4,
            costs: None,
        });

        let err = scenario.compute().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_schedule_line_aborts() {
        let mut scenario = sample();
        scenario.schedule[0].enrollment = -2;
        assert!(scenario.compute().unwrap_err().is_invalid_input());

        let mut scenario = sample();
        scenario.schedule[0].start_month = 14;
        assert!(scenario.compute().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_negative_fixed_cost_rejected() {
        let mut scenario = sample();
        scenario.fixed_costs = Some(FixedCostProfile {
            other: Money::from_units(-10),
            ..Default::default()
        });
        assert!(scenario.compute().unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_flat_rate_model() {
        let yaml = format!(
            "{}model:\n  kind: flat_rate\n  hourly_rate: 50\n  referent_cost: 100\n  secondary_coordinator_cost: 100\n",
            SAMPLE
        );
        let scenario: Scenario = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(scenario.model.label(), "flat rate");

        let ledger = scenario.compute().unwrap();
        let january = ledger.get(Month::JANUARY);
        assert_eq!(january.launch_costs, Money::from_units(200));
        assert_eq!(january.instructor_costs, Money::from_units(400));
        assert!(ledger.get(Month::new(2).unwrap()).instructor_costs.is_zero());
    }

    #[test]
    fn test_omitted_catalog_uses_builtin() {
        let scenario: Scenario =
            serde_yaml::from_str("schedule:\n  - course: Odontología\n    start_month: 3\n    enrollment: 4\n").unwrap();
        assert_eq!(scenario.name, "Untitled scenario");

        let ledger = scenario.compute().unwrap();
        assert_eq!(
            ledger.get(Month::new(3).unwrap()).revenue,
            Money::from_units(300)
        );
        assert!(ledger.get(Month::new(3).unwrap()).fixed_costs.is_zero());
    }

    #[test]
    fn test_apply_defaults_keeps_explicit_values() {
        let mut scenario = sample();
        scenario.apply_defaults(&Settings::default());

        assert_eq!(
            scenario.fixed_costs.unwrap().monthly_total(),
            Money::from_units(800)
        );
        assert_eq!(scenario.instance_costs, Some(InstanceCosts::default()));
    }

    #[test]
    fn test_schedule_course_and_clear() {
        let settings = Settings::default();
        let mut scenario = Scenario::template(&settings);
        let run = scenario.schedule_course("odontología", 5, 12, &settings).unwrap();
        assert_eq!(run.course_name(), "Odontología");
        assert_eq!(scenario.schedule[0].course, "Odontología");
        scenario.schedule_course("Oftalmología", 6, 8, &settings).unwrap();

        assert!(scenario
            .schedule_course("Cardiología", 1, 1, &settings)
            .err().unwrap()
            .is_not_found());
        assert!(scenario
            .schedule_course("Odontología", 0, 1, &settings)
            .err().unwrap()
            .is_invalid_input());
        assert_eq!(scenario.schedule.len(), 2);
        assert_eq!(scenario.runs_of("ODONTOLOGÍA"), 1);

        assert_eq!(scenario.clear_schedule(Some(Month::new(5).unwrap())), 1);
        assert_eq!(scenario.clear_schedule(None), 1);
        assert!(scenario.schedule.is_empty());
    }

    #[test]
    fn test_schedule_course_falls_back_to_settings_costs() {
        let mut settings = Settings::default();
        settings.instance_costs.coordinator = Money::from_units(500);

        let mut scenario = Scenario::default();
        let run = scenario.schedule_course("Odontología", 2, 3, &settings).unwrap();
        assert_eq!(run.launch_cost(), Money::from_units(700));

        scenario.apply_defaults(&settings);
        let resolved = scenario.resolve().unwrap();
        assert_eq!(resolved[0].launch_cost(), run.launch_cost());

        // The scenario's own costs take precedence
        let mut scenario = sample();
        scenario.instance_costs = Some(InstanceCosts::default());
        let run = scenario.schedule_course("Oftalmología", 2, 3, &settings).unwrap();
        assert_eq!(run.launch_cost(), Money::from_units(400));
    }

    #[test]
    fn test_oversized_amounts_are_rejected() {
        let yaml = r#"
catalog:
  - name: Oftalmología
    price: 1000000000000000
    duration_weeks: 8
    classes_per_week: 1
schedule:
  - course: Oftalmología
    start_month: 1
    enrollment: 100000
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert!(scenario.compute().unwrap_err().is_invalid_input());

        let yaml = "catalog:\n  - name: Endless\n    price: 10\n    duration_weeks: 1000000000000\n    classes_per_week: 1\n";
        assert!(serde_yaml::from_str::<Scenario>(yaml).is_err());
    }

    #[test]
    fn test_padded_catalog_names_resolve() {
        let yaml = r#"
catalog:
  - name: ' Odontología '
    price: 75
    duration_weeks: 4
    classes_per_week: 1
schedule:
  - course: Odontología
    start_month: 2
    enrollment: 4
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        let ledger = scenario.compute().unwrap();
        assert_eq!(
            ledger.get(Month::new(2).unwrap()).revenue,
            Money::from_units(300)
        );
    }

    #[test]
    fn test_flat_rate_model_with_default_policy() {
        let scenario: Scenario = serde_yaml::from_str("model: { kind: flat_rate }\n").unwrap();
        assert_eq!(
            scenario.model,
            MonetizationModel::FlatRate(FlatRatePolicy::default())
        );
    }

    #[test]
    fn test_catalog_edit_materializes_builtin() {
        let mut scenario = Scenario::default();
        let entry = CourseCatalogEntry::new(
            "Cardiología",
            Money::from_units(180),
            6.0,
            1,
            CourseCategory::SmallAnimal,
        )
        .unwrap();
        scenario.catalog_mut().add(entry).unwrap();
        assert_eq!(scenario.active_catalog().len(), 9);
    }

    #[test]
    fn test_remove_scheduled_course() {
        let mut scenario = sample();

        let err = scenario.remove_course("oftalmología", false).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(scenario.schedule.len(), 1);

        let (removed, dropped) = scenario.remove_course("oftalmología", true).unwrap();
        assert_eq!(removed.name, "Oftalmología");
        assert_eq!(dropped, 1);
        assert!(scenario.schedule.is_empty());
        assert!(scenario.active_catalog().is_empty());

        assert!(scenario
            .remove_course("Oftalmología", true)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut scenario = Scenario::template(&Settings::default());
        scenario
            .schedule_course("Oftalmología", 11, 9, &Settings::default())
            .unwrap();

        for file in ["plan.yaml", "plan.json"] {
            let path = temp_dir.path().join(file);
            scenario.save(&path).unwrap();
            let loaded = Scenario::load(&path).unwrap();
            assert_eq!(loaded.schedule, scenario.schedule);
            assert_eq!(loaded.compute().unwrap(), scenario.compute().unwrap());
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let err = ScenarioFormat::from_path(Path::new("plan.toml")).unwrap_err();
        assert!(matches!(err, CashflowError::Import(_)));
    }
}
