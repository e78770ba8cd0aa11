//! User settings for course-cashflow
//!
//! Holds the currency symbol and the default cost parameters used to fill in
//! whatever a scenario file leaves out.

use serde::{Deserialize, Serialize};

use super::paths::CashflowPaths;
use crate::error::CashflowError;
use crate::models::{FixedCostProfile, FlatRatePolicy, InstanceCosts, Money};

/// User settings for course-cashflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in reports
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Default per-run cost constants
    #[serde(default)]
    pub instance_costs: InstanceCosts,

    /// Default monthly overhead
    #[serde(default = "default_fixed_costs")]
    pub fixed_costs: FixedCostProfile,

    /// Default parameters of the flat-rate model
    #[serde(default)]
    pub flat_rate: FlatRatePolicy,

    /// Whether terminal reports include the text charts
    #[serde(default = "default_show_charts")]
    pub show_charts: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_fixed_costs() -> FixedCostProfile {
    FixedCostProfile {
        advertising: Money::from_units(200),
        taxes: Money::from_units(150),
        platform: Money::from_units(100),
        conferencing: Money::from_units(50),
        professional_fees: Money::from_units(300),
        other: Money::zero(),
    }
}

fn default_show_charts() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            instance_costs: InstanceCosts::default(),
            fixed_costs: default_fixed_costs(),
            flat_rate: FlatRatePolicy::default(),
            show_charts: default_show_charts(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &CashflowPaths) -> Result<Self, CashflowError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                CashflowError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CashflowError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CashflowPaths) -> Result<(), CashflowError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            CashflowError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            CashflowError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Check the default cost parameters
    pub fn validate(&self) -> Result<(), CashflowError> {
        self.instance_costs
            .validate()
            .and_then(|_| self.fixed_costs.validate())
            .and_then(|_| self.flat_rate.validate())
            .map_err(|e| CashflowError::Config(format!("Invalid settings: {}", e)))
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}
