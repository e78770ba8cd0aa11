//! Recurring monthly overhead

use serde::{Deserialize, Serialize};

use super::money::{self, Money};
use crate::error::{CashflowError, CashflowResult};

/// Named monthly amounts charged identically to every month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedCostProfile {
    #[serde(with = "money::as_units")]
    pub advertising: Money,
    #[serde(with = "money::as_units")]
    pub taxes: Money,
    #[serde(with = "money::as_units")]
    pub platform: Money,
    /// Video-conferencing subscription
    #[serde(with = "money::as_units")]
    pub conferencing: Money,
    #[serde(with = "money::as_units")]
    pub professional_fees: Money,
    #[serde(with = "money::as_units")]
    pub other: Money,
}

impl FixedCostProfile {
    /// Create a validated profile; zero amounts are allowed
    pub fn new(
        advertising: Money,
        taxes: Money,
        platform: Money,
        conferencing: Money,
        professional_fees: Money,
        other: Money,
    ) -> CashflowResult<Self> {
        let profile = Self {
            advertising,
            taxes,
            platform,
            conferencing,
            professional_fees,
            other,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Named amounts in display order
    pub fn items(&self) -> [(&'static str, Money); 6] {
        [
            ("Advertising", self.advertising),
            ("Taxes", self.taxes),
            ("Platform", self.platform),
            ("Conferencing", self.conferencing),
            ("Professional fees", self.professional_fees),
            ("Other", self.other),
        ]
    }

    /// Sum of all named amounts, charged to each month
    pub fn monthly_total(&self) -> Money {
        self.items().into_iter().map(|(_, amount)| amount).sum()
    }

    /// Reject negative amounts and totals too large to represent
    pub fn validate(&self) -> CashflowResult<()> {
        if let Some((label, amount)) = self.items().into_iter().find(|(_, amount)| amount.is_negative()) {
            return Err(CashflowError::InvalidInput(format!(
                "fixed cost '{}' cannot be negative: {}",
                label, amount
            )));
        }

        let total = self
            .items()
            .into_iter()
            .try_fold(Money::zero(), |total, (_, amount)| total.checked_add(amount));
        if total.is_none() {
            return Err(CashflowError::InvalidInput(
                "fixed costs are too large to represent".into(),
            ));
        }

        Ok(())
    }
}
