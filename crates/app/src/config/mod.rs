use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use meter_core::{CostRates, DailyCaps, PlanLimits, PlanTier};

/// Static metering configuration: plan bounds, cost rates and daily caps.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeterConfig {
    pub plans: PlanLimits,
    pub rates: CostRates,
    pub daily_caps: DailyCaps,
}

impl MeterConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [
            ("generationPer1k", self.rates.generation_per_1k),
            ("voicePer1k", self.rates.voice_per_1k),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(AppError::InvalidInput(format!(
                    "rate {name} must be a non-negative number, got {rate}"
                )));
            }
        }
        for tier in [PlanTier::Free, PlanTier::Premium] {
            let cap = self.daily_caps.cap_for(tier);
            if !cap.is_finite() || cap < 0.0 {
                return Err(AppError::InvalidInput(format!(
                    "daily cap for {} must be a non-negative number, got {cap}",
                    tier.as_str()
                )));
            }
        }
        Ok(())
    }
}
