use crate::config::MeterConfig;
use crate::error::Result;
use crate::services::{SharedMeter, lock_ledger, require_subject};
use meter_core::{CostState, DailyCapCheck, Feature, PlanTier};

#[derive(Clone)]
pub struct CostService {
    meter: SharedMeter,
}

impl CostService {
    pub(super) fn new(meter: SharedMeter) -> Self {
        Self { meter }
    }

    pub fn estimate(&self, feature: Feature, unit_count: u64) -> f64 {
        self.meter.costs.estimate_cost(feature, unit_count)
    }

    pub fn daily_total(&self, subject_id: &str) -> Result<f64> {
        let subject_id = require_subject(subject_id)?;
        let ledger = lock_ledger(&self.meter)?;
        Ok(self.meter.costs.daily_total(&ledger, subject_id))
    }

    pub fn state(&self, subject_id: &str) -> Result<CostState> {
        let subject_id = require_subject(subject_id)?;
        let ledger = lock_ledger(&self.meter)?;
        Ok(self.meter.costs.cost_state(&ledger, subject_id))
    }

    /// Soft budget gate for optional sub-actions such as narration.
    pub fn would_exceed_daily_cap(
        &self,
        subject_id: &str,
        tier: PlanTier,
        feature: Feature,
        unit_count: u64,
    ) -> Result<bool> {
        let subject_id = require_subject(subject_id)?;
        let ledger = lock_ledger(&self.meter)?;
        Ok(self
            .meter
            .costs
            .would_exceed_daily_cap(&ledger, subject_id, tier, feature, unit_count))
    }

    /// Daily total, estimate and cap read under one ledger lock.
    pub fn check_daily_cap(
        &self,
        subject_id: &str,
        tier: PlanTier,
        feature: Feature,
        unit_count: u64,
    ) -> Result<DailyCapCheck> {
        let subject_id = require_subject(subject_id)?;
        let ledger = lock_ledger(&self.meter)?;
        Ok(self
            .meter
            .costs
            .check_daily_cap(&ledger, subject_id, tier, feature, unit_count))
    }

    pub fn daily_cap(&self, tier: PlanTier) -> f64 {
        self.meter.costs.caps().cap_for(tier)
    }

    pub fn config(&self) -> &MeterConfig {
        &self.meter.config
    }
}
