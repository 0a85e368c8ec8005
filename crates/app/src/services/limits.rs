use crate::error::Result;
use crate::services::{SharedMeter, lock_ledger, require_subject};
use crate::util::time::format_instant;
use meter_core::{Feature, FeatureUsage, LimitDecision, PlanLimits, PlanTier};

#[derive(Clone)]
pub struct LimitsService {
    meter: SharedMeter,
}

impl LimitsService {
    pub(super) fn new(meter: SharedMeter) -> Self {
        Self { meter }
    }

    pub fn check(&self, subject_id: &str, feature: Feature, tier: PlanTier) -> Result<LimitDecision> {
        let subject_id = require_subject(subject_id)?;
        let ledger = lock_ledger(&self.meter)?;
        let decision = self
            .meter
            .limiter
            .check_limit(&ledger, subject_id, feature, tier);
        if let Some(reason) = decision.reason {
            tracing::info!(
                subject_id,
                feature = feature.as_str(),
                tier = tier.as_str(),
                reason = reason.as_str(),
                reset_at = ?decision.reset_at.map(format_instant),
                "usage limit reached"
            );
        }
        Ok(decision)
    }

    pub fn overview(&self, subject_id: &str, tier: PlanTier) -> Result<Vec<FeatureUsage>> {
        let subject_id = require_subject(subject_id)?;
        let ledger = lock_ledger(&self.meter)?;
        Ok(self.meter.limiter.usage_overview(&ledger, subject_id, tier))
    }

    pub fn plans(&self) -> &PlanLimits {
        self.meter.limiter.plans()
    }
}
