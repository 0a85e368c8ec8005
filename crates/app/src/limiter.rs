use meter_core::{Feature, FeatureUsage, LimitDecision, LimitReason, PlanLimits, PlanTier};

use crate::ledger::UsageLedger;
use crate::util::time::{day_window, hour_window, next_hour_start, next_utc_midnight};

/// Count-based hard quota over the usage ledger.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    plans: PlanLimits,
}

impl RateLimiter {
    pub fn new(plans: PlanLimits) -> Self {
        Self { plans }
    }

    pub fn plans(&self) -> &PlanLimits {
        &self.plans
    }

    /// Hourly is checked before daily before total so the soonest
    /// resolvable blocker is the one reported.
    pub fn check_limit(
        &self,
        ledger: &UsageLedger,
        subject_id: &str,
        feature: Feature,
        tier: PlanTier,
    ) -> LimitDecision {
        let limits = self.plans.limits_for(tier, feature);
        let now = ledger.now();

        if limits.hourly.max().is_some() {
            let used = ledger.count_in_window(subject_id, feature, hour_window(), true);
            if limits.hourly.is_reached(used) {
                return LimitDecision::deny(LimitReason::HourlyLimit, Some(next_hour_start(now)));
            }
        }

        if limits.daily.max().is_some() {
            let used = ledger.count_in_window(subject_id, feature, day_window(), true);
            if limits.daily.is_reached(used) {
                return LimitDecision::deny(LimitReason::DailyLimit, Some(next_utc_midnight(now)));
            }
        }

        if limits.total.max().is_some() {
            let used = ledger.total_count(subject_id, feature, true);
            if limits.total.is_reached(used) {
                return LimitDecision::deny(LimitReason::TotalLimit, None);
            }
        }

        LimitDecision::allow()
    }

    pub fn feature_usage(
        &self,
        ledger: &UsageLedger,
        subject_id: &str,
        feature: Feature,
        tier: PlanTier,
    ) -> FeatureUsage {
        let limits = self.plans.limits_for(tier, feature);
        FeatureUsage {
            feature,
            hourly_used: ledger.count_in_window(subject_id, feature, hour_window(), true),
            hourly_limit: limits.hourly,
            daily_used: ledger.count_in_window(subject_id, feature, day_window(), true),
            daily_limit: limits.daily,
            total_used: ledger.total_count(subject_id, feature, true),
            total_limit: limits.total,
        }
    }

    pub fn usage_overview(
        &self,
        ledger: &UsageLedger,
        subject_id: &str,
        tier: PlanTier,
    ) -> Vec<FeatureUsage> {
        Feature::ALL
            .iter()
            .map(|feature| self.feature_usage(ledger, subject_id, *feature, tier))
            .collect()
    }
}
