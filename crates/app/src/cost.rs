use meter_core::{
    CostRates, CostState, DailyCapCheck, DailyCaps, DailyCostSnapshot, Feature, PlanTier,
    UsageEvent, estimate_cost,
};

use crate::ledger::UsageLedger;
use crate::util::time::{date_bucket, start_of_utc_day};

pub const DAILY_SNAPSHOT_PREFIX: &str = "usage-";

pub fn daily_snapshot_key(date: &str) -> String {
    format!("{DAILY_SNAPSHOT_PREFIX}{date}")
}

/// Soft monetary budget derived from today's successful metered events.
#[derive(Debug, Clone)]
pub struct CostMeter {
    rates: CostRates,
    caps: DailyCaps,
}

impl CostMeter {
    pub fn new(rates: CostRates, caps: DailyCaps) -> Self {
        Self { rates, caps }
    }

    pub fn rates(&self) -> &CostRates {
        &self.rates
    }

    pub fn caps(&self) -> &DailyCaps {
        &self.caps
    }

    pub fn estimate_cost(&self, feature: Feature, unit_count: u64) -> f64 {
        estimate_cost(&self.rates, feature, unit_count)
    }

    pub fn daily_total(&self, ledger: &UsageLedger, subject_id: &str) -> f64 {
        self.today_events(ledger, subject_id)
            .map(|event| self.estimate_cost(event.feature, event.unit_count))
            .sum()
    }

    pub fn cost_state(&self, ledger: &UsageLedger, subject_id: &str) -> CostState {
        let mut state = CostState::default();
        for event in self.today_events(ledger, subject_id) {
            let Some(service) = event.feature.service() else {
                continue;
            };
            state.total_cost_today += self.estimate_cost(event.feature, event.unit_count);
            *state.characters_by_service.entry(service).or_insert(0) += event.unit_count;
            state.request_count += 1;
        }
        state
    }

    pub fn would_exceed_daily_cap(
        &self,
        ledger: &UsageLedger,
        subject_id: &str,
        tier: PlanTier,
        feature: Feature,
        unit_count: u64,
    ) -> bool {
        self.check_daily_cap(ledger, subject_id, tier, feature, unit_count)
            .would_exceed()
    }

    pub fn check_daily_cap(
        &self,
        ledger: &UsageLedger,
        subject_id: &str,
        tier: PlanTier,
        feature: Feature,
        unit_count: u64,
    ) -> DailyCapCheck {
        DailyCapCheck {
            daily_total: self.daily_total(ledger, subject_id),
            estimate: self.estimate_cost(feature, unit_count),
            daily_cap: self.caps.cap_for(tier),
        }
    }

    /// Best-effort write of the subject's cost state into today's snapshot.
    pub fn write_daily_snapshot(&self, ledger: &UsageLedger, subject_id: &str) {
        let date = date_bucket(ledger.now());
        let key = daily_snapshot_key(&date);
        let store = ledger.store();
        let mut snapshot = match store.get(&key) {
            Ok(Some(raw)) => serde_json::from_str::<DailyCostSnapshot>(&raw).unwrap_or_else(|err| {
                tracing::warn!(key = %key, error = %err, "malformed daily cost snapshot; replacing");
                DailyCostSnapshot::default()
            }),
            Ok(None) => DailyCostSnapshot::default(),
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "failed to read daily cost snapshot");
                return;
            }
        };
        snapshot.date = date;
        snapshot
            .subjects
            .insert(subject_id.to_string(), self.cost_state(ledger, subject_id));
        let result = serde_json::to_string(&snapshot)
            .map_err(|err| err.to_string())
            .and_then(|payload| store.set(&key, &payload).map_err(|err| err.to_string()));
        if let Err(err) = result {
            tracing::warn!(key = %key, error = %err, "failed to write daily cost snapshot");
        }
    }

    fn today_events<'a>(
        &self,
        ledger: &'a UsageLedger,
        subject_id: &'a str,
    ) -> impl Iterator<Item = &'a UsageEvent> {
        let day_start = start_of_utc_day(ledger.now());
        ledger
            .events_for(subject_id)
            .filter(move |event| event.success && event.timestamp >= day_start)
    }
}
