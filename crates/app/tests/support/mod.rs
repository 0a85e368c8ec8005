#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use meter_app::{AppServices, MeterConfig, UsageLedger, load_initial_plans};
use meter_core::{Bound, Feature, FeatureLimits, ManualClock, PlanTier};
use meter_db::{DbError, KeyValueStore, MemoryStore};

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<ManualClock>,
}

pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 2, 2, 15, 0).unwrap()
}

pub fn harness() -> Harness {
    Harness {
        store: Arc::new(MemoryStore::new()),
        clock: Arc::new(ManualClock::new(start())),
    }
}

impl Harness {
    pub fn ledger(&self) -> UsageLedger {
        UsageLedger::load(self.store.clone(), self.clock.clone())
    }

    pub fn services(&self) -> AppServices {
        self.services_with(default_config())
    }

    pub fn services_with(&self, config: MeterConfig) -> AppServices {
        AppServices::new(self.store.clone(), self.clock.clone(), config)
    }
}

pub fn default_config() -> MeterConfig {
    load_initial_plans().expect("initial plans")
}

pub fn bound(value: i64) -> Bound {
    if value < 0 {
        Bound::Unlimited
    } else {
        Bound::Max(value as u64)
    }
}

pub fn limits(hourly: i64, daily: i64, total: i64) -> FeatureLimits {
    FeatureLimits {
        hourly: bound(hourly),
        daily: bound(daily),
        total: bound(total),
    }
}

/// Default config with one feature's bounds replaced for a tier.
pub fn config_with(tier: PlanTier, feature: Feature, feature_limits: FeatureLimits) -> MeterConfig {
    let mut config = default_config();
    config
        .plans
        .tiers
        .entry(tier)
        .or_insert_with(BTreeMap::new)
        .insert(feature, feature_limits);
    config
}

pub fn record_many(ledger: &mut UsageLedger, subject: &str, feature: Feature, count: usize) {
    for _ in 0..count {
        ledger.record(subject, feature, true, 0);
    }
}

/// Store whose every operation fails.
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> meter_db::Result<Option<String>> {
        Err(DbError::Unavailable("offline".to_string()))
    }

    fn set(&self, _key: &str, _value: &str) -> meter_db::Result<()> {
        Err(DbError::Unavailable("offline".to_string()))
    }

    fn delete(&self, _key: &str) -> meter_db::Result<()> {
        Err(DbError::Unavailable("offline".to_string()))
    }
}
