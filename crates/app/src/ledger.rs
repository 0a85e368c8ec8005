use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use meter_core::{Clock, Feature, UsageEvent};
use meter_db::KeyValueStore;

/// Storage key of the rolling ledger.
pub const LEDGER_KEY: &str = "usage-tracking";
pub const RETENTION_DAYS: i64 = 7;

/// Append-only record of usage events across all subjects.
///
/// Events are kept in insertion order and are never mutated. Every `record`
/// prunes events older than the retention horizon and writes the ledger back
/// to the store; write failures are logged and the ledger keeps working in
/// memory.
pub struct UsageLedger {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    events: Vec<UsageEvent>,
}

impl UsageLedger {
    pub fn load(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let events = read_events(store.as_ref());
        let mut ledger = Self {
            store,
            clock,
            events,
        };
        if ledger.prune() > 0 {
            ledger.persist();
        }
        ledger
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn record(
        &mut self,
        subject_id: &str,
        feature: Feature,
        success: bool,
        unit_count: u64,
    ) -> UsageEvent {
        let event = UsageEvent {
            timestamp: self.clock.now(),
            subject_id: subject_id.to_string(),
            feature,
            success,
            unit_count,
        };
        self.events.push(event.clone());
        self.prune();
        self.persist();
        event
    }

    /// Matching events with `timestamp > now - window`.
    pub fn count_in_window(
        &self,
        subject_id: &str,
        feature: Feature,
        window: Duration,
        success_only: bool,
    ) -> u64 {
        let cutoff = self.clock.now() - window;
        self.matching(subject_id, feature, success_only)
            .filter(|event| event.timestamp > cutoff)
            .count() as u64
    }

    pub fn total_count(&self, subject_id: &str, feature: Feature, success_only: bool) -> u64 {
        self.matching(subject_id, feature, success_only).count() as u64
    }

    pub fn events(&self) -> &[UsageEvent] {
        &self.events
    }

    /// Retained events of one subject, oldest first. Events past the
    /// retention horizon are skipped even before a prune pass removes them.
    pub fn events_for<'a>(&'a self, subject_id: &'a str) -> impl Iterator<Item = &'a UsageEvent> {
        let cutoff = self.retention_cutoff();
        self.events
            .iter()
            .filter(move |event| event.subject_id == subject_id && event.timestamp >= cutoff)
    }

    /// Drops events older than the retention horizon, returning how many
    /// were removed.
    pub fn prune(&mut self) -> usize {
        let cutoff = self.retention_cutoff();
        let before = self.events.len();
        self.events.retain(|event| event.timestamp >= cutoff);
        let removed = before - self.events.len();
        if removed > 0 {
            tracing::debug!(removed, "pruned expired usage events");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    fn retention_cutoff(&self) -> DateTime<Utc> {
        self.clock.now() - Duration::days(RETENTION_DAYS)
    }

    fn matching<'a>(
        &'a self,
        subject_id: &'a str,
        feature: Feature,
        success_only: bool,
    ) -> impl Iterator<Item = &'a UsageEvent> {
        self.events_for(subject_id)
            .filter(move |event| event.feature == feature && (event.success || !success_only))
    }

    fn persist(&self) {
        let payload = match serde_json::to_string(&self.events) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize usage ledger");
                return;
            }
        };
        if let Err(err) = self.store.set(LEDGER_KEY, &payload) {
            tracing::warn!(
                store = self.store.name(),
                error = %err,
                "failed to persist usage ledger; continuing in memory"
            );
        }
    }
}

fn read_events(store: &dyn KeyValueStore) -> Vec<UsageEvent> {
    let raw = match store.get(LEDGER_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(
                store = store.name(),
                error = %err,
                "failed to read usage ledger; starting empty"
            );
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<UsageEvent>>(&raw) {
        Ok(events) => events,
        Err(err) => {
            tracing::warn!(error = %err, "malformed usage ledger; starting empty");
            Vec::new()
        }
    }
}
