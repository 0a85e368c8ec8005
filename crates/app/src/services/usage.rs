use chrono::Duration;

use crate::error::{AppError, Result};
use crate::services::{SharedMeter, lock_ledger, require_subject};
use meter_core::{Feature, UsageEvent};

#[derive(Clone)]
pub struct UsageService {
    meter: SharedMeter,
}

impl UsageService {
    pub(super) fn new(meter: SharedMeter) -> Self {
        Self { meter }
    }

    /// Appends the outcome of a completed action. Persistence failures are
    /// logged by the ledger and never surface here.
    pub fn record(
        &self,
        subject_id: &str,
        feature: Feature,
        success: bool,
        unit_count: u64,
    ) -> Result<UsageEvent> {
        let subject_id = require_subject(subject_id)?;
        let mut ledger = lock_ledger(&self.meter)?;
        let event = ledger.record(subject_id, feature, success, unit_count);
        if success && feature.service().is_some() {
            self.meter.costs.write_daily_snapshot(&ledger, subject_id);
        }
        tracing::debug!(
            subject_id,
            feature = feature.as_str(),
            success,
            unit_count,
            "recorded usage event"
        );
        Ok(event)
    }

    pub fn count_in_window(
        &self,
        subject_id: &str,
        feature: Feature,
        window: Duration,
        success_only: bool,
    ) -> Result<u64> {
        if window <= Duration::zero() {
            return Err(AppError::InvalidInput(
                "window must be a positive duration".to_string(),
            ));
        }
        let subject_id = require_subject(subject_id)?;
        let ledger = lock_ledger(&self.meter)?;
        Ok(ledger.count_in_window(subject_id, feature, window, success_only))
    }

    pub fn total_count(&self, subject_id: &str, feature: Feature, success_only: bool) -> Result<u64> {
        let subject_id = require_subject(subject_id)?;
        let ledger = lock_ledger(&self.meter)?;
        Ok(ledger.total_count(subject_id, feature, success_only))
    }

    /// Most recent events for a subject, newest last, at most `limit`.
    pub fn events(&self, subject_id: &str, limit: usize) -> Result<Vec<UsageEvent>> {
        let subject_id = require_subject(subject_id)?;
        let ledger = lock_ledger(&self.meter)?;
        let events: Vec<UsageEvent> = ledger.events_for(subject_id).cloned().collect();
        let skip = events.len().saturating_sub(limit);
        Ok(events.into_iter().skip(skip).collect())
    }

    pub fn prune(&self) -> Result<usize> {
        let mut ledger = lock_ledger(&self.meter)?;
        Ok(ledger.prune())
    }
}
