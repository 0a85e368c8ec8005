mod costs;
mod limits;
mod usage;

use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::MeterConfig;
use crate::cost::CostMeter;
use crate::error::{AppError, Result};
use crate::ledger::UsageLedger;
use crate::limiter::RateLimiter;
use meter_core::Clock;
use meter_db::KeyValueStore;

pub use costs::CostService;
pub use limits::LimitsService;
pub use usage::UsageService;

/// Metering state shared by all services: the ledger plus the static
/// limiter and cost configuration.
pub(crate) struct Meter {
    ledger: Mutex<UsageLedger>,
    limiter: RateLimiter,
    costs: CostMeter,
    config: MeterConfig,
}

type SharedMeter = Arc<Meter>;

/// Service registry for metering operations.
#[derive(Clone)]
pub struct AppServices {
    pub usage: UsageService,
    pub limits: LimitsService,
    pub costs: CostService,
}

impl AppServices {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        config: MeterConfig,
    ) -> Self {
        let meter = Arc::new(Meter {
            ledger: Mutex::new(UsageLedger::load(store, clock)),
            limiter: RateLimiter::new(config.plans.clone()),
            costs: CostMeter::new(config.rates, config.daily_caps),
            config,
        });
        Self {
            usage: UsageService::new(meter.clone()),
            limits: LimitsService::new(meter.clone()),
            costs: CostService::new(meter),
        }
    }
}

fn lock_ledger(meter: &SharedMeter) -> Result<MutexGuard<'_, UsageLedger>> {
    meter
        .ledger
        .lock()
        .map_err(|_| AppError::Message("usage ledger lock poisoned".to_string()))
}

fn require_subject(subject_id: &str) -> Result<&str> {
    let trimmed = subject_id.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput("subject_id is required".to_string()));
    }
    Ok(trimmed)
}
