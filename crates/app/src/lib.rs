pub mod app;
pub mod config;
pub mod cost;
pub mod error;
pub mod ledger;
pub mod limiter;
pub mod plans;
pub mod services;
pub mod startup;
pub mod util;

pub use app::{AppConfig, AppState};
pub use config::MeterConfig;
pub use cost::{CostMeter, DAILY_SNAPSHOT_PREFIX, daily_snapshot_key};
pub use error::{ApiError, AppError, Result};
pub use ledger::{LEDGER_KEY, RETENTION_DAYS, UsageLedger};
pub use limiter::RateLimiter;
pub use plans::{load_initial_plans, load_or_initialize, load_plan_defaults, write_plan_defaults};
pub use services::{AppServices, CostService, LimitsService, UsageService};
pub use startup::{AppPaths, ensure_app_data_dir};
pub use util::time::{date_bucket, format_instant, next_hour_start, next_utc_midnight};
