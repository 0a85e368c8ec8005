use std::path::PathBuf;
use std::sync::Arc;

use crate::config::MeterConfig;
use crate::error::{AppError, Result};
use crate::plans;
use crate::services::AppServices;
use meter_core::{Clock, SystemClock};
use meter_db::{KeyValueStore, SqliteStore};

/// Paths and files needed to run the meter.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub store_path: PathBuf,
    pub plans_path: PathBuf,
}

/// Application state owned by the process root and shared with handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    /// Opens the SQLite store and plan config from disk, using the wall clock.
    pub fn open(store_path: PathBuf, plans_path: PathBuf) -> Result<Self> {
        let config = AppConfig {
            store_path,
            plans_path,
        };
        let store = SqliteStore::open(&config.store_path)
            .map_err(|err| AppError::Message(format!("initialize store: {}", err)))?;
        let meter_config = plans::load_or_initialize(&config.plans_path)?;
        Ok(Self::with_parts(
            config,
            Arc::new(store),
            Arc::new(SystemClock),
            meter_config,
        ))
    }

    pub fn with_parts(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        meter_config: MeterConfig,
    ) -> Self {
        let services = AppServices::new(store, clock, meter_config);
        Self { config, services }
    }
}
