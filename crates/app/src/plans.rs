use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::config::MeterConfig;
use crate::error::{AppError, Result};

/// Loads the plan config from `path`, seeding it from the embedded defaults
/// when the file does not exist yet.
pub fn load_or_initialize(path: &Path) -> Result<MeterConfig> {
    if path.exists() {
        let config = load_plan_defaults(path)?;
        tracing::info!(path = %path.display(), "loaded plan config");
        return Ok(config);
    }
    let config = load_initial_plans()?;
    if let Err(err) = write_plan_defaults(path, &config) {
        tracing::warn!(path = %path.display(), error = %err, "failed to write plan defaults");
    }
    Ok(config)
}

pub fn load_plan_defaults(path: &Path) -> Result<MeterConfig> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let config: MeterConfig = serde_json::from_reader(reader).map_err(AppError::from)?;
    config.validate()?;
    Ok(config)
}

pub fn load_initial_plans() -> Result<MeterConfig> {
    let data = include_str!("../initial-plans.json");
    serde_json::from_str(data).map_err(AppError::from)
}

pub fn write_plan_defaults(path: &Path, config: &MeterConfig) -> Result<()> {
    config.validate()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, config).map_err(AppError::from)
}
