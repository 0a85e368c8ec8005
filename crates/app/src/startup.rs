use std::path::PathBuf;

use crate::Result;

#[derive(Clone, Debug)]
pub struct AppPaths {
    pub app_data_dir: PathBuf,
    pub store_path: PathBuf,
    pub plans_path: PathBuf,
}

impl AppPaths {
    pub fn new(app_data_dir: PathBuf) -> Self {
        let store_path = app_data_dir.join("usage-meter.sqlite");
        let plans_path = app_data_dir.join("usage-meter-plans.json");
        Self {
            app_data_dir,
            store_path,
            plans_path,
        }
    }
}

pub fn ensure_app_data_dir(paths: &AppPaths) -> Result<()> {
    std::fs::create_dir_all(&paths.app_data_dir)?;
    Ok(())
}
