use std::path::PathBuf;

const STORE_FILE_NAME: &str = "usage-meter.sqlite";

#[derive(Debug, Clone)]
pub struct DataDirResolution {
    pub dir: PathBuf,
    pub matched_existing: bool,
}

/// Picks the data directory: an explicit override wins, otherwise the
/// default location under the user's home.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<DataDirResolution, String> {
    let dir = match explicit {
        Some(dir) => dir,
        None => {
            let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
            PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("usage-meter")
        }
    };
    let matched_existing = dir.join(STORE_FILE_NAME).exists();
    Ok(DataDirResolution {
        dir,
        matched_existing,
    })
}
