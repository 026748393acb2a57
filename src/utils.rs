use log::debug;
use std::{env, path::PathBuf};

const APP_DIR: &str = "knights-tour";
const CONFIG_FILE: &str = "config.toml";

/// Location of the configuration file.
///
/// `KNIGHTS_TOUR_CONFIG` overrides the platform configuration directory.
pub fn config_path() -> crate::error::Result<PathBuf> {
    if let Ok(path) = env::var("KNIGHTS_TOUR_CONFIG") {
        debug!("Using config path from environment: {path}");
        return Ok(PathBuf::from(path));
    }

    let Some(dir) = dirs::config_dir() else {
        return Err(crate::error::Error::ConfigDirNotFound);
    };
    let p = dir.join(APP_DIR).join(CONFIG_FILE);
    debug!("Config path: {}", p.to_string_lossy());
    Ok(p)
}
