use std::{fs, path::Path};

use log::{debug, warn};

use crate::{
    base::{Bounds, encode_decode::EncodeType},
    engine::budget::SearchLimits,
};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub board: [usize; 2], // width, height
    pub format: EncodeType,
    pub limits: SearchLimits,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            board: [5, 5],
            format: EncodeType::Ascii,
            limits: SearchLimits::unlimited(),
        }
    }
}

impl GlobalConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.board[0], self.board[1])
    }

    /// Load from the user's config file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(&crate::utils::config_path()?)
    }

    /// Load from the user's config file, falling back to defaults if it is missing or broken.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            warn!("Failed to load config, using default config: {err}");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> crate::error::Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        debug!("Loaded config from {}: {config:?}", path.to_string_lossy());
        Ok(config)
    }

    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&crate::utils::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, toml::to_string(self)?)?;
        debug!("Saved config to {}", path.to_string_lossy());
        Ok(())
    }
}
