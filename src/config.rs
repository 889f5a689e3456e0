use crate::error::{ElectorError, Result};
use crate::matcher::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Similarity threshold applied when `--threshold` is not given.
    pub default_threshold: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self { default_threshold: DEFAULT_THRESHOLD as i64 }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ElectorError::Config("Home directory not found".into()))?;
        Ok(home.join(".config").join("elector-dedupe").join("config.json"))
    }

    pub fn set_threshold(&mut self, threshold: i64) -> Result<()> {
        if !(0..=100).contains(&threshold) {
            return Err(ElectorError::Config(format!(
                "Threshold must be between 0 and 100, got {}",
                threshold
            )));
        }
        self.default_threshold = threshold;
        self.save()
    }
}
