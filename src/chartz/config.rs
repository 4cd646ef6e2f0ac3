use crate::error::{ChartzError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Configuration for chartz, stored as JSON in the platform config dir.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartzConfig {
    /// The charts directory to open when none is given on the command line
    /// (typically the game's CustomSongs folder).
    #[serde(default)]
    pub charts_dir: Option<PathBuf>,
}

impl ChartzConfig {
    /// Load config from the given directory, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ChartzError::Io)?;
        let config: ChartzConfig =
            serde_json::from_str(&content).map_err(ChartzError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory.
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ChartzError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ChartzError::Serialization)?;
        fs::write(config_path, content).map_err(ChartzError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ChartzConfig::load(dir.path().join("nowhere")).unwrap();
        assert_eq!(config, ChartzConfig::default());
        assert!(config.charts_dir.is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let config = ChartzConfig {
            charts_dir: Some(PathBuf::from("/games/trombone/CustomSongs")),
        };
        config.save(dir.path()).unwrap();

        let loaded = ChartzConfig::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn serialization_round_trip() {
        let config = ChartzConfig {
            charts_dir: Some(PathBuf::from("charts")),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ChartzConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
