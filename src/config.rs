//! Runtime configuration
//!
//! Settings are read from a JSON file. The path comes from the
//! `PRAYER_PLAYER_CONFIG` environment variable, falling back to
//! `./prayer-player.json`. A missing file yields the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audio::DEFAULT_VOLUME_PERCENT;
use crate::error::{PlayerError, Result};

pub const CONFIG_ENV_VAR: &str = "PRAYER_PLAYER_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "prayer-player.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub content_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Play the post-adhan supplication after the call finishes.
    pub supplication_after_call: bool,
    /// Mosque mode: adhan completion routes to the iqamah countdown.
    pub congregational_mode: bool,
    pub iqamah_countdown_secs: u32,
    /// Interval between audio time-update notifications.
    pub tick_interval_ms: u64,
    pub volume: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("assets/content"),
            log_dir: PathBuf::from(".logs"),
            supplication_after_call: true,
            congregational_mode: false,
            iqamah_countdown_secs: 600,
            tick_interval_ms: 250,
            volume: DEFAULT_VOLUME_PERCENT,
        }
    }
}

impl Config {
    /// Load from the environment-selected path, or the default file name.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| PlayerError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.volume > 100 {
            return Err(PlayerError::Config(format!(
                "volume must be within 0..=100, got {}",
                self.volume
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(PlayerError::Config("tick_interval_ms must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "congregational_mode": true, "iqamah_countdown_secs": 300 }}"#).unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert!(config.congregational_mode);
        assert_eq!(config.iqamah_countdown_secs, 300);
        assert!(config.supplication_after_call);
        assert_eq!(config.tick_interval_ms, 250);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(Config::load_from(file.path()), Err(PlayerError::Config(_))));
    }

    #[test]
    fn out_of_range_volume_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "volume": 150 }}"#).unwrap();
        assert!(matches!(Config::load_from(file.path()), Err(PlayerError::Config(_))));
    }
}
