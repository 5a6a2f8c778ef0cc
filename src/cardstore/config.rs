use crate::error::{CardError, Result};
use crate::runtime::{Latency, DEFAULT_LATENCY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// CLI configuration, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardsConfig {
    /// Simulated store latency in milliseconds
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Instance the CLI reconnects to; set by `cards init`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
}

fn default_latency_ms() -> u64 {
    DEFAULT_LATENCY.as_millis() as u64
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            instance_id: None,
        }
    }
}

impl CardsConfig {
    /// Reads `config.json` from the data directory. A data directory without one
    /// (nothing has run `cards init` there yet) yields the defaults.
    pub fn load<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        match fs::read_to_string(data_dir.as_ref().join(CONFIG_FILENAME)) {
            Ok(content) => serde_json::from_str(&content).map_err(CardError::Serialization),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CardError::Io(e)),
        }
    }

    /// Writes `config.json` into the data directory, creating it if needed. The
    /// file is replaced with a rename so a crash never leaves the recorded
    /// instance id half-written.
    pub fn save<P: AsRef<Path>>(&self, data_dir: P) -> Result<()> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir).map_err(CardError::Io)?;

        let content = serde_json::to_string_pretty(self).map_err(CardError::Serialization)?;
        let tmp_file = data_dir.join(format!(".{CONFIG_FILENAME}.tmp"));
        fs::write(&tmp_file, content).map_err(CardError::Io)?;
        fs::rename(&tmp_file, data_dir.join(CONFIG_FILENAME)).map_err(CardError::Io)
    }

    pub fn latency(&self) -> Latency {
        Latency::from_millis(self.latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config() {
        let config = CardsConfig::default();
        assert_eq!(config.latency_ms, 100);
        assert_eq!(config.instance_id, None);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = CardsConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, CardsConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("data");

        let config = CardsConfig {
            latency_ms: 0,
            instance_id: Some("abc".to_string()),
        };
        config.save(&nested).unwrap();

        let loaded = CardsConfig::load(&nested).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.latency().duration(), Duration::ZERO);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), r#"{"instance_id":"x"}"#).unwrap();

        let loaded = CardsConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.latency_ms, 100);
        assert_eq!(loaded.instance_id.as_deref(), Some("x"));
    }

    #[test]
    fn test_corrupt_config_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "{not json").unwrap();

        assert!(matches!(
            CardsConfig::load(temp_dir.path()),
            Err(CardError::Serialization(_))
        ));
    }

    #[test]
    fn test_save_overwrites_and_leaves_no_temp_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        CardsConfig::default().save(temp_dir.path()).unwrap();

        let config = CardsConfig {
            latency_ms: 5,
            instance_id: Some("next".to_string()),
        };
        config.save(temp_dir.path()).unwrap();

        assert_eq!(CardsConfig::load(temp_dir.path()).unwrap(), config);
        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![CONFIG_FILENAME]);
    }
}
