//! Configuration loading for the Quoteboard TUI.
//!
//! All fields are required. No defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuiConfig {
    pub remote_url: String,
    pub request_timeout_ms: u64,
    pub sync_interval_ms: u64,
    pub store_path: PathBuf,
    pub export_dir: PathBuf,
    pub log_path: PathBuf,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or QUOTEBOARD_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.remote_url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "remote_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "remote_url",
                reason: "must be an http:// or https:// URL".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.sync_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sync_interval_ms",
                reason: "must be > 0".to_string(),
            });
        }
        if self.store_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.export_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "export_dir",
                reason: "must not be empty".to_string(),
            });
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "log_path",
                reason: "must not be empty".to_string(),
            });
        }
        if self.theme.name.to_ascii_lowercase() != "synthbrute" {
            return Err(ConfigError::InvalidValue {
                field: "theme.name",
                reason: "only 'synthbrute' is supported".to_string(),
            });
        }
        Ok(())
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("QUOTEBOARD_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

#[cfg(test)]
pub(crate) fn test_config(export_dir: PathBuf) -> TuiConfig {
    TuiConfig {
        remote_url: "http://localhost:9/quotes".to_string(),
        request_timeout_ms: 1_000,
        sync_interval_ms: 30_000,
        store_path: "tmp/store.json".into(),
        export_dir,
        log_path: "tmp/quoteboard.log".into(),
        theme: ThemeConfig {
            name: "synthbrute".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
remote_url = "https://example.com/quotes"
request_timeout_ms = 5000
sync_interval_ms = 30000
store_path = "/tmp/quoteboard/store.json"
export_dir = "/tmp/quoteboard"
log_path = "/tmp/quoteboard/quoteboard.log"

[theme]
name = "synthbrute"
"#;

    #[test]
    fn parses_sample() {
        let config = TuiConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(config.sync_interval_ms, 30_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_fields() {
        let with_extra = format!("extra = 1\n{}", SAMPLE);
        assert!(matches!(
            TuiConfig::from_toml(&with_extra),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn rejects_non_http_url() {
        let mut config = test_config("tmp".into());
        config.remote_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_interval() {
        let mut config = test_config("tmp".into());
        config.sync_interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "sync_interval_ms", .. })
        ));
    }

    #[test]
    fn requires_synthbrute_theme() {
        let mut config = test_config("tmp".into());
        config.theme.name = "solarized".to_string();
        assert!(config.validate().is_err());
    }
}
