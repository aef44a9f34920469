//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `irrigo.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the irrigation controller is reachable.
    pub controller: ControllerConfig,
    /// Poll cadence.
    pub polling: PollingConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Controller endpoint configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Base URL the `/api/*` paths are appended to.
    pub base_url: String,
}

/// Poller configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Delay between the end of one poll and the start of the next.
    pub interval_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `irrigo.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("irrigo.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("IRRIGO_CONTROLLER_URL") {
            self.controller.base_url = val;
        }
        if let Ok(val) = std::env::var("IRRIGO_POLL_INTERVAL_MS")
            && let Ok(interval) = val.parse()
        {
            self.polling.interval_ms = interval;
        }
        if let Ok(val) = std::env::var("IRRIGO_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = self.controller.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Validation(
                "controller base_url must not be empty".to_string(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "controller base_url must be an http(s) URL, got {url:?}"
            )));
        }
        if self.polling.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "polling interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the controller base URL without surrounding whitespace.
    #[must_use]
    pub fn controller_url(&self) -> &str {
        self.controller.base_url.trim()
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.polling.interval_ms)
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://192.168.4.1".to_string(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_ms: 2000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "irrigo=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.controller.base_url, "http://192.168.4.1");
        assert_eq!(config.polling.interval_ms, 2000);
        assert_eq!(config.logging.filter, "irrigo=info");
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.polling.interval_ms, 2000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [controller]
            base_url = 'http://irrigo.local'

            [polling]
            interval_ms = 5000

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.controller.base_url, "http://irrigo.local");
        assert_eq!(config.polling.interval_ms, 5000);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [polling]
            interval_ms = 750
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.poll_interval(), Duration::from_millis(750));
        assert_eq!(config.controller.base_url, "http://192.168.4.1");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.polling.interval_ms, 2000);
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_reject_zero_interval() {
        let mut config = Config::default();
        config.polling.interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_base_url() {
        let mut config = Config::default();
        config.controller.base_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_non_http_base_url() {
        let mut config = Config::default();
        config.controller.base_url = "192.168.4.1".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_accept_https_base_url() {
        let mut config = Config::default();
        config.controller.base_url = " https://irrigo.example ".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.controller_url(), "https://irrigo.example");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
