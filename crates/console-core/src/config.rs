//! Console configuration.
//!
//! Built from defaults, optionally overridden at build time through
//! `INSURE_CONSOLE_API_BASE`, then overlaid with a JSON object the hosting
//! page may inject before the bundle loads.

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::query::DEFAULT_PAGE_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("page_size must be at least 1")]
    ZeroPageSize,
    #[error("quote_batch_size must be at least 1")]
    ZeroBatchSize,
    #[error("unknown log level {0:?}")]
    LogLevel(String),
    #[error("config overlay must be a JSON object")]
    NotAnObject,
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Prefix of every backend URL, e.g. `/api/v1` or `https://host/api/v1`
    pub api_base: String,
    /// Rows per table page
    pub page_size: usize,
    /// Rows requested per backend call when loading the full quote set
    pub quote_batch_size: usize,
    /// How long a toast stays on screen
    pub toast_ms: u32,
    pub log_level: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base: "/api/v1".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            quote_batch_size: 100,
            toast_ms: 5000,
            log_level: "info".to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Defaults plus the compile-time API base, if one was set
    pub fn from_build_env() -> Self {
        Self::default().with_api_base(option_env!("INSURE_CONSOLE_API_BASE"))
    }

    pub fn with_api_base(mut self, api_base: Option<&str>) -> Self {
        if let Some(base) = api_base.map(str::trim).filter(|b| !b.is_empty()) {
            self.api_base = base.trim_end_matches('/').to_string();
        }
        self
    }

    /// Overlay the keys present in `overlay` onto this config
    pub fn overlay(&self, overlay: Value) -> Result<Self, ConfigError> {
        let Value::Object(patch) = overlay else {
            return Err(ConfigError::NotAnObject);
        };
        let mut merged = serde_json::to_value(self)?;
        if let Value::Object(base) = &mut merged {
            base.extend(patch);
        }
        let config: ConsoleConfig = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config.normalized())
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Self::default().overlay(serde_json::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.quote_batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        self.level_filter().map(|_| ())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    fn normalized(mut self) -> Self {
        self.api_base = self.api_base.trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();
        assert_eq!(config.page_size, 5);
        assert_eq!(config.api_base, "/api/v1");
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_overlay_keeps_unset_keys() {
        let base = ConsoleConfig::default().with_api_base(Some("https://backend.test/api/v1/"));
        let config = base.overlay(json!({ "page_size": 10, "log_level": "debug" })).unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.api_base, "https://backend.test/api/v1");
        assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_overlays() {
        let base = ConsoleConfig::default();
        assert!(matches!(base.overlay(json!({ "page_size": 0 })), Err(ConfigError::ZeroPageSize)));
        let loud = base.overlay(json!({ "log_level": "loud" }));
        assert!(matches!(loud, Err(ConfigError::LogLevel(_))));
        assert!(matches!(base.overlay(json!([1, 2])), Err(ConfigError::NotAnObject)));
        assert!(matches!(base.overlay(json!({ "page_size": "five" })), Err(ConfigError::Parse(_))));
        assert!(ConsoleConfig::from_json(r#"{"toast_ms": 1500}"#).unwrap().toast_ms == 1500);
    }
}
