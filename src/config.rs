//! Configuration handling for the TUI

use crate::hospital::DEFAULT_ADDRESS;
use crate::i18n::Locale;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the configured service address
pub const ADDRESS_ENV_VAR: &str = "HOSPITAL_SERVICE_ADDRESS";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Hospital service address
    pub hospital_address: Option<String>,
    /// Interface language tag (e.g. "en", "es")
    pub language: Option<String>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "hospital", "hospital-labs-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Resolve the service address: environment, then file, then default
    pub fn resolved_address(&self) -> String {
        self.address_with_override(std::env::var(ADDRESS_ENV_VAR).ok())
    }

    fn address_with_override(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.is_empty())
            .or_else(|| self.hospital_address.clone())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string())
    }

    /// Configured locale, falling back to English for unknown tags
    pub fn locale(&self) -> Locale {
        self.language
            .as_deref()
            .and_then(Locale::from_tag)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.hospital_address.is_none());
        assert!(config.language.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            hospital_address: Some("http://10.0.0.5:50061".to_string()),
            language: Some("es".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.hospital_address,
            Some("http://10.0.0.5:50061".to_string())
        );
        assert_eq!(parsed.language, Some("es".to_string()));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.hospital_address.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"language": "es", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.language, Some("es".to_string()));
    }

    #[test]
    fn test_address_precedence() {
        let config = TuiConfig {
            hospital_address: Some("http://file:1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.address_with_override(Some("http://env:2".to_string())),
            "http://env:2"
        );
        assert_eq!(config.address_with_override(None), "http://file:1");
        assert_eq!(
            config.address_with_override(Some(String::new())),
            "http://file:1"
        );
        assert_eq!(
            TuiConfig::default().address_with_override(None),
            DEFAULT_ADDRESS
        );
    }

    #[test]
    fn test_locale_resolution() {
        let mut config = TuiConfig::default();
        assert_eq!(config.locale(), Locale::En);
        config.language = Some("es-ES".to_string());
        assert_eq!(config.locale(), Locale::Es);
        config.language = Some("klingon".to_string());
        assert_eq!(config.locale(), Locale::En);
    }

    #[test]
    fn test_load_returns_ok() {
        // Load should return default config when file doesn't exist
        let result = TuiConfig::load();
        assert!(result.is_ok());
    }
}
