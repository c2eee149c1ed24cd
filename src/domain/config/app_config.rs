//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::recording::Duration;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
/// Resolved once at startup; components receive the resolved values and
/// never read ambient state themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub max_duration: Option<String>,
    pub output_dir: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            max_duration: Some("13m".to_string()),
            output_dir: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_key: other.api_key.or(self.api_key),
            max_duration: other.max_duration.or(self.max_duration),
            output_dir: other.output_dir.or(self.output_dir),
        }
    }

    /// Get max_duration as parsed Duration, or the 13m default if not set/invalid
    pub fn max_duration_or_default(&self) -> Duration {
        self.max_duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_max_duration)
    }

    /// Get the directory recordings are written to, or the OS temp dir
    pub fn output_dir_or_temp(&self) -> PathBuf {
        self.output_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.api_key.is_none());
        assert_eq!(config.max_duration, Some("13m".to_string()));
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.api_key.is_none());
        assert!(config.max_duration.is_none());
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            api_key: Some("base_key".to_string()),
            max_duration: Some("13m".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            api_key: Some("other_key".to_string()),
            max_duration: None, // Should not override
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.api_key, Some("other_key".to_string()));
        assert_eq!(merged.max_duration, Some("13m".to_string()));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            api_key: Some("key".to_string()),
            output_dir: Some("/var/tmp".to_string()),
            ..Default::default()
        };

        let other = AppConfig::empty();
        let merged = base.merge(other);

        assert_eq!(merged.api_key, Some("key".to_string()));
        assert_eq!(merged.output_dir, Some("/var/tmp".to_string()));
    }

    #[test]
    fn max_duration_or_default_parses() {
        let config = AppConfig {
            max_duration: Some("5m".to_string()),
            ..Default::default()
        };
        assert_eq!(config.max_duration_or_default().as_secs(), 300);
    }

    #[test]
    fn max_duration_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            max_duration: Some("invalid".to_string()),
            ..Default::default()
        };
        assert_eq!(config.max_duration_or_default().as_secs(), 780);
    }

    #[test]
    fn max_duration_or_default_uses_default_on_none() {
        let config = AppConfig::empty();
        assert_eq!(config.max_duration_or_default().as_secs(), 780);
    }

    #[test]
    fn output_dir_or_temp_falls_back() {
        let config = AppConfig::empty();
        assert_eq!(config.output_dir_or_temp(), std::env::temp_dir());
    }

    #[test]
    fn output_dir_or_temp_uses_configured() {
        let config = AppConfig {
            output_dir: Some("/var/recordings".to_string()),
            ..Default::default()
        };
        assert_eq!(config.output_dir_or_temp(), PathBuf::from("/var/recordings"));
    }
}
