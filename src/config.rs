//! Host settings: default profile/region and lint configuration
//!
//! Settings are read from a camelCase JSON file. Every key is optional, and
//! the `QUEUEPAD_PROFILE` / `QUEUEPAD_REGION` environment variables take
//! precedence over the file.

use crate::lint::config::LintConfig;
use crate::parser::Defaults;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PROFILE_ENV: &str = "QUEUEPAD_PROFILE";
pub const REGION_ENV: &str = "QUEUEPAD_REGION";

pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_REGION: &str = "us-east-1";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Setting '{field}' must not be empty")]
    EmptyDefault { field: &'static str },
}

/// Settings supplied by the host environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Profile used by blocks without a `profile:` line
    pub default_profile: String,
    /// Region used by blocks without a `region:` line
    pub default_region: String,
    pub lint: LintConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_profile: DEFAULT_PROFILE.to_string(),
            default_region: DEFAULT_REGION.to_string(),
            lint: LintConfig::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded settings from {}", path.display());
        Self::from_json(&json)
    }

    /// Apply environment overrides through `lookup`.
    ///
    /// Unset or blank variables leave the current value alone.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(profile) = non_blank(PROFILE_ENV) {
            self.default_profile = profile.trim().to_string();
        }
        if let Some(region) = non_blank(REGION_ENV) {
            self.default_region = region.trim().to_string();
        }
        self
    }

    /// Apply overrides from the process environment
    pub fn with_process_env(self) -> Self {
        self.with_env_overrides(|key| std::env::var(key).ok())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_profile.trim().is_empty() {
            return Err(ConfigError::EmptyDefault {
                field: "defaultProfile",
            });
        }
        if self.default_region.trim().is_empty() {
            return Err(ConfigError::EmptyDefault {
                field: "defaultRegion",
            });
        }
        Ok(())
    }

    /// Parser defaults derived from these settings
    pub fn defaults(&self) -> Defaults {
        Defaults::new(self.default_profile.clone(), self.default_region.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn settings_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.default_profile, "default");
        assert_eq!(settings.default_region, "us-east-1");
        assert_eq!(settings.defaults(), Defaults::new("default", "us-east-1"));
    }

    #[test]
    fn settings_from_partial_json() {
        let settings = Settings::from_json(r#"{ "defaultRegion": "eu-central-1" }"#).unwrap();
        assert_eq!(settings.default_profile, "default");
        assert_eq!(settings.default_region, "eu-central-1");
        assert_eq!(settings.lint, LintConfig::default());
    }

    #[test]
    fn settings_reject_empty_default() {
        let result = Settings::from_json(r#"{ "defaultProfile": "  " }"#);
        assert!(matches!(
            result,
            Err(ConfigError::EmptyDefault {
                field: "defaultProfile"
            })
        ));
    }

    #[test]
    fn settings_reject_invalid_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn settings_env_overrides_skip_blank_values() {
        let env: HashMap<&str, &str> = [(PROFILE_ENV, "ops"), (REGION_ENV, "   ")]
            .into_iter()
            .collect();

        let settings = Settings::default()
            .with_env_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(settings.default_profile, "ops");
        assert_eq!(settings.default_region, "us-east-1");
    }

    #[test]
    fn settings_load_missing_file() {
        let result = Settings::load(Path::new("/nonexistent/queuepad.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
