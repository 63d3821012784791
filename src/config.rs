use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use mealplanner_shared::DEFAULT_HOUSEHOLD;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub household: HouseholdConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// State file location, platform data directory when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HouseholdConfig {
    /// Only used when no state has been saved yet
    #[serde(default = "default_members")]
    pub members: Vec<String>,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            members: default_members(),
        }
    }
}

fn default_members() -> Vec<String> {
    DEFAULT_HOUSEHOLD.iter().map(|m| m.to_string()).collect()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MEALPLANNER__STORAGE__PATH, etc.)
    /// 2. Config file specified by path, CONFIG_PATH or config/default.toml
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder.set_default("observability.log_level", default_log_level())?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored when missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        // MEALPLANNER__HOUSEHOLD__MEMBERS=Ana,Ben
        builder = builder.add_source(
            Environment::with_prefix("MEALPLANNER")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("household.members")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.observability.log_level.trim().is_empty() {
            return Err("Log level must not be empty".to_string());
        }
        if self.household.members.iter().any(|m| m.trim().is_empty()) {
            return Err("Household member names must not be empty".to_string());
        }
        if self
            .storage
            .path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err("Storage path must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_empty_log_level() {
        let config = Config {
            observability: ObservabilityConfig {
                log_level: " ".to_string(),
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_blank_member() {
        let config = Config {
            household: HouseholdConfig {
                members: vec!["Ciara".to_string(), "".to_string()],
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_storage_path() {
        let config = Config {
            storage: StorageConfig {
                path: Some(PathBuf::new()),
            },
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = Config::default();

        assert_eq!(config.household.members, vec!["Ciara", "Daniel"]);
        assert!(config.validate().is_ok());
    }
}
