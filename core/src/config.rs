//! Runtime configuration.
//!
//! Loaded from a JSON file when one is given; every field has a default,
//! so a partial file (or none at all) is valid.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ENV_VAR: &str = "IMPACTBRIDGE_ENV";
pub const DB_ENV_VAR: &str = "IMPACTBRIDGE_DB";

/// Caps applied by the report validators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    pub title_min:               usize,
    pub title_max:               usize,
    pub description_min:         usize,
    pub description_max:         usize,
    pub required_skill_min:      usize,
    pub required_skill_max:      usize,
    pub max_people_affected:     i64,
    pub max_available_resources: i64,
    pub name_min:                usize,
    pub name_max:                usize,
    pub skills_min:              usize,
    pub skills_max:              usize,
    pub contact_max:             usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            title_min:               5,
            title_max:               200,
            description_min:         20,
            description_max:         5000,
            required_skill_min:      3,
            required_skill_max:      100,
            max_people_affected:     10_000_000,
            max_available_resources: 1_000_000,
            name_min:                2,
            name_max:                100,
            skills_min:              3,
            skills_max:              200,
            contact_max:             200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    pub database_path:           String,
    /// Cases scoring at or above this count as high priority on the dashboard.
    pub high_priority_threshold: i64,
    pub cases_per_page:          usize,
    pub limits:                  ValidationLimits,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            database_path:           "impactbridge.db".into(),
            high_priority_threshold: 20,
            cases_per_page:          50,
            limits:                  ValidationLimits::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Development,
    Production,
    Testing,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "default" => Ok(Self::Development),
            "production" | "prod"             => Ok(Self::Production),
            "testing" | "test"                => Ok(Self::Testing),
            other => Err(anyhow::anyhow!("Unknown environment '{other}'")),
        }
    }
}

impl TriageConfig {
    /// Load from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: TriageConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        log::debug!("Loaded config from {path}");
        Ok(config)
    }

    /// Preset for a deployment environment.
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development | Environment::Production => Self::default(),
            Environment::Testing => Self {
                database_path: ":memory:".into(),
                ..Self::default()
            },
        }
    }

    /// Preset chosen by `IMPACTBRIDGE_ENV`, with `IMPACTBRIDGE_DB`
    /// overriding the database path.
    pub fn from_env() -> anyhow::Result<Self> {
        let env = match std::env::var(ENV_VAR) {
            Ok(v) => v.parse()?,
            Err(_) => Environment::Development,
        };
        let mut config = Self::for_environment(env);
        if let Ok(db) = std::env::var(DB_ENV_VAR) {
            config.database_path = db;
        }
        Ok(config)
    }

    /// Config with hardcoded defaults for use in tests.
    pub fn default_test() -> Self {
        Self::for_environment(Environment::Testing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: TriageConfig =
            serde_json::from_str(r#"{ "high_priority_threshold": 50, "limits": { "title_min": 1 } }"#)
                .unwrap();
        assert_eq!(cfg.high_priority_threshold, 50);
        assert_eq!(cfg.limits.title_min, 1);
        assert_eq!(cfg.limits.title_max, 200);
        assert_eq!(cfg.database_path, "impactbridge.db");
        assert_eq!(cfg.cases_per_page, 50);
    }

    #[test]
    fn environment_names_parse() {
        assert_eq!("Production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("test".parse::<Environment>().unwrap(), Environment::Testing);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn testing_preset_is_in_memory() {
        assert_eq!(TriageConfig::default_test().database_path, ":memory:");
    }
}
