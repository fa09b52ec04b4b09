use crate::utils::error::{RegistryError, Result};
use crate::utils::validation::{
    validate_one_of, validate_path, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional `course-registry.toml`. Every section may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: Option<StorageConfig>,
    pub logging: Option<LoggingConfig>,
    pub courses: Option<CoursesConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
}

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursesConfig {
    pub default_capacity: Option<u32>,
}

impl AppConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RegistryError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are
    /// left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RegistryError::Config {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        if let Some(data_dir) = self.storage.as_ref().and_then(|s| s.data_dir.as_deref()) {
            validate_path("storage.data_dir", data_dir)?;
        }
        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }
        if let Some(capacity) = self.courses.as_ref().and_then(|c| c.default_capacity) {
            validate_positive_number("courses.default_capacity", capacity, 1)?;
        }
        Ok(())
    }
}
