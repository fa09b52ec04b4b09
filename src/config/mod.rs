#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, CourseCommand, EnrollmentCommand, StaffCommand, StudentCommand};
pub use toml_config::{AppConfig, LogFormat};

use crate::domain::model::DEFAULT_CAPACITY;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_positive_number, Validate};

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_CONFIG_FILE: &str = "course-registry.toml";

/// Effective settings after merging command-line flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: String,
    pub default_capacity: u32,
    pub log_level: Option<String>,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            default_capacity: DEFAULT_CAPACITY,
            log_level: None,
            log_format: LogFormat::Compact,
        }
    }
}

impl Settings {
    pub fn from_file(file: &AppConfig) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: file
                .storage
                .as_ref()
                .and_then(|s| s.data_dir.clone())
                .unwrap_or(defaults.data_dir),
            default_capacity: file
                .courses
                .as_ref()
                .and_then(|c| c.default_capacity)
                .unwrap_or(defaults.default_capacity),
            log_level: file.logging.as_ref().and_then(|l| l.level.clone()),
            log_format: file
                .logging
                .as_ref()
                .and_then(|l| l.format)
                .unwrap_or(defaults.log_format),
        }
    }

    pub fn with_data_dir(mut self, data_dir: Option<String>) -> Self {
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
        self
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("storage.data_dir", &self.data_dir)?;
        validate_positive_number("courses.default_capacity", self.default_capacity, 1)
    }
}
