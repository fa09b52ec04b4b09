pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use app::cli::CommandRunner;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{JsonFileStore, MemoryStore};
pub use app::services::{CourseService, EnrollmentService, StaffService, StudentService};
pub use config::{AppConfig, Settings};
pub use crate::core::storage_system::StorageSystem;
pub use utils::error::{EnrollmentError, RegistryError, Result};
