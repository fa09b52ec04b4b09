use anyhow::Context;
use clap::Parser;
use course_registry::config::{LogFormat, DEFAULT_CONFIG_FILE};
use course_registry::utils::error::ErrorSeverity;
use course_registry::utils::{logger, validation::Validate};
use course_registry::{AppConfig, CliConfig, CommandRunner, Settings, StorageSystem};
use std::path::Path;

fn load_settings(config: &CliConfig) -> anyhow::Result<Settings> {
    let file = match config.config.as_deref() {
        Some(path) => Some(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Some(DEFAULT_CONFIG_FILE),
        None => None,
    };

    let app_config = match file {
        Some(path) => {
            let app_config = AppConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            app_config
                .validate()
                .with_context(|| format!("invalid config file '{}'", path))?;
            app_config
        }
        None => AppConfig::default(),
    };

    let settings = Settings::from_file(&app_config).with_data_dir(config.data_dir.clone());
    settings.validate().context("invalid settings")?;
    Ok(settings)
}

fn main() {
    let config = CliConfig::parse();

    let settings = match load_settings(&config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Check the configuration file and command-line flags");
            std::process::exit(2);
        }
    };

    let level = settings.log_level.as_deref();
    match settings.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose, level),
        LogFormat::Json => logger::init_json_logger(config.verbose, level),
    }
    tracing::debug!("Settings: {:?}", settings);

    let result = StorageSystem::open(&settings.data_dir).and_then(|storage| {
        CommandRunner::new(&storage, settings.default_capacity).execute(config.command)
    });

    match result {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Err(e) => {
            tracing::error!(
                "Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
