// Application layer: rule services and the CLI command runner.

#[cfg(feature = "cli")]
pub mod cli;
pub mod services;
