//! CLI module
//!
//! Provides:
//! - Argument parsing for CLI modes
//! - config_root resolution (flag → env → cwd)
//! - config.toml loading and app construction
//! - Logging setup
//! - Mode dispatch (shell, profiles, analyze, define, chat, search-url)

pub mod args;
pub mod config;
pub mod config_root;
pub mod dispatch;
pub mod factory;
pub mod logging;
pub mod shell;

// Re-exports
pub use args::{Args, Mode};
pub use config::{AppConfig, ConfigError};
pub use config_root::resolve_config_root;
pub use dispatch::{run_cli_mode, run_mode, Credentials, ExitCode};
pub use factory::{create_app_from_config, create_app_with_transport};
pub use logging::init_logging;
pub use shell::run_shell;

use crate::identity::AuthError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sign-in failed: {}", .0.sign_in_message())]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Failed(String),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
