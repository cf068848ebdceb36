use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the install command tree.
///
/// Nothing here is retried; every variant travels unchanged to the process
/// boundary where it becomes a non-zero exit.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing required flag or unexpected positional arguments.
    #[error("{0}")]
    Usage(String),

    /// The installer factory rejected the assembled platform configuration.
    #[error("invalid {platform} configuration: {message}")]
    ConfigConstruction { platform: String, message: String },

    /// The installer failed while running.
    #[error("install failed: {0}")]
    InstallExecution(String),

    /// The cluster configuration file could not be read or written.
    #[error("cannot access {}", .path.display())]
    ConfigFile { path: PathBuf, #[source] source: std::io::Error },

    /// The cluster configuration file is not valid JSON.
    #[error("cannot parse {}", .path.display())]
    ConfigFormat { path: PathBuf, #[source] source: serde_json::Error },

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    pub fn config(platform: &str, message: impl Into<String>) -> Self {
        Self::ConfigConstruction { platform: platform.to_string(), message: message.into() }
    }

    pub fn install(message: impl Into<String>) -> Self {
        Self::InstallExecution(message.into())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
