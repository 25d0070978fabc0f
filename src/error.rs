//! Top-level error types for the release tool.
//!
//! Library failures arrive as [`crate::packager::Error`]; this layer adds
//! CLI and configuration errors and maps each failure to a short hint.

use crate::packager::Error as PackagerError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for release operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Release configuration could not be read or is invalid
    #[error("configuration {}: {reason}", path.display())]
    Config {
        /// Configuration file
        path: PathBuf,
        /// What is wrong with it
        reason: String,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Pipeline errors
    #[error(transparent)]
    Packager(#[from] PackagerError),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            Self::Packager(PackagerError::MissingFile { .. }) => vec![
                "Check that the file exists in the source root or remove it from the manifest".into(),
                "Re-running is safe: staging overwrites what an earlier run left behind".into(),
            ],
            Self::Packager(
                PackagerError::ToolFailed { .. } | PackagerError::ToolTimedOut { .. },
            ) => vec![
                "Inspect the build output above; intermediate binaries are left in place".into(),
            ],
            Self::Packager(PackagerError::ToolNotFound { tool, .. }) => vec![format!(
                "Install `{tool}` or point [build] in the configuration at it"
            )],
            Self::Packager(PackagerError::DeliveryFailed { archive, .. }) => vec![
                format!("The archive is still available at {}", archive.display()),
                "Create the delivery directory or fix [delivery] in the configuration".into(),
            ],
            Self::Config { .. } | Self::Packager(PackagerError::InvalidManifest(_)) => {
                vec!["Fix the release configuration and run again".into()]
            }
            _ => Vec::new(),
        }
    }
}
