//! Error types for packaging operations.
//!
//! Every failure in the pipeline is fatal. The variants below map onto the
//! three failure classes the pipeline reports (missing file, external tool
//! failure, delivery failure) plus configuration and platform errors.

use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while resolving, staging, building or archiving.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A manifest path has no backing file when it is copied or archived.
    #[error("missing file: {}", path.display())]
    MissingFile {
        /// Relative path as declared by the manifest
        path: PathBuf,
    },

    /// An external tool ran and exited unsuccessfully.
    #[error("`{command}` failed with exit code {}", code.map_or_else(|| "none (killed by signal)".to_string(), |c| c.to_string()))]
    ToolFailed {
        /// Command line that failed
        command: String,
        /// Exit code, if the process exited normally
        code: Option<i32>,
    },

    /// An external tool did not finish within the configured timeout.
    #[error("`{command}` timed out after {limit:?}")]
    ToolTimedOut {
        /// Command line that timed out
        command: String,
        /// Timeout that elapsed
        limit: std::time::Duration,
    },

    /// An external tool could not be started.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command line that could not be spawned
        command: String,
        /// Underlying spawn error
        error: std::io::Error,
    },

    /// An external tool is not installed.
    #[error("`{tool}` not found: {source}")]
    ToolNotFound {
        /// Tool name as configured
        tool: String,
        /// Lookup failure
        source: which::Error,
    },

    /// A finished archive could not be copied to its delivery directory.
    #[error("failed to deliver {} to {}: {error}", archive.display(), destination.display())]
    DeliveryFailed {
        /// Local archive (still valid)
        archive: PathBuf,
        /// Configured delivery directory
        destination: PathBuf,
        /// Copy failure
        error: std::io::Error,
    },

    /// No platform profile exists for the host.
    #[error("unsupported host platform: {os}/{arch}")]
    UnsupportedPlatform {
        /// Host operating system
        os: String,
        /// Host machine architecture
        arch: String,
    },

    /// The manifest violates one of its structural invariants.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// Filesystem operation failed on a specific path.
    #[error("{context} `{}`: {error}", path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path the operation touched
        path: PathBuf,
        /// Underlying error
        error: std::io::Error,
    },

    /// Free-form error.
    #[error("{0}")]
    GenericError(String),
}

/// Attach path context to IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`] naming the operation and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Attach a message to errors and missing values.
pub trait Context<T> {
    /// Wrap the error (or `None`) with a static message.
    fn context<C: Display>(self, context: C) -> Result<T>;

    /// Wrap the error (or `None`) with a lazily built message.
    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{}: {e}", f())))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::packager::Error::GenericError(format!($($arg)*)))
    };
}
