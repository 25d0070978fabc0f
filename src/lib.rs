//! Release packaging for imfit
//!
//! This library builds the imfit executables for the current platform and
//! packages the project into versioned distribution archives:
//! - a binary distribution (`imfit-<version>-<platform>.tar.gz`)
//! - a source distribution (`imfit-<version>-source.tar.gz`)
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod config;
pub mod error;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, ReleaseError, Result};
