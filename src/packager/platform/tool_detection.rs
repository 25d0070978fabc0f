//! External tool lookup.

use crate::packager::error::{Error, Result};
use std::path::PathBuf;

/// Locates an external tool on `PATH` (or at an explicit path).
///
/// Called once per tool before the first invocation so a missing build or
/// merge tool is reported by name instead of as a spawn failure midway
/// through a build.
pub fn locate_tool(tool: &str) -> Result<PathBuf> {
    match which::which(tool) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool, path.display());
            Ok(path)
        }
        Err(source) => {
            log::debug!("{} not found in PATH: {}", tool, source);
            Err(Error::ToolNotFound {
                tool: tool.to_string(),
                source,
            })
        }
    }
}
