//! File system utilities for staging and delivery.
//!
//! Provides file operations with automatic directory creation and
//! path-annotated errors.

use crate::packager::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates a directory if it does not exist; an existing one is left alone.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    match fs::create_dir(path).await {
        Ok(()) => {
            log::debug!("Created {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            // Missing parent: fall back to the recursive form.
            fs::create_dir_all(path)
                .await
                .fs_context("creating directory", path)
        }
        Err(e) => Err(Error::Fs {
            context: "creating directory",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Copies a regular file, creating any parent directories of the
/// destination as necessary. An existing destination is overwritten.
///
/// `label` is the manifest-relative name reported if `from` is missing.
pub async fn copy_file(from: &Path, to: &Path, label: &str) -> Result<()> {
    if !from.is_file() {
        return Err(Error::MissingFile { path: label.into() });
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file to", to)?;
    Ok(())
}

/// Writes `contents` to `path` unless the file already holds exactly those
/// bytes, so repeated staging leaves the file untouched.
pub async fn write_if_changed(path: &Path, contents: &[u8]) -> Result<()> {
    match fs::read(path).await {
        Ok(existing) if existing == contents => return Ok(()),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => {
            return Err(Error::Fs {
                context: "reading",
                path: path.to_path_buf(),
                error: e,
            });
        }
    }
    fs::write(path, contents).await.fs_context("writing", path)
}
