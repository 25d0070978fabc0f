//! Copying finished archives to their delivery directory.

use crate::packager::error::{Error, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Copies `archive` into `destination` and returns the delivered path.
///
/// The destination directory must already exist; it is never created. Any
/// failure is reported as [`Error::DeliveryFailed`] and leaves the local
/// archive untouched.
pub async fn deliver(archive: &Path, destination: &Path) -> Result<PathBuf> {
    let failed = |error: io::Error| Error::DeliveryFailed {
        archive: archive.to_path_buf(),
        destination: destination.to_path_buf(),
        error,
    };

    if !destination.is_dir() {
        return Err(failed(io::Error::new(
            io::ErrorKind::NotFound,
            "delivery directory does not exist",
        )));
    }

    let file_name = archive.file_name().ok_or_else(|| {
        failed(io::Error::new(
            io::ErrorKind::InvalidInput,
            "archive has no file name",
        ))
    })?;
    let target = destination.join(file_name);

    log::info!(
        "Copying gzipped tar file {} to {}...",
        archive.display(),
        destination.display()
    );
    tokio::fs::copy(archive, &target).await.map_err(failed)?;

    Ok(target)
}
