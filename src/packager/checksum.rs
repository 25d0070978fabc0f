//! SHA256 checksums for archives and staging trees.

use crate::packager::error::{ErrorExt, Result};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Calculates the SHA256 checksum of a single file.
///
/// Reads the file in 8KB chunks to handle large archives efficiently.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the file cannot be read
pub async fn calculate_file_sha256(file_path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(file_path)
        .await
        .fs_context("opening file for hashing", file_path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", file_path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Calculates the SHA256 checksum of a directory tree.
///
/// Hashes each regular file's relative path and content in sorted path
/// order, so the result depends only on names and bytes, never on
/// timestamps. Two stagings of unchanged sources hash identically.
///
/// # Algorithm
///
/// 1. Recursively collect all files using walkdir
/// 2. Sort paths lexicographically for deterministic order
/// 3. For each file: hash(relative_path + NUL + file_content)
/// 4. Return final combined hash
pub async fn calculate_tree_sha256(dir_path: &Path) -> Result<String> {
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(dir_path).follow_links(false) {
        let entry = entry.map_err(|e| {
            crate::packager::Error::GenericError(format!(
                "walking {}: {}",
                dir_path.display(),
                e
            ))
        })?;
        if entry.file_type().is_file() {
            entries.push(entry.into_path());
        }
    }
    entries.sort();

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    for path in entries {
        if let Ok(rel_path) = path.strip_prefix(dir_path) {
            hasher.update(rel_path.to_string_lossy().as_bytes());
            hasher.update([0u8]);
        }

        let mut file = tokio::fs::File::open(&path)
            .await
            .fs_context("opening file for hashing", &path)?;

        loop {
            let n = file
                .read(&mut buffer)
                .await
                .fs_context("reading file for hash calculation", &path)?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
    }

    Ok(format!("{:x}", hasher.finalize()))
}
