//! Distribution archive assembly.
//!
//! An archive is a gzip-compressed tar of a variant's composed file list,
//! read from the staging tree and stored under the manifest-relative names
//! (no staging-root prefix). Headers are written in deterministic mode so
//! the archive depends only on file names, permissions and contents.
//!
//! The archive is written as `<name>.partial` and renamed when complete, so
//! an aborted run never leaves a well-named but truncated archive behind.

mod delivery;

pub use delivery::deliver;

use crate::packager::{
    DistributionArtifact,
    checksum::calculate_file_sha256,
    error::{Error, ErrorExt, Result},
    manifest::{DistributionVariant, ResolvedFileList},
    platform::PlatformProfile,
    settings::Settings,
    staging::StagingTree,
};
use flate2::{Compression, write::GzEncoder};
use std::fs::File;
use std::path::{Path, PathBuf};
use tar::{Builder, HeaderMode};

/// Suffix of the source archive, independent of the host.
pub const SOURCE_SUFFIX: &str = "source";

/// Archive file name: `<product>-<version>-<suffix>.tar.gz`.
///
/// The binary archive takes the profile's platform suffix, the source
/// archive is always `source`.
pub fn archive_file_name(
    settings: &Settings,
    variant: DistributionVariant,
    profile: &PlatformProfile,
) -> String {
    let suffix = match variant {
        DistributionVariant::Binary => profile.archive_suffix(),
        DistributionVariant::Source => SOURCE_SUFFIX,
    };
    format!("{}-{}.tar.gz", settings.distribution_name(), suffix)
}

/// Creates the archive for `variant` from a staged tree.
///
/// # Errors
///
/// Returns [`Error::MissingFile`] naming the first composed path absent
/// from the staging tree; no archive is left behind in that case.
pub async fn assemble(
    settings: &Settings,
    variant: DistributionVariant,
    tree: &StagingTree,
    profile: &PlatformProfile,
) -> Result<DistributionArtifact> {
    let name = archive_file_name(settings, variant, profile);
    let path = settings.source_root().join(&name);
    let partial = settings.source_root().join(format!("{name}.partial"));
    let files = settings.manifest().compose_variant(variant);

    log::info!("Generating tar file {} ({} entries)...", name, files.len());

    let result = {
        let tree = tree.clone();
        let partial = partial.clone();
        tokio::task::spawn_blocking(move || write_archive(&partial, &tree, &files))
            .await
            .map_err(|e| Error::GenericError(format!("Archive task panicked: {}", e)))?
    };

    if let Err(e) = result {
        match tokio::fs::remove_file(&partial).await {
            Ok(()) => {}
            Err(cleanup) if cleanup.kind() == std::io::ErrorKind::NotFound => {}
            Err(cleanup) => log::warn!("Failed to remove {}: {}", partial.display(), cleanup),
        }
        return Err(e);
    }

    tokio::fs::rename(&partial, &path)
        .await
        .fs_context("finalizing archive", &path)?;

    let size = tokio::fs::metadata(&path)
        .await
        .fs_context("reading archive metadata", &path)?
        .len();
    let checksum = calculate_file_sha256(&path).await?;

    log::info!("✓ Created {} ({} bytes)", path.display(), size);
    log::debug!("SHA256 {}", checksum);

    Ok(DistributionArtifact {
        variant,
        path,
        size,
        checksum,
        delivered_to: None,
    })
}

fn write_archive(output: &Path, tree: &StagingTree, files: &ResolvedFileList) -> Result<()> {
    let file = File::create(output).fs_context("creating archive", output)?;
    let mut builder = Builder::new(GzEncoder::new(file, Compression::default()));
    builder.mode(HeaderMode::Deterministic);

    for relative in files {
        let source: PathBuf = tree.path(relative);
        if !source.is_file() {
            return Err(Error::MissingFile {
                path: relative.into(),
            });
        }
        builder
            .append_path_with_name(&source, relative)
            .fs_context("adding to archive", &source)?;
    }

    let encoder = builder
        .into_inner()
        .fs_context("finishing tar stream", output)?;
    let file = encoder.finish().fs_context("finishing gzip stream", output)?;
    file.sync_all().fs_context("syncing archive", output)?;
    Ok(())
}
