//! Executable builds through the external build driver.
//!
//! On the standard profile each target is built once. On the legacy
//! dual-architecture profile each target is built twice (i386, then
//! x86_64), each result is moved aside under an architecture-tagged name,
//! and the merge tool combines both into the canonical executable.
//!
//! All builds share one output file name per target, so invocations are
//! strictly sequential. Nothing is cleaned up on failure except a partial
//! merge output; tagged intermediates stay on disk for inspection.

use super::process::ToolRunner;
use super::profile::{ARCH_NARROW_FLAG, ARCH_TAG_32, ARCH_TAG_64, PlatformProfile};
use super::tool_detection::locate_tool;
use crate::{
    bail,
    packager::{
        error::{Error, ErrorExt, Result},
        settings::BuildSettings,
    },
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Drives the build tool (and merge tool) for one platform profile.
#[derive(Debug)]
pub struct BuildDriver {
    profile: PlatformProfile,
    runner: ToolRunner,
    build_tool: PathBuf,
    merge_tool: Option<PathBuf>,
}

impl BuildDriver {
    /// Creates a driver that builds in `work_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ToolNotFound`] if the build tool, or on the
    /// dual-arch profile the merge tool, cannot be located.
    pub fn new(profile: PlatformProfile, settings: &BuildSettings, work_dir: &Path) -> Result<Self> {
        let build_tool = locate_tool(&settings.tool)?;
        let merge_tool = if profile.is_dual_arch() {
            Some(locate_tool(&settings.merge_tool)?)
        } else {
            None
        };

        Ok(Self {
            profile,
            runner: ToolRunner::new(work_dir, settings.timeout()),
            build_tool,
            merge_tool,
        })
    }

    /// Active profile.
    pub fn profile(&self) -> PlatformProfile {
        self.profile
    }

    /// Builds every target in order and returns the produced executables.
    pub async fn build(&self, targets: &[&str]) -> Result<Vec<PathBuf>> {
        let mut produced = Vec::with_capacity(targets.len());

        for target in targets {
            log::info!("Building {} ({})", target, self.profile);
            let path = if self.profile.is_dual_arch() {
                self.build_dual_arch(target).await?
            } else {
                self.invoke_build(target, false).await?
            };
            log::info!("✓ Built {}", path.display());
            produced.push(path);
        }

        Ok(produced)
    }

    async fn build_dual_arch(&self, target: &str) -> Result<PathBuf> {
        let output = self.output_path(target);

        let narrow = self.invoke_build(target, true).await?;
        let tagged_32 = self.tagged_path(target, ARCH_TAG_32);
        tokio::fs::rename(&narrow, &tagged_32)
            .await
            .fs_context("renaming 32-bit build", &tagged_32)?;

        let wide = self.invoke_build(target, false).await?;
        let tagged_64 = self.tagged_path(target, ARCH_TAG_64);
        tokio::fs::rename(&wide, &tagged_64)
            .await
            .fs_context("renaming 64-bit build", &tagged_64)?;

        let Some(merge_tool) = self.merge_tool.as_deref() else {
            bail!("dual-arch build of {} without a merge tool", target);
        };

        let args: [&OsStr; 5] = [
            OsStr::new("-create"),
            tagged_32.as_os_str(),
            tagged_64.as_os_str(),
            OsStr::new("-output"),
            output.as_os_str(),
        ];

        if let Err(e) = self.runner.run(merge_tool, &args).await {
            // No canonical executable may survive a failed merge.
            if output.exists() {
                tokio::fs::remove_file(&output)
                    .await
                    .fs_context("removing partial merge output", &output)?;
            }
            return Err(e);
        }

        if !output.is_file() {
            return Err(Error::MissingFile {
                path: PathBuf::from(target),
            });
        }

        Ok(output)
    }

    /// One build-tool run; returns the canonical output path.
    async fn invoke_build(&self, target: &str, narrow: bool) -> Result<PathBuf> {
        let mut args: Vec<&str> = self.profile.build_flags().to_vec();
        if narrow {
            args.push(ARCH_NARROW_FLAG);
        }
        args.push(target);

        self.runner.run(&self.build_tool, &args).await?;

        let output = self.output_path(target);
        if !output.is_file() {
            return Err(Error::MissingFile {
                path: PathBuf::from(target),
            });
        }
        Ok(output)
    }

    fn output_path(&self, target: &str) -> PathBuf {
        self.runner.work_dir().join(target)
    }

    fn tagged_path(&self, target: &str, tag: &str) -> PathBuf {
        self.runner.work_dir().join(format!("{target}_{tag}"))
    }
}
