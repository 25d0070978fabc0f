//! Command line argument parsing.

use crate::config::DEFAULT_CONFIG_FILE;
use crate::packager::DistributionVariant;
use clap::Parser;
use std::path::PathBuf;

/// Release packager for imfit
#[derive(Parser, Debug)]
#[command(
    name = "imfit_release",
    version,
    about = "Builds and packages imfit source and binary distributions",
    long_about = "Builds the executables for the current platform, stages the source and binary
distributions and writes them as gzipped tar archives in the source root.

Usage:
  imfit_release                      # binary, then source distribution
  imfit_release --source-only        # source distribution only
  imfit_release --binary-only -c path/to/release.toml

Exit code 0 = every requested archive was written (and delivered, when configured)."
)]
pub struct Args {
    /// Skip the binary distribution
    #[arg(long)]
    pub source_only: bool,

    /// Skip the source distribution
    #[arg(long)]
    pub binary_only: bool,

    /// Release configuration file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Print per-step detail
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Variants to produce, binary before source.
    ///
    /// Each `--*-only` flag switches the other variant off, so passing both
    /// leaves nothing to do.
    pub fn variants(&self) -> Vec<DistributionVariant> {
        DistributionVariant::ALL
            .into_iter()
            .filter(|variant| match variant {
                DistributionVariant::Binary => !self.source_only,
                DistributionVariant::Source => !self.binary_only,
            })
            .collect()
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_runs_binary_then_source() {
        let args = Args::try_parse_from(["imfit_release"]).unwrap();
        assert_eq!(
            args.variants(),
            [DistributionVariant::Binary, DistributionVariant::Source]
        );
        assert_eq!(args.config, PathBuf::from("release.toml"));
    }

    #[test]
    fn source_only_skips_binary() {
        let args = Args::try_parse_from(["imfit_release", "--source-only"]).unwrap();
        assert_eq!(args.variants(), [DistributionVariant::Source]);
    }

    #[test]
    fn binary_only_skips_source() {
        let args = Args::try_parse_from(["imfit_release", "--binary-only"]).unwrap();
        assert_eq!(args.variants(), [DistributionVariant::Binary]);
    }

    #[test]
    fn both_only_flags_select_nothing() {
        let args =
            Args::try_parse_from(["imfit_release", "--source-only", "--binary-only"]).unwrap();
        assert!(args.variants().is_empty());
    }
}
