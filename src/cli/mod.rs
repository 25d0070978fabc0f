//! Command line interface for the release packager.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::config;
use crate::error::{CliError, ReleaseError, Result};
use crate::packager::{DistributionArtifact, Packager};

/// Main CLI entry point
///
/// Returns the process exit code. Pipeline failures are reported here with
/// recovery hints and turn into exit code 1; clap exits with code 2 on
/// malformed arguments before this point.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let runtime = RuntimeConfig::from(&args);

    match execute(&args, &runtime).await {
        Ok(()) => Ok(0),
        Err(e) => {
            report_failure(runtime.output(), &e)?;
            Ok(1)
        }
    }
}

async fn execute(args: &Args, runtime: &RuntimeConfig) -> Result<()> {
    let output = runtime.output();

    let variants = args.variants();
    if variants.is_empty() {
        output.warn("--source-only and --binary-only together select no distribution")?;
        output.success("Done.")?;
        return Ok(());
    }

    if !args.config.is_file() {
        return Err(CliError::InvalidArguments {
            reason: format!(
                "configuration file {} not found (use --config)",
                args.config.display()
            ),
        }
        .into());
    }

    let settings = config::load_settings(&args.config)?;
    let packager = Packager::for_host(settings)?;

    output.section(&format!(
        "Packaging {} {} for {}",
        packager.settings().product_name(),
        packager.settings().version(),
        packager.profile()
    ))?;
    output.info(&format!(
        "source root: {}",
        packager.settings().source_root().display()
    ))?;

    for variant in variants {
        output.progress(&format!("{variant} distribution"))?;
        let artifact = packager.package_variant(variant).await?;
        report_artifact(output, &artifact)?;
    }

    output.success("Done.")?;
    Ok(())
}

fn report_artifact(output: &OutputManager, artifact: &DistributionArtifact) -> Result<()> {
    output.indent(&format!(
        "{} ({} bytes)",
        artifact.path.display(),
        artifact.size
    ))?;
    output.verbose(&format!("sha256 {}", artifact.checksum))?;
    if let Some(delivered) = &artifact.delivered_to {
        output.indent(&format!("delivered to {}", delivered.display()))?;
    }
    Ok(())
}

fn report_failure(output: &OutputManager, error: &ReleaseError) -> Result<()> {
    output.error(&error.to_string())?;
    for suggestion in error.recovery_suggestions() {
        output.indent(&suggestion)?;
    }
    Ok(())
}
