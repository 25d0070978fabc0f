//! Blocking execution of external tools with optional timeout.
//!
//! Every build-tool and merge-tool call goes through [`ToolRunner::run`]:
//! the pipeline waits for the child to exit and checks its status before
//! doing anything else. With a timeout configured, a child that runs too
//! long is killed. Transient failures (timeout, interrupted spawn) are
//! retried exactly once; a nonzero exit status is never retried.

use crate::packager::error::{Error, Result};
use std::ffi::OsStr;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;

/// Grace period for reaping a killed child.
const KILL_REAP_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs external tools in a fixed working directory.
#[derive(Clone, Debug)]
pub struct ToolRunner {
    work_dir: PathBuf,
    timeout: Option<Duration>,
}

impl ToolRunner {
    /// Creates a runner; `timeout` of `None` waits indefinitely.
    pub fn new(work_dir: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            work_dir: work_dir.into(),
            timeout,
        }
    }

    /// Directory tools run in.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Runs `program args...` to completion.
    ///
    /// # Errors
    ///
    /// - [`Error::ToolFailed`] if the tool exits unsuccessfully
    /// - [`Error::ToolTimedOut`] if it timed out twice
    /// - [`Error::CommandFailed`] if it could not be started
    pub async fn run<S: AsRef<OsStr>>(&self, program: &Path, args: &[S]) -> Result<()> {
        let command_line = display_command(program, args);

        match self.run_once(program, args, &command_line).await {
            Err(e) if is_transient(&e) => {
                log::warn!("{}; retrying once", e);
                self.run_once(program, args, &command_line).await
            }
            other => other,
        }
    }

    async fn run_once<S: AsRef<OsStr>>(
        &self,
        program: &Path,
        args: &[S],
        command_line: &str,
    ) -> Result<()> {
        log::debug!("Running `{}` in {}", command_line, self.work_dir.display());

        let mut child = Command::new(program)
            .args(args)
            .current_dir(&self.work_dir)
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| Error::CommandFailed {
                command: command_line.to_string(),
                error,
            })?;

        let waited = match self.timeout {
            None => child.wait().await,
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(waited) => waited,
                Err(_elapsed) => {
                    if let Err(e) = child.kill().await {
                        log::warn!("Failed to kill `{}`: {}", command_line, e);
                    }
                    let _ = tokio::time::timeout(KILL_REAP_TIMEOUT, child.wait()).await;
                    return Err(Error::ToolTimedOut {
                        command: command_line.to_string(),
                        limit,
                    });
                }
            },
        };

        let status = waited.map_err(|error| Error::CommandFailed {
            command: command_line.to_string(),
            error,
        })?;

        if !status.success() {
            return Err(Error::ToolFailed {
                command: command_line.to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }
}

fn is_transient(err: &Error) -> bool {
    match err {
        Error::ToolTimedOut { .. } => true,
        Error::CommandFailed { error, .. } => {
            matches!(error.kind(), ErrorKind::Interrupted | ErrorKind::WouldBlock)
        }
        _ => false,
    }
}

fn display_command<S: AsRef<OsStr>>(program: &Path, args: &[S]) -> String {
    let name = program
        .file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy();
    std::iter::once(name.into_owned())
        .chain(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_errors_are_not_transient() {
        let failed = Error::ToolFailed {
            command: "scons imfit".into(),
            code: Some(2),
        };
        assert!(!is_transient(&failed));

        let timed_out = Error::ToolTimedOut {
            command: "scons imfit".into(),
            limit: Duration::from_secs(5),
        };
        assert!(is_transient(&timed_out));

        let not_found = Error::CommandFailed {
            command: "scons".into(),
            error: std::io::Error::from(ErrorKind::NotFound),
        };
        assert!(!is_transient(&not_found));
    }

    #[test]
    fn command_line_uses_program_file_name() {
        let line = display_command(Path::new("/usr/bin/scons"), &["--static", "imfit"]);
        assert_eq!(line, "scons --static imfit");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ToolRunner::new(dir.path(), None);
        let err = runner
            .run(Path::new("/bin/sh"), &["-c", "exit 3"])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ToolFailed { code: Some(3), .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn hung_tool_times_out_after_one_retry() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("attempts");
        let script = format!("echo x >> '{}'; sleep 30", marker.display());
        let runner = ToolRunner::new(dir.path(), Some(Duration::from_millis(200)));

        let err = runner
            .run(Path::new("/bin/sh"), &["-c", script.as_str()])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ToolTimedOut { .. }));
        assert!(err.to_string().ends_with("timed out after 200ms"));
        let attempts = std::fs::read_to_string(&marker).unwrap();
        assert_eq!(attempts.lines().count(), 2);
    }
}
