use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::types::Config;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },
    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Fails unless the host list handed to the checker is a regular file.
pub fn ensure_hosts_file(path: &Path) -> Result<()> {
    let meta = std::fs::metadata(path)
        .with_context(|| format!("Required hosts file '{}' not found", path.display()))?;
    if !meta.is_file() {
        bail!("Required hosts file '{}' is not a regular file", path.display());
    }
    Ok(())
}

/// Wrapper around the external certificate checker binary.
#[derive(Debug, Clone)]
pub struct Checker {
    command: String,
    hosts_file: PathBuf,
    timeout: Duration,
}

impl Checker {
    pub fn new(command: impl Into<String>, hosts_file: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            hosts_file: hosts_file.into(),
            timeout,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.checker_command.clone(), cfg.hosts_file.clone(), cfg.check_timeout)
    }

    /// Human-readable `<command> -file <hosts_file>`, for logs and errors only.
    pub fn command_line(&self) -> String {
        format!("{} -file {}", self.command, self.hosts_file.display())
    }

    /// Runs the checker through `/bin/sh -c` and returns its stdout.
    ///
    /// The hosts file goes in as `$1` so the shell never re-splits the path.
    pub async fn run(&self) -> Result<String, CheckError> {
        let command = self.command_line();
        debug!("running checker: {}", command);

        let child = Command::new("/bin/sh")
            .arg("-c")
            .arg(format!("{} -file \"$1\"", self.command))
            .arg("sh")
            .arg(&self.hosts_file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CheckError::Spawn { command: command.clone(), source })?;

        // Dropping the wait future on timeout kills the child.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(res) => res.map_err(|source| CheckError::Spawn { command: command.clone(), source })?,
            Err(_) => {
                return Err(CheckError::Timeout { command, timeout: self.timeout });
            }
        };

        if !output.status.success() {
            return Err(CheckError::Failed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("checker output:\n{}", stdout);
        Ok(stdout)
    }
}
