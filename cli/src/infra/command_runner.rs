//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `TokioCommandRunner` is the production implementation that uses tokio
//! for async process execution with guaranteed timeout and kill.

use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tokio::process::Child;

use crate::application::ports::{CommandRunner, ShellOutput};

/// Default timeout for short probe commands (`which`, python import checks).
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(30);

/// Production `CommandRunner`.
///
/// `run` kills the child when the timeout fires; `run_shell` has no timeout
/// because a playbook run can legitimately take a long time.
pub struct TokioCommandRunner {
    timeout: Duration,
}

impl TokioCommandRunner {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TokioCommandRunner {
    fn default() -> Self {
        Self::new(DEFAULT_CMD_TIMEOUT)
    }
}

/// Wait for `child` while draining stdout/stderr concurrently.
///
/// Reading the pipes alongside `wait()` avoids a deadlock when the child
/// fills the OS pipe buffer before exiting.
async fn collect(mut child: Child, program: &str) -> Result<Output> {
    let mut stdout_handle = child.stdout.take();
    let mut stderr_handle = child.stderr.take();
    let (status, stdout, stderr) = tokio::join!(
        child.wait(),
        async {
            let mut buf = Vec::new();
            if let Some(ref mut h) = stdout_handle {
                let _ = h.read_to_end(&mut buf).await;
            }
            buf
        },
        async {
            let mut buf = Vec::new();
            if let Some(ref mut h) = stderr_handle {
                let _ = h.read_to_end(&mut buf).await;
            }
            buf
        },
    );
    Ok(Output {
        status: status.with_context(|| format!("waiting for {program}"))?,
        stdout,
        stderr,
    })
}

impl CommandRunner for TokioCommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        let child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to spawn {program}"))?;

        // Dropping the pending future on timeout drops the child, and
        // kill_on_drop terminates it.
        match tokio::time::timeout(self.timeout, collect(child, program)).await {
            Ok(result) => result,
            Err(_) => anyhow::bail!("{program} timed out after {}s", self.timeout.as_secs()),
        }
    }

    async fn run_shell(&self, command_line: &str) -> ShellOutput {
        let spawned = tokio::process::Command::new("sh")
            .arg("-c")
            .arg(command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .context("failed to spawn sh");

        let output = match spawned {
            Ok(child) => collect(child, "sh").await,
            Err(e) => Err(e),
        };
        match output {
            Ok(out) => ShellOutput {
                stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                spawn_error: None,
            },
            Err(e) => ShellOutput::spawn_failed(format!("{e:#}")),
        }
    }
}
