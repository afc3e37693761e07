//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::SdkConfig;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Captured result of a shell command line.
///
/// Execution never fails from the caller's point of view: when the shell
/// cannot be spawned, `stdout` is empty, `stderr` holds the error message and
/// `spawn_error` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    pub stdout: String,
    pub stderr: String,
    pub spawn_error: Option<String>,
}

impl ShellOutput {
    /// Build the output reported when the process layer itself failed.
    #[must_use]
    pub fn spawn_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            stdout: String::new(),
            stderr: message.clone(),
            spawn_error: Some(message),
        }
    }
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program with the runner's default timeout and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or times out.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run `command_line` through `sh -c` to completion, with no timeout.
    ///
    /// Never fails; see [`ShellOutput`].
    async fn run_shell(&self, command_line: &str) -> ShellOutput;
}

// ── Network Port ──────────────────────────────────────────────────────────────

/// Abstracts the HTTP GET used for public address discovery.
#[allow(async_fn_in_trait)]
pub trait AddressLookup {
    /// Fetch `endpoint` and return the response body of a 200 response.
    ///
    /// # Errors
    ///
    /// Returns an error on timeout, transport failure or any non-200 status.
    async fn fetch(&self, endpoint: &str, timeout: Duration) -> Result<String>;
}

// ── Reporting Port ────────────────────────────────────────────────────────────

/// Log sink injected into every component. Sync, so it can be called from `Drop`.
pub trait Reporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit an informational message.
    fn info(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
    /// Emit an error message. Never suppressed.
    fn error(&self, message: &str);
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Local filesystem operations used for artifacts and executable probing.
///
/// Sync so that cleanup can run from `Drop`.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    /// `true` if `path` is a regular file with an execute bit set.
    fn is_executable(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Write `content` to a file readable by the owner only (mode `0600` on
    /// Unix). The file never exists with wider permissions.
    fn write_private(&self, path: &Path, content: &str) -> Result<()>;
    fn remove_file(&self, path: &Path) -> Result<()>;
    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> Result<()>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading of the SDK configuration file.
pub trait ConfigStore {
    /// Load the configuration, returning defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<SdkConfig>;

    /// Path of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
