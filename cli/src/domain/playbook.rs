//! Playbook invocation: command line construction and result interpretation.
//!
//! Pure functions only: no I/O, no async, no process spawning.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::error::ProvisionError;

/// Bare name of the configuration tool's entry point.
pub const PLAYBOOK_TOOL: &str = "ansible-playbook";

/// Python module that provides `ansible-playbook` when no script is installed.
pub const PLAYBOOK_MODULE: &str = "ansible.playbook";

/// Python package probed by the module fallback.
pub const ANSIBLE_PACKAGE: &str = "ansible";

/// Verbosity flag appended when the caller asks for verbose output.
pub const VERBOSE_FLAG: &str = "-vvv";

/// Marker in the play recap signalling failed tasks.
pub const FAILED_TASKS_MARKER: &str = "failed=1";

/// A resolved way of running `ansible-playbook`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInvocation {
    /// An executable script on disk.
    Executable(PathBuf),
    /// `<interpreter> -m ansible.playbook`.
    PythonModule { interpreter: PathBuf },
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Executable(path) => f.write_str(&shell_quote(path)),
            Self::PythonModule { interpreter } => {
                write!(f, "{} -m {PLAYBOOK_MODULE}", shell_quote(interpreter))
            }
        }
    }
}

/// Build the shell command line for one playbook run.
///
/// `<invocation> -i <inventory> <playbook> [-vvv]`
#[must_use]
pub fn build_command_line(
    tool: &ToolInvocation,
    inventory: &Path,
    playbook: &Path,
    verbose: bool,
) -> String {
    let mut cmd = format!(
        "{tool} -i {} {}",
        shell_quote(inventory),
        shell_quote(playbook)
    );
    if verbose {
        cmd.push(' ');
        cmd.push_str(VERBOSE_FLAG);
    }
    cmd
}

/// Decide whether a finished playbook run succeeded.
///
/// Any stderr output counts as failure, as does a recap reporting failed
/// tasks. The exit status is deliberately not consulted.
///
/// # Errors
///
/// Returns [`ProvisionError::ToolExecutionFailed`] describing the failure.
pub fn interpret(stdout: &str, stderr: &str) -> Result<(), ProvisionError> {
    if !stderr.is_empty() {
        return Err(ProvisionError::ToolExecutionFailed(stderr.trim().to_string()));
    }
    if stdout.contains(FAILED_TASKS_MARKER) {
        return Err(ProvisionError::ToolExecutionFailed(
            "playbook recap reports failed tasks".to_string(),
        ));
    }
    Ok(())
}

/// Quote a path for `sh -c` when it contains anything beyond a safe set.
fn shell_quote(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let safe = !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+:@%,".contains(c));
    if safe {
        raw.into_owned()
    } else {
        format!("'{}'", raw.replace('\'', r"'\''"))
    }
}
