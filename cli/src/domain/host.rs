//! Snapshot of the invoking environment used to locate tools and fill the
//! inventory.
//!
//! Plain data; `crate::infra::host` fills it from the real process
//! environment and tests build it by hand.

use std::path::PathBuf;

use crate::domain::playbook::PLAYBOOK_TOOL;

/// System-wide directories searched after the per-user ones.
pub const SYSTEM_BIN_DIRS: &[&str] = &["/usr/bin", "/usr/local/bin"];

#[derive(Debug, Clone, Default)]
pub struct HostEnvironment {
    /// Install prefix of the active Python environment (`VIRTUAL_ENV`).
    pub runtime_prefix: Option<PathBuf>,
    /// Directory containing the running executable.
    pub exe_dir: Option<PathBuf>,
    /// The invoking user's home directory.
    pub home: Option<PathBuf>,
    /// Login name of the invoking account.
    pub user: Option<String>,
    /// Python interpreter used for the module fallback.
    pub python: PathBuf,
}

impl HostEnvironment {
    /// Candidate `ansible-playbook` paths, in search order.
    ///
    /// Entries whose base directory is unknown are skipped.
    #[must_use]
    pub fn playbook_candidates(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        if let Some(prefix) = &self.runtime_prefix {
            out.push(prefix.join("bin").join(PLAYBOOK_TOOL));
        }
        if let Some(dir) = &self.exe_dir {
            out.push(dir.join(PLAYBOOK_TOOL));
        }
        if let Some(home) = &self.home {
            out.push(home.join(".local").join("bin").join(PLAYBOOK_TOOL));
        }
        for dir in SYSTEM_BIN_DIRS {
            out.push(PathBuf::from(dir).join(PLAYBOOK_TOOL));
        }
        out
    }

    /// Places a `cargo`/`pipx`/system install of this SDK would land.
    #[must_use]
    pub fn sdk_install_candidates(&self, binary: &str) -> Vec<PathBuf> {
        let mut out = Vec::new();
        if let Some(home) = &self.home {
            out.push(home.join(".cargo").join("bin").join(binary));
            out.push(home.join(".local").join("bin").join(binary));
        }
        out.push(PathBuf::from("/usr/local/bin").join(binary));
        if let Some(home) = &self.home {
            out.push(
                home.join(".local")
                    .join("pipx")
                    .join("venvs")
                    .join(binary)
                    .join("bin")
                    .join(binary),
            );
        }
        out
    }
}
