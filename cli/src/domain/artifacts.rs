//! Provisioning artifact generation: pure functions, no I/O, no async.
//!
//! Each function accepts request data and returns the artifact content.
//! The caller is responsible for writing to disk.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::request::{ProvisioningRequest, entropy_u64};

/// Repository the playbook checks out on the target host.
pub const AGENT_REPO_URL: &str = "https://github.com/aidecentralized/nanda-agent.git";

/// The playbook always runs against the local machine.
pub const CONNECTION_MODE: &str = "local";

/// Interpreter the playbook uses on the target host.
pub const PYTHON_INTERPRETER: &str = "/usr/bin/python3";

pub const INVENTORY_FILE: &str = "ioa_inventory.ini";
pub const VARIABLES_DIR: &str = "group_vars";
pub const VARIABLES_FILE: &str = "all.yml";

// ── Layout ────────────────────────────────────────────────────────────────────

/// Where the artifacts of one run live on disk.
///
/// `Shared` places them directly under `root` (the historical
/// `/tmp/ioa_inventory.ini` + `/tmp/group_vars/all.yml`), so two concurrent
/// runs on one host race on the same files. `PerRun` nests them in
/// `root/nanda-run-<token>/`, which is removed with the artifacts.
///
/// The variables directory always sits next to the inventory: ansible only
/// picks up `group_vars/` relative to the inventory file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactLayout {
    Shared { root: PathBuf },
    PerRun { root: PathBuf, token: String },
}

impl ArtifactLayout {
    /// The fixed `/tmp` layout used when nothing else is configured.
    #[must_use]
    pub fn default_shared() -> Self {
        Self::Shared {
            root: PathBuf::from("/tmp"),
        }
    }

    /// Directory holding the inventory and the variables directory.
    #[must_use]
    pub fn base_dir(&self) -> PathBuf {
        match self {
            Self::Shared { root } => root.clone(),
            Self::PerRun { root, token } => root.join(format!("nanda-run-{token}")),
        }
    }

    /// Run-scoped directory that must be removed after the run, if any.
    #[must_use]
    pub fn run_dir(&self) -> Option<PathBuf> {
        match self {
            Self::Shared { .. } => None,
            Self::PerRun { .. } => Some(self.base_dir()),
        }
    }

    #[must_use]
    pub fn inventory_path(&self) -> PathBuf {
        self.base_dir().join(INVENTORY_FILE)
    }

    #[must_use]
    pub fn variables_dir(&self) -> PathBuf {
        self.base_dir().join(VARIABLES_DIR)
    }

    #[must_use]
    pub fn variables_path(&self) -> PathBuf {
        self.variables_dir().join(VARIABLES_FILE)
    }
}

/// Generate a run token: 16 lowercase hex characters.
#[must_use]
pub fn generate_run_token() -> String {
    format!("{:016x}", entropy_u64())
}

// ── Inventory ─────────────────────────────────────────────────────────────────

/// Render the ansible inventory for a single local server.
#[must_use]
pub fn render_inventory(request: &ProvisioningRequest, address: &str, user: &str) -> String {
    format!(
        "[servers]
server ansible_host={address}

[all:vars]
ansible_user={user}
ansible_connection={CONNECTION_MODE}
ansible_python_interpreter={PYTHON_INTERPRETER}
domain_name={domain}
agent_id_prefix={agent_id}
github_repo={AGENT_REPO_URL}
registry_url={registry}
",
        domain = request.domain(),
        agent_id = request.agent_id(),
        registry = request.registry_url(),
    )
}

// ── Variables document ────────────────────────────────────────────────────────

/// Contents of `group_vars/all.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupVars {
    pub anthropic_api_key: String,
    pub smithery_api_key: String,
    pub domain_name: String,
    pub agent_id_prefix: u32,
    pub github_repo: String,
    pub num_agents: u32,
    pub registry_url: String,
}

impl GroupVars {
    #[must_use]
    pub fn from_request(request: &ProvisioningRequest) -> Self {
        Self {
            anthropic_api_key: request.anthropic_api_key().to_string(),
            smithery_api_key: request.smithery_api_key().to_string(),
            domain_name: request.domain().to_string(),
            agent_id_prefix: request.agent_id(),
            github_repo: AGENT_REPO_URL.to_string(),
            num_agents: request.num_agents(),
            registry_url: request.registry_url().to_string(),
        }
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("cannot serialize group vars")
    }

    /// Parse a previously written document.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not a valid variables document.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("cannot parse group vars")
    }
}
