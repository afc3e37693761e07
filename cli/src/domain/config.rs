//! Domain types for the optional SDK configuration file.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::artifacts::{ArtifactLayout, generate_run_token};

/// Top-level configuration stored in `~/.nanda/config.yaml`.
///
/// Every field is optional; CLI flags and environment variables win over the
/// file, and the file wins over built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SdkConfig {
    /// Registry URL used when `--registry-url` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_url: Option<String>,
    /// Playbook path used when `--playbook` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playbook: Option<PathBuf>,
    /// Artifact placement.
    pub artifacts: ArtifactsConfig,
}

/// Where generated inventory/variables files go.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Directory the artifacts are written under.
    pub root: PathBuf,
    /// Nest each run in its own token directory.
    pub per_run: bool,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/tmp"),
            per_run: false,
        }
    }
}

impl ArtifactsConfig {
    /// Resolve the layout for a new run. `force_per_run` comes from the CLI.
    #[must_use]
    pub fn layout(&self, force_per_run: bool) -> ArtifactLayout {
        if self.per_run || force_per_run {
            ArtifactLayout::PerRun {
                root: self.root.clone(),
                token: generate_run_token(),
            }
        } else {
            ArtifactLayout::Shared {
                root: self.root.clone(),
            }
        }
    }
}
