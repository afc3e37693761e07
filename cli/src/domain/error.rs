//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Failures of a single provisioning run.
///
/// None of these cross the orchestrator boundary: `provision::setup` logs
/// them and reports `false`.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Failed to detect public IP from any service ({attempts} tried)")]
    AddressResolutionFailed { attempts: usize },

    #[error("Failed to write {artifact}: {reason}")]
    ArtifactWrite { artifact: String, reason: String },

    #[error("ansible-playbook not found. Please install ansible or check your installation.")]
    ToolNotFound,

    #[error("Ansible playbook failed: {0}")]
    ToolExecutionFailed(String),

    #[error("Failed to execute command: {0}")]
    ProcessSpawnFailed(String),
}

impl ProvisionError {
    /// Convenience constructor for `ArtifactWrite` from any displayable cause.
    pub fn artifact_write(artifact: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::ArtifactWrite {
            artifact: artifact.into(),
            reason: reason.to_string(),
        }
    }
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to request and configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Domain must be provided")]
    MissingDomain,

    #[error("Anthropic API key must be provided")]
    MissingApiKey,

    #[error("Invalid number of agents: {0} (must be at least 1)")]
    InvalidAgentCount(u32),
}
