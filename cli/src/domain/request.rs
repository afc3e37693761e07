//! Provisioning request: the immutable input to one provisioning run.
//!
//! Pure data and validation only; no I/O.

use anyhow::Result;

use crate::domain::error::ConfigError;

/// Default NANDA registry endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "https://chat.nanda-registry.com";

/// Inclusive bounds of generated agent identifiers (six digits).
pub const AGENT_ID_MIN: u32 = 100_000;
pub const AGENT_ID_MAX: u32 = 999_999;

/// Everything a provisioning run needs, validated up front.
///
/// The agent id is fixed when the request is built. Retrying the same
/// request reuses it.
#[derive(Debug, Clone)]
pub struct ProvisioningRequest {
    domain: String,
    num_agents: u32,
    registry_url: String,
    agent_id: u32,
    anthropic_api_key: String,
    smithery_api_key: String,
}

impl ProvisioningRequest {
    /// Build a request, generating an agent id when `agent_id` is `None`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the domain or Anthropic key is empty or
    /// `num_agents` is zero.
    pub fn new(
        domain: &str,
        num_agents: u32,
        registry_url: &str,
        agent_id: Option<u32>,
        anthropic_api_key: &str,
        smithery_api_key: &str,
    ) -> Result<Self> {
        if domain.trim().is_empty() {
            return Err(ConfigError::MissingDomain.into());
        }
        if anthropic_api_key.is_empty() {
            return Err(ConfigError::MissingApiKey.into());
        }
        if num_agents == 0 {
            return Err(ConfigError::InvalidAgentCount(num_agents).into());
        }
        Ok(Self {
            domain: domain.to_string(),
            num_agents,
            registry_url: registry_url.to_string(),
            agent_id: agent_id.unwrap_or_else(generate_agent_id),
            anthropic_api_key: anthropic_api_key.to_string(),
            smithery_api_key: smithery_api_key.to_string(),
        })
    }

    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    #[must_use]
    pub fn num_agents(&self) -> u32 {
        self.num_agents
    }

    #[must_use]
    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    #[must_use]
    pub fn agent_id(&self) -> u32 {
        self.agent_id
    }

    #[must_use]
    pub fn anthropic_api_key(&self) -> &str {
        &self.anthropic_api_key
    }

    #[must_use]
    pub fn smithery_api_key(&self) -> &str {
        &self.smithery_api_key
    }
}

/// Generate a six-digit agent identifier in `[AGENT_ID_MIN, AGENT_ID_MAX]`.
#[must_use]
pub fn generate_agent_id() -> u32 {
    let span = u64::from(AGENT_ID_MAX - AGENT_ID_MIN + 1);
    // span < 2^20, so the remainder always fits in u32
    let offset = u32::try_from(entropy_u64() % span).unwrap_or(0);
    AGENT_ID_MIN + offset
}

/// 64 unpredictable bits without an RNG dependency.
///
/// Entropy sources: nanosecond timestamp and two independent `RandomState` hashes.
pub(crate) fn entropy_u64() -> u64 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u128(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0),
    );
    hasher.write_u64(RandomState::new().build_hasher().finish());
    hasher.write_u64(RandomState::new().build_hasher().finish());
    hasher.finish()
}
