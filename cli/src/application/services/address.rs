//! Application service: public address discovery.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::time::Duration;

use crate::application::ports::{AddressLookup, Reporter};
use crate::domain::ProvisionError;

/// Lookup services, in the order they are tried.
pub const ADDRESS_ENDPOINTS: &[&str] = &[
    "https://api.ipify.org",
    "https://ifconfig.me/ip",
    "https://icanhazip.com",
];

/// Per-request timeout for a single lookup service.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolve the host's public address using [`ADDRESS_ENDPOINTS`].
///
/// # Errors
///
/// Returns [`ProvisionError::AddressResolutionFailed`] if every endpoint fails.
pub async fn resolve_public_address(
    lookup: &impl AddressLookup,
    reporter: &impl Reporter,
) -> Result<String, ProvisionError> {
    resolve_with(lookup, reporter, ADDRESS_ENDPOINTS).await
}

/// Try `endpoints` in order; the first non-empty answer wins.
///
/// Each endpoint gets exactly one attempt. Failures are logged and skipped.
///
/// # Errors
///
/// Returns [`ProvisionError::AddressResolutionFailed`] if every endpoint fails.
pub async fn resolve_with(
    lookup: &impl AddressLookup,
    reporter: &impl Reporter,
    endpoints: &[&str],
) -> Result<String, ProvisionError> {
    for endpoint in endpoints {
        match lookup.fetch(endpoint, LOOKUP_TIMEOUT).await {
            Ok(body) => {
                let address = body.trim();
                if address.is_empty() {
                    reporter.warn(&format!("Failed to get IP from {endpoint}: empty response"));
                    continue;
                }
                reporter.info(&format!("Successfully detected public IP: {address}"));
                return Ok(address.to_string());
            }
            Err(e) => reporter.warn(&format!("Failed to get IP from {endpoint}: {e:#}")),
        }
    }
    Err(ProvisionError::AddressResolutionFailed {
        attempts: endpoints.len(),
    })
}
