//! Network infrastructure: implements `AddressLookup` with blocking `ureq`
//! calls moved onto `spawn_blocking`.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::AddressLookup;

/// Production implementation that performs real HTTP requests.
pub struct UreqAddressLookup;

impl AddressLookup for UreqAddressLookup {
    async fn fetch(&self, endpoint: &str, timeout: Duration) -> Result<String> {
        let url = endpoint.to_string();
        tokio::task::spawn_blocking(move || {
            let agent = ureq::AgentBuilder::new().timeout(timeout).build();
            let response = agent
                .get(&url)
                .call()
                .with_context(|| format!("GET {url}"))?;
            // ureq already errors on 4xx/5xx; other 2xx/3xx bodies are not an address.
            anyhow::ensure!(
                response.status() == 200,
                "unexpected status {} from {url}",
                response.status()
            );
            response
                .into_string()
                .with_context(|| format!("reading response from {url}"))
        })
        .await
        .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
    }
}
