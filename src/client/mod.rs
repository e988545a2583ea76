//! OpenTofu registry API client

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod fixtures;
pub mod http;
#[cfg(test)]
pub mod mock;

pub use http::RegistryHttpClient;
#[cfg(test)]
pub use mock::MockRegistryClient;

/// Read-only access to the provider documentation registry.
///
/// Implementations only talk to the network; caching is layered on top by
/// [`CachedRegistryClient`](crate::cache::CachedRegistryClient).
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Fetch the raw body of an endpoint (e.g. `index.json` or
    /// `hashicorp/aws/v5.0.0/index.md`)
    async fn get(&self, endpoint: &str) -> Result<String>;
}
