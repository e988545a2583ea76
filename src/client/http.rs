//! HTTP implementation of the registry API

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client as HttpClient, StatusCode};

use super::RegistryApi;
use crate::error::{RegistryError, Result};

/// Registry documentation API base URL
pub const API_BASE_URL: &str = "https://api.opentofu.org/registry/docs/providers";

/// Upper bound on outgoing requests; the registry is a shared public service
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// Registry API client
pub struct RegistryHttpClient {
    http: HttpClient,
    base_url: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl RegistryHttpClient {
    /// Create a new client with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(user_agent())
            .build()
            .map_err(|e| RegistryError::Network(e.to_string()))?;

        let quota = Quota::per_second(
            NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN),
        );

        Ok(Self {
            http,
            base_url: API_BASE_URL.to_string(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Point the client at another host (mirrors, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Full URL of an endpoint
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

/// Identifying client header sent with every request
pub fn user_agent() -> String {
    format!("tofuref v{}", env!("CARGO_PKG_VERSION"))
}

#[async_trait]
impl RegistryApi for RegistryHttpClient {
    async fn get(&self, endpoint: &str) -> Result<String> {
        self.rate_limiter.until_ready().await;

        let url = self.url_for(endpoint);
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(RegistryError::from)?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await.map_err(|e| {
                    RegistryError::InvalidResponse(format!("Failed to read response: {}", e))
                })?;
                Ok(body)
            }
            StatusCode::NOT_FOUND => Err(RegistryError::NotFound(endpoint.to_string()).into()),
            status => Err(RegistryError::Status {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            }
            .into()),
        }
    }
}
