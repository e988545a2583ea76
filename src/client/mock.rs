//! Mock registry client for testing
//!
//! Serves canned bodies per endpoint and records every request, so tests can
//! verify how often the network would have been hit.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::RegistryApi;
use crate::error::{RegistryError, Result};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockRegistryClient::new()
///     .with_body("index.json", r#"{"providers": []}"#)
///     .await;
///
/// let body = mock.get("index.json").await?;
/// assert_eq!(mock.total_calls().await, 1);
/// ```
#[derive(Default, Clone)]
pub struct MockRegistryClient {
    /// Bodies keyed by endpoint
    bodies: Arc<Mutex<HashMap<String, String>>>,
    /// Error to return on the next call - consumed on first use
    error: Arc<Mutex<Option<RegistryError>>>,
    /// Fail every call with a network error
    offline: Arc<Mutex<bool>>,
    /// Endpoints requested, in order
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockRegistryClient {
    /// Create a new mock client with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the body returned for an endpoint.
    pub async fn with_body(self, endpoint: &str, body: impl Into<String>) -> Self {
        self.set_body(endpoint, body).await;
        self
    }

    /// Configure an error to return on the next call.
    pub async fn with_error(self, error: RegistryError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Replace the body of an endpoint after construction.
    pub async fn set_body(&self, endpoint: &str, body: impl Into<String>) {
        self.bodies
            .lock()
            .await
            .insert(endpoint.to_string(), body.into());
    }

    /// Simulate losing (or regaining) the network.
    pub async fn set_offline(&self, offline: bool) {
        *self.offline.lock().await = offline;
    }

    /// Number of requests made for one endpoint.
    pub async fn call_count(&self, endpoint: &str) -> usize {
        self.requests
            .lock()
            .await
            .iter()
            .filter(|e| *e == endpoint)
            .count()
    }

    /// Total number of requests made.
    pub async fn total_calls(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl RegistryApi for MockRegistryClient {
    async fn get(&self, endpoint: &str) -> Result<String> {
        self.requests.lock().await.push(endpoint.to_string());

        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        if *self.offline.lock().await {
            return Err(RegistryError::Network("Failed to connect to registry".to_string()).into());
        }

        self.bodies
            .lock()
            .await
            .get(endpoint)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(endpoint.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_mock_returns_body() {
        let mock = MockRegistryClient::new().with_body("index.json", "[]").await;

        assert_eq!(mock.get("index.json").await.unwrap(), "[]");
        assert_eq!(mock.call_count("index.json").await, 1);
    }

    #[tokio::test]
    async fn test_mock_unknown_endpoint_not_found() {
        let mock = MockRegistryClient::new();
        let err = mock.get("a/b/v1/index.md").await.unwrap_err();

        assert!(matches!(err, Error::Registry(RegistryError::NotFound(_))));
        assert_eq!(mock.total_calls().await, 1);
    }

    #[tokio::test]
    async fn test_mock_error_consumed_once() {
        let mock = MockRegistryClient::new()
            .with_body("index.json", "[]")
            .await
            .with_error(RegistryError::Network("timeout".to_string()))
            .await;

        assert!(mock.get("index.json").await.is_err());
        assert!(mock.get("index.json").await.is_ok());
        assert_eq!(mock.call_count("index.json").await, 2);
    }

    #[tokio::test]
    async fn test_mock_offline() {
        let mock = MockRegistryClient::new().with_body("index.json", "[]").await;
        mock.set_offline(true).await;

        assert!(mock.get("index.json").await.is_err());

        mock.set_offline(false).await;
        assert!(mock.get("index.json").await.is_ok());
    }
}
