//! Test fixtures and builders for registry payloads
//!
//! Provides builders for the JSON documents served by the registry.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use serde_json::{Value, json};

// ============================================================================
// ProviderJsonBuilder
// ============================================================================

/// Builder for one record of the provider index.
///
/// # Example
/// ```ignore
/// let aws = ProviderJsonBuilder::new("hashicorp", "aws")
///     .versions(&["v5.0.0", "v4.67.0"])
///     .popularity(100)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ProviderJsonBuilder {
    namespace: String,
    name: String,
    description: String,
    fork_count: u64,
    is_blocked: bool,
    popularity: i64,
    versions: Vec<String>,
    fork_of: Option<String>,
}

impl ProviderJsonBuilder {
    /// Create a new builder with one version, `v1.0.0`.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            description: format!("The {} provider", &name),
            namespace: namespace.into(),
            name,
            fork_count: 0,
            is_blocked: false,
            popularity: 0,
            versions: vec!["v1.0.0".to_string()],
            fork_of: None,
        }
    }

    /// Set the versions, newest first.
    pub fn versions(mut self, versions: &[&str]) -> Self {
        self.versions = versions.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Set the popularity score.
    pub fn popularity(mut self, popularity: i64) -> Self {
        self.popularity = popularity;
        self
    }

    /// Mark as blocked.
    pub fn blocked(mut self) -> Self {
        self.is_blocked = true;
        self
    }

    /// Mark as a fork of another provider.
    pub fn fork_of(mut self, display: impl Into<String>) -> Self {
        self.fork_of = Some(display.into());
        self
    }

    /// Build the JSON record.
    pub fn build(self) -> Value {
        let versions: Vec<Value> = self
            .versions
            .iter()
            .map(|id| json!({ "id": id, "published": "2024-01-01T00:00:00Z" }))
            .collect();

        let mut record = json!({
            "addr": {
                "display": format!("{}/{}", self.namespace, self.name),
                "namespace": self.namespace,
                "name": self.name,
            },
            "description": self.description,
            "fork_count": self.fork_count,
            "is_blocked": self.is_blocked,
            "popularity": self.popularity,
            "versions": versions,
        });

        if let Some(parent) = self.fork_of {
            record["fork_of"] = json!({ "display": parent });
        }
        record
    }
}

/// Serialize a provider index document
pub fn provider_index(providers: Vec<Value>) -> String {
    json!({ "providers": providers }).to_string()
}

// ============================================================================
// ResourceIndexBuilder
// ============================================================================

/// Builder for a provider version's `index.json`.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndexBuilder {
    guides: Vec<String>,
    resources: Vec<String>,
    datasources: Vec<String>,
    functions: Vec<String>,
}

impl ResourceIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guides(mut self, names: &[&str]) -> Self {
        self.guides = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn resources(mut self, names: &[&str]) -> Self {
        self.resources = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn datasources(mut self, names: &[&str]) -> Self {
        self.datasources = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn functions(mut self, names: &[&str]) -> Self {
        self.functions = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Build the serialized document.
    pub fn build(self) -> String {
        fn entries(names: &[String]) -> Vec<Value> {
            names.iter().map(|n| json!({ "name": n })).collect()
        }

        json!({
            "docs": {
                "guides": entries(&self.guides),
                "resources": entries(&self.resources),
                "datasources": entries(&self.datasources),
                "functions": entries(&self.functions),
            }
        })
        .to_string()
    }
}

// ============================================================================
// Silent server
// ============================================================================

/// Local HTTP address that accepts connections and never answers.
///
/// Connections are held open until the returned task is aborted or the
/// runtime shuts down.
pub async fn silent_server() -> (String, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let url = format!("http://{}", listener.local_addr().expect("local addr"));
    let task = tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            open.push(stream);
        }
    });
    (url, task)
}
