//! Cached wrapper for the registry API client
//!
//! Every read goes through the on-disk cache first. Misses go to the network
//! and successful responses are stored verbatim, so JSON and text reads of
//! the same endpoint share one entry. Failures never propagate: they are
//! logged and turned into [`Payload::Empty`].

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::cache::{CacheStorage, key};
use crate::client::RegistryApi;
use crate::error::{Error, RegistryError};

/// How a response body should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Text,
}

/// Result of a registry fetch
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
    /// Nothing could be fetched; callers show "no content"
    Empty,
    /// The registry answered 404: the document does not exist
    Missing,
}

impl Payload {
    /// Text body, empty for failures (JSON is re-serialized)
    pub fn into_text(self) -> String {
        match self {
            Payload::Text(text) => text,
            Payload::Json(value) => value.to_string(),
            Payload::Empty | Payload::Missing => String::new(),
        }
    }

    /// JSON body, `None` for failures and text payloads
    pub fn into_json(self) -> Option<Value> {
        match self {
            Payload::Json(value) => Some(value),
            _ => None,
        }
    }

    /// True for any failed fetch, including a missing document
    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty | Payload::Missing)
    }
}

/// Where a fetch was served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchSource {
    Cache,
    Network,
    /// Expired index served because the refresh failed
    Stale,
    Failed(String),
}

/// One observable fetch, kept for the request log
#[derive(Debug, Clone)]
pub struct FetchEvent {
    pub endpoint: String,
    pub source: FetchSource,
    pub at: DateTime<Local>,
}

impl fmt::Display for FetchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = self.at.format("%H:%M:%S");
        match &self.source {
            FetchSource::Cache => write!(f, "{} GET {} from cache", time, self.endpoint),
            FetchSource::Network => write!(f, "{} GET {} from registry", time, self.endpoint),
            FetchSource::Stale => write!(f, "{} GET {} from stale cache", time, self.endpoint),
            FetchSource::Failed(reason) => {
                write!(f, "{} GET {} failed: {}", time, self.endpoint, reason)
            }
        }
    }
}

/// Fetches kept for the request log; older ones are dropped
const MAX_EVENTS: usize = 200;

/// Cached wrapper for any RegistryApi implementation.
pub struct CachedRegistryClient<C: RegistryApi> {
    inner: Arc<C>,
    cache: CacheStorage,
    events: Mutex<VecDeque<FetchEvent>>,
}

impl<C: RegistryApi> CachedRegistryClient<C> {
    /// Create a new cached client wrapper.
    pub fn new(inner: C, cache: CacheStorage) -> Self {
        Self {
            inner: Arc::new(inner),
            cache,
            events: Mutex::new(VecDeque::with_capacity(MAX_EVENTS)),
        }
    }

    /// The underlying network client
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// The cache store
    pub fn cache(&self) -> &CacheStorage {
        &self.cache
    }

    /// Fetch an endpoint, from cache when possible.
    pub async fn fetch(&self, endpoint: &str, format: Format) -> Payload {
        match self.cache.read(endpoint) {
            Ok(Some(body)) => match parse(&body, format) {
                Some(payload) => {
                    log::debug!("Cache hit: {}", endpoint);
                    self.record(endpoint, FetchSource::Cache);
                    return payload;
                }
                None => log::warn!("Ignoring unparseable cache entry for {}", endpoint),
            },
            Ok(None) => {}
            Err(e) => log::warn!("{}", e),
        }

        let fetched = match self.inner.get(endpoint).await {
            Ok(body) => match parse(&body, format) {
                Some(payload) => Ok((body, payload)),
                None => Err((
                    RegistryError::InvalidResponse(format!("{} is not valid JSON", endpoint))
                        .to_string(),
                    false,
                )),
            },
            Err(e) => {
                let missing = matches!(e, Error::Registry(RegistryError::NotFound(_)));
                Err((e.to_string(), missing))
            }
        };

        match fetched {
            Ok((body, payload)) => {
                // Store the raw body so JSON and text reads share one entry
                if let Err(e) = self.cache.write(endpoint, &body) {
                    log::warn!("Could not cache {}: {}", endpoint, e);
                }
                log::info!("GET {} from registry", endpoint);
                self.record(endpoint, FetchSource::Network);
                payload
            }
            Err((reason, missing)) => {
                log::error!("GET {} failed: {}", endpoint, reason);
                if let Some(payload) = self.stale_fallback(endpoint, format) {
                    self.record(endpoint, FetchSource::Stale);
                    return payload;
                }
                self.record(endpoint, FetchSource::Failed(reason));
                if missing {
                    Payload::Missing
                } else {
                    Payload::Empty
                }
            }
        }
    }

    /// Fetch an endpoint as text; empty on failure.
    pub async fn fetch_text(&self, endpoint: &str) -> String {
        self.fetch(endpoint, Format::Text).await.into_text()
    }

    /// Fetch an endpoint as JSON; `None` on failure.
    pub async fn fetch_json(&self, endpoint: &str) -> Option<Value> {
        self.fetch(endpoint, Format::Json).await.into_json()
    }

    /// Snapshot of the most recent fetches, oldest first
    pub fn events(&self) -> Vec<FetchEvent> {
        self.events
            .lock()
            .map(|e| e.iter().cloned().collect())
            .unwrap_or_default()
    }

    // Only the index expires, so only the index can have a stale copy
    fn stale_fallback(&self, endpoint: &str, format: Format) -> Option<Payload> {
        if !key::is_index(endpoint) {
            return None;
        }
        let body = self.cache.read_stale(endpoint).ok().flatten()?;
        let payload = parse(&body, format)?;
        log::warn!("Using expired {} until the registry is reachable", endpoint);
        Some(payload)
    }

    fn record(&self, endpoint: &str, source: FetchSource) {
        if let Ok(mut events) = self.events.lock() {
            if events.len() == MAX_EVENTS {
                events.pop_front();
            }
            events.push_back(FetchEvent {
                endpoint: endpoint.to_string(),
                source,
                at: Local::now(),
            });
        }
    }
}

fn parse(body: &str, format: Format) -> Option<Payload> {
    match format {
        Format::Text => Some(Payload::Text(body.to_string())),
        Format::Json => serde_json::from_str(body).ok().map(Payload::Json),
    }
}
