//! Documentation service
//!
//! Loads the provider index, resource lists and documents through the cached
//! registry client and writes the results into the plain model records.
//! Every fetch failure ends up as an empty body; nothing here returns an
//! error to the UI.

use serde_json::Value;

use crate::cache::{CacheStorage, CachedRegistryClient, Format, INDEX_KEY, Payload, key};
use crate::client::RegistryApi;
use crate::models::{
    OVERVIEW_DOC, Provider, Resource, ResourceId, ResourceKind, strip_front_matter,
};

/// Fetch behaviour for providers and resources
pub struct DocsService<C: RegistryApi> {
    client: CachedRegistryClient<C>,
}

impl<C: RegistryApi> DocsService<C> {
    pub fn new(client: CachedRegistryClient<C>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &CachedRegistryClient<C> {
        &self.client
    }

    pub fn cache(&self) -> &CacheStorage {
        self.client.cache()
    }

    /// Load every provider of the registry index, in index order.
    ///
    /// Records that cannot be parsed or have no versions are skipped.
    pub async fn load_providers(&self) -> Vec<Provider> {
        let Some(index) = self.client.fetch_json(INDEX_KEY).await else {
            return Vec::new();
        };

        let cached = self.cache().cached_providers(OVERVIEW_DOC).unwrap_or_else(|e| {
            log::warn!("{}", e);
            Default::default()
        });

        let mut providers = parse_provider_index(index);
        for provider in &mut providers {
            provider.cached = cached.contains(&key::flat_name(&provider.display_name()));
        }

        log::info!("Loaded {} providers", providers.len());
        providers
    }

    /// Overview of the provider's active version, front matter removed.
    ///
    /// Kept in memory until the active version changes. A version without
    /// an overview (404) is remembered as empty; any other failed fetch is
    /// not, so the next call retries.
    pub async fn overview(&self, provider: &mut Provider) -> String {
        if let Some(overview) = provider.overview() {
            return overview.to_string();
        }

        let payload = self
            .client
            .fetch(&provider.overview_endpoint(), Format::Text)
            .await;
        if payload == Payload::Missing {
            provider.set_overview(String::new());
            return String::new();
        }
        if payload.is_empty() {
            return String::new();
        }

        let body = strip_front_matter(&payload.into_text());
        provider.set_overview(body.clone());
        provider.cached = true;
        body
    }

    /// Load the resource list unless it is already loaded for the active version
    pub async fn load_resources(&self, provider: &mut Provider) {
        if provider.resources_loaded() {
            return;
        }
        self.reload_resources(provider).await;
    }

    /// Fetch the resource index of the active version and rebuild the list.
    ///
    /// A version with no resource index (404) loads as an empty list; other
    /// failures leave the list unloaded so the next call retries.
    pub async fn reload_resources(&self, provider: &mut Provider) {
        provider.clear_resources();

        let index = match self
            .client
            .fetch(&provider.resource_index_endpoint(), Format::Json)
            .await
        {
            Payload::Json(index) => index,
            Payload::Missing => {
                provider.set_resources(Vec::new());
                return;
            }
            _ => return,
        };

        let cached = self
            .cache()
            .cached_suffixes(provider.organization(), provider.name())
            .unwrap_or_else(|e| {
                log::warn!("{}", e);
                Default::default()
            });

        let mut resources = Vec::new();
        for kind in ResourceKind::ALL {
            let mut names: Vec<&str> = index["docs"][kind.path_segment()]
                .as_array()
                .map(|entries| entries.iter().filter_map(|e| e["name"].as_str()).collect())
                .unwrap_or_default();
            names.sort_unstable();

            for name in names {
                let mut resource =
                    Resource::new(provider.id.clone(), provider.active_version(), kind, name);
                resource.cached = cached.contains(&key::flat_name(&resource.doc_suffix()));
                resources.push(resource);
            }
        }

        log::debug!(
            "{} {}: {} documents",
            provider.id,
            provider.active_version(),
            resources.len()
        );
        provider.set_resources(resources);
    }

    /// Markdown body of one resource, front matter removed.
    ///
    /// Marks the resource as cached and re-sorts the provider's list, since
    /// cached entries are listed first.
    pub async fn content(&self, provider: &mut Provider, id: &ResourceId) -> String {
        let endpoint = match provider.resource(id) {
            Some(resource) => match &resource.content {
                Some(content) => return content.clone(),
                None => resource.endpoint(),
            },
            None => {
                log::warn!("{} is not listed for {}", id, provider.active_version());
                return String::new();
            }
        };

        let payload = self.client.fetch(&endpoint, Format::Text).await;
        if payload.is_empty() {
            return String::new();
        }

        let body = strip_front_matter(&payload.into_text());
        if let Some(resource) = provider.resource_mut(id) {
            resource.content = Some(body.clone());
            resource.cached = true;
        }
        provider.sort_resources();
        body
    }

    /// Recompute the provider's cached flag from disk
    pub fn refresh_cached(&self, provider: &mut Provider) {
        provider.cached =
            self.cache()
                .exists_any_version(provider.organization(), provider.name(), OVERVIEW_DOC);
    }
}

/// Providers of a registry index document, in index order.
///
/// Accepts `{"providers": [...]}` or a bare array. Records that cannot be
/// parsed or have no versions are skipped.
pub fn parse_provider_index(index: Value) -> Vec<Provider> {
    let records = match index {
        Value::Array(records) => records,
        Value::Object(mut map) => match map.remove("providers") {
            Some(Value::Array(records)) => records,
            _ => {
                log::error!("Provider index has no providers list");
                return Vec::new();
            }
        },
        _ => {
            log::error!("Unexpected provider index format");
            return Vec::new();
        }
    };

    let mut providers = Vec::with_capacity(records.len());
    for record in records {
        match Provider::from_json(record) {
            Ok(provider) if !provider.versions.is_empty() => providers.push(provider),
            Ok(provider) => log::debug!("Skipping {}: no versions", provider.id),
            Err(e) => log::warn!("Skipping malformed provider record: {}", e),
        }
    }
    providers
}
