//! Navigation state of a browsing session
//!
//! A [`Session`] owns the loaded providers and tracks which provider and
//! resource are active. Fetching goes through the [`DocsService`] handed to
//! each transition; mutators take `&mut self`, so transitions apply in the
//! order they complete.

use std::collections::HashMap;

use crate::client::RegistryApi;
use crate::docs::DocsService;
use crate::error::NavigationError;
use crate::models::{Provider, Resource, ResourceId, ResourceKind};
use crate::search;

type Result<T> = std::result::Result<T, NavigationError>;

/// Where the user is in the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    NoProvider,
    ProviderSelected,
    ResourceSelected,
}

#[derive(Debug, Default)]
pub struct Session {
    providers: Vec<Provider>,
    by_name: HashMap<String, usize>,
    active_provider: Option<usize>,
    active_resource: Option<ResourceId>,
    fullscreen: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// New session, fullscreen when the terminal is narrower than `threshold`.
    ///
    /// An unknown width leaves the session windowed.
    pub fn with_terminal_width(width: Option<u16>, threshold: u16) -> Self {
        Self {
            fullscreen: width.is_some_and(|w| w < threshold),
            ..Self::default()
        }
    }

    /// Replace the provider list and go back to the provider view
    pub fn set_providers(&mut self, providers: Vec<Provider>) {
        self.by_name = providers
            .iter()
            .enumerate()
            .map(|(i, p)| (p.display_name(), i))
            .collect();
        self.providers = providers;
        self.active_provider = None;
        self.active_resource = None;
    }

    /// Load the registry index; returns the number of providers
    pub async fn load_index<C: RegistryApi>(&mut self, docs: &DocsService<C>) -> usize {
        self.set_providers(docs.load_providers().await);
        self.providers.len()
    }

    pub fn state(&self) -> NavState {
        match (self.active_provider, &self.active_resource) {
            (None, _) => NavState::NoProvider,
            (Some(_), None) => NavState::ProviderSelected,
            (Some(_), Some(_)) => NavState::ResourceSelected,
        }
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn provider(&self, name: &str) -> Option<&Provider> {
        self.by_name.get(name).map(|&i| &self.providers[i])
    }

    pub fn active_provider(&self) -> Option<&Provider> {
        self.active_provider.map(|i| &self.providers[i])
    }

    pub fn active_resource(&self) -> Option<&Resource> {
        let id = self.active_resource.as_ref()?;
        self.active_provider()?.resource(id)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }

    /// Make `name` (`organization/name`) the active provider and load its
    /// resources and overview.
    ///
    /// Selecting the provider that is already active and loaded fetches
    /// nothing.
    pub async fn select_provider<C: RegistryApi>(
        &mut self,
        name: &str,
        docs: &DocsService<C>,
    ) -> Result<()> {
        self.select_provider_at(name, None, docs).await
    }

    /// Like [`select_provider`](Self::select_provider), switching to
    /// `version` first when given.
    pub async fn select_provider_at<C: RegistryApi>(
        &mut self,
        name: &str,
        version: Option<&str>,
        docs: &DocsService<C>,
    ) -> Result<()> {
        let index = *self
            .by_name
            .get(name)
            .ok_or_else(|| NavigationError::UnknownProvider(name.to_string()))?;

        let provider = &mut self.providers[index];
        if let Some(version) = version {
            if !provider.has_version(version) {
                return Err(NavigationError::UnknownVersion {
                    provider: name.to_string(),
                    version: version.to_string(),
                });
            }
            if provider.active_version() != version {
                provider.set_active_version(version);
            }
        }

        self.active_provider = Some(index);
        self.active_resource = None;

        let provider = &mut self.providers[index];
        if provider.resources_loaded() && provider.overview().is_some() {
            return Ok(());
        }

        log::debug!("Selecting {} {}", name, provider.active_version());
        docs.load_resources(provider).await;
        docs.overview(provider).await;
        docs.refresh_cached(provider);
        Ok(())
    }

    /// Switch the active provider to another of its versions and reload
    pub async fn set_active_version<C: RegistryApi>(
        &mut self,
        version: &str,
        docs: &DocsService<C>,
    ) -> Result<()> {
        let provider = self.active_provider_mut()?;
        if !provider.has_version(version) {
            return Err(NavigationError::UnknownVersion {
                provider: provider.display_name(),
                version: version.to_string(),
            });
        }

        provider.set_active_version(version);
        docs.reload_resources(provider).await;
        docs.overview(provider).await;

        self.active_resource = None;
        Ok(())
    }

    /// Open a resource of the active provider; returns its content
    pub async fn select_resource<C: RegistryApi>(
        &mut self,
        id: &ResourceId,
        docs: &DocsService<C>,
    ) -> Result<String> {
        let provider = self.active_provider_mut()?;
        if provider.resource(id).is_none() {
            return Err(NavigationError::UnknownResource(id.to_string()));
        }

        let content = docs.content(provider, id).await;
        self.active_resource = Some(id.clone());
        Ok(content)
    }

    /// Open a resource by name, optionally restricted to one kind
    pub async fn select_resource_by_name<C: RegistryApi>(
        &mut self,
        name: &str,
        kind: Option<ResourceKind>,
        docs: &DocsService<C>,
    ) -> Result<String> {
        let provider = self
            .active_provider()
            .ok_or(NavigationError::NoProviderSelected)?;
        let id = provider
            .find_resource(name, kind)
            .map(|r| r.id.clone())
            .ok_or_else(|| NavigationError::UnknownResource(name.to_string()))?;

        self.select_resource(&id, docs).await
    }

    /// Back from a resource to its provider.
    ///
    /// Only the selection is dropped; the resource and its loaded content
    /// stay in the provider's list.
    pub fn deselect_resource(&mut self) {
        self.active_resource = None;
    }

    /// Back to the provider list
    pub fn back_to_providers(&mut self) {
        self.active_provider = None;
        self.active_resource = None;
    }

    pub fn search_providers(&self, query: &str) -> Vec<&Provider> {
        search::filter(&self.providers, query)
    }

    /// Resources of the active provider matching the query
    pub fn search_resources(&self, query: &str) -> Result<Vec<&Resource>> {
        let provider = self
            .active_provider()
            .ok_or(NavigationError::NoProviderSelected)?;
        Ok(search::filter(provider.resources(), query))
    }

    fn active_provider_mut(&mut self) -> Result<&mut Provider> {
        let index = self
            .active_provider
            .ok_or(NavigationError::NoProviderSelected)?;
        Ok(&mut self.providers[index])
    }
}
