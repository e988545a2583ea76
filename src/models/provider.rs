//! Registry providers

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::resource::{Resource, ResourceId, ResourceKind, sort_resources};

/// Provider identity: `organization/name`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ProviderId {
    pub organization: String,
    pub name: String,
}

impl ProviderId {
    pub fn new(organization: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            name: name.into(),
        }
    }

    /// `organization/name`
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.organization, self.name)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.name)
    }
}

/// A published provider version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderVersion {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

/// Provider record as served in the registry index. Any field but `addr`
/// may be missing or `null`.
#[derive(Debug, Deserialize)]
struct ProviderRecord {
    addr: ProviderAddr,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    fork_count: Option<u64>,
    #[serde(default)]
    is_blocked: Option<bool>,
    #[serde(default)]
    popularity: Option<i64>,
    #[serde(default)]
    versions: Option<Vec<ProviderVersion>>,
    #[serde(default)]
    fork_of: Option<ForkOf>,
}

#[derive(Debug, Deserialize)]
struct ProviderAddr {
    namespace: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ForkOf {
    #[serde(default)]
    display: Option<String>,
}

/// A provider and the per-version state loaded for it.
///
/// Resources and the overview belong to the active version; switching
/// versions discards both.
#[derive(Debug, Clone)]
pub struct Provider {
    pub id: ProviderId,
    pub description: String,
    pub fork_count: u64,
    pub blocked: bool,
    pub popularity: i64,
    pub fork_of: Option<String>,
    /// Newest first
    pub versions: Vec<ProviderVersion>,
    /// Whether an overview of any version is in the local cache
    pub cached: bool,
    /// Upstream record, for fields not modeled here
    pub raw: Value,
    active_version: String,
    resources: Vec<Resource>,
    resources_loaded: bool,
    overview: Option<String>,
}

impl Provider {
    /// Build a provider from one record of the registry index
    pub fn from_json(raw: Value) -> Result<Self, serde_json::Error> {
        let record: ProviderRecord = serde_json::from_value(raw.clone())?;
        let versions = record.versions.unwrap_or_default();
        let active_version = versions.first().map(|v| v.id.clone()).unwrap_or_default();

        Ok(Self {
            id: ProviderId::new(record.addr.namespace, record.addr.name),
            description: record.description.unwrap_or_default(),
            fork_count: record.fork_count.unwrap_or_default(),
            blocked: record.is_blocked.unwrap_or_default(),
            popularity: record.popularity.unwrap_or_default(),
            fork_of: record.fork_of.and_then(|f| f.display),
            versions,
            cached: false,
            raw,
            active_version,
            resources: Vec::new(),
            resources_loaded: false,
            overview: None,
        })
    }

    pub fn organization(&self) -> &str {
        &self.id.organization
    }

    pub fn name(&self) -> &str {
        &self.id.name
    }

    /// `organization/name`
    pub fn display_name(&self) -> String {
        self.id.display_name()
    }

    pub fn active_version(&self) -> &str {
        &self.active_version
    }

    /// Switch versions, dropping everything loaded for the previous one
    pub fn set_active_version(&mut self, version: impl Into<String>) {
        self.active_version = version.into();
        self.clear_resources();
        self.overview = None;
    }

    pub fn has_version(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v.id == version)
    }

    /// Endpoint key of the overview document for the active version
    pub fn overview_endpoint(&self) -> String {
        format!("{}/{}", self.version_prefix(), OVERVIEW_DOC)
    }

    /// Endpoint key of the resource index for the active version
    pub fn resource_index_endpoint(&self) -> String {
        format!("{}/index.json", self.version_prefix())
    }

    /// Overview text, once fetched for the active version
    pub fn overview(&self) -> Option<&str> {
        self.overview.as_deref()
    }

    pub(crate) fn set_overview(&mut self, overview: String) {
        self.overview = Some(overview);
    }

    /// Resources of the active version in listing order
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Whether the resource index of the active version has been loaded
    pub fn resources_loaded(&self) -> bool {
        self.resources_loaded
    }

    pub(crate) fn set_resources(&mut self, mut resources: Vec<Resource>) {
        sort_resources(&mut resources);
        self.resources = resources;
        self.resources_loaded = true;
    }

    pub(crate) fn clear_resources(&mut self) {
        self.resources.clear();
        self.resources_loaded = false;
    }

    pub(crate) fn resource_mut(&mut self, id: &ResourceId) -> Option<&mut Resource> {
        self.resources.iter_mut().find(|r| &r.id == id)
    }

    pub(crate) fn sort_resources(&mut self) {
        sort_resources(&mut self.resources);
    }

    pub fn resource(&self, id: &ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|r| &r.id == id)
    }

    /// Look a resource up by name, optionally restricted to one kind.
    ///
    /// Names can repeat across kinds (a resource and a datasource of the
    /// same name); without a kind the first in listing order wins.
    pub fn find_resource(&self, name: &str, kind: Option<ResourceKind>) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|r| r.name() == name && kind.is_none_or(|k| r.kind() == k))
    }

    /// Snippet for a `required_providers` block
    pub fn use_configuration(&self) -> String {
        format!(
            "    {name} = {{\n      source  = \"{org}/{name}\"\n      version = \"{version}\"\n    }}",
            name = self.id.name,
            org = self.id.organization,
            version = self.active_version.trim_start_matches('v'),
        )
    }

    fn version_prefix(&self) -> String {
        format!(
            "{}/{}/{}",
            self.id.organization, self.id.name, self.active_version
        )
    }
}

/// Name of the overview document within a provider version
pub const OVERVIEW_DOC: &str = "index.md";
