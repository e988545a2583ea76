//! Documentation units of a provider

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ProviderId;

/// Kind of documentation unit.
///
/// Declaration order is the listing priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Guide,
    Resource,
    Datasource,
    Function,
}

impl ResourceKind {
    /// All kinds, in listing priority
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Guide,
        ResourceKind::Resource,
        ResourceKind::Datasource,
        ResourceKind::Function,
    ];

    /// Singular name, e.g. `datasource`
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Guide => "guide",
            ResourceKind::Resource => "resource",
            ResourceKind::Datasource => "datasource",
            ResourceKind::Function => "function",
        }
    }

    /// URL path segment, also the key of the array in a resource index
    pub fn path_segment(&self) -> &'static str {
        match self {
            ResourceKind::Guide => "guides",
            ResourceKind::Resource => "resources",
            ResourceKind::Datasource => "datasources",
            ResourceKind::Function => "functions",
        }
    }

    /// Short marker used in listings
    pub fn marker(&self, emoji: bool) -> &'static str {
        match (self, emoji) {
            (ResourceKind::Guide, true) => "📚",
            (ResourceKind::Resource, true) => "📦",
            (ResourceKind::Datasource, true) => "🌐",
            (ResourceKind::Function, true) => "📈",
            (ResourceKind::Guide, false) => "G",
            (ResourceKind::Resource, false) => "R",
            (ResourceKind::Datasource, false) => "D",
            (ResourceKind::Function, false) => "F",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        ResourceKind::ALL
            .into_iter()
            .find(|k| lower == k.as_str() || lower == k.path_segment())
            .ok_or_else(|| {
                format!(
                    "unknown kind '{}' (expected guide, resource, datasource or function)",
                    s
                )
            })
    }
}

/// Identity of a documentation unit within a provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResourceId {
    pub provider: ProviderId,
    pub kind: ResourceKind,
    pub name: String,
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.provider, self.kind, self.name)
    }
}

/// One documentation unit of a provider version.
///
/// Holds the owning provider by id only; resources are rebuilt whenever the
/// provider's active version changes.
#[derive(Debug, Clone)]
pub struct Resource {
    pub id: ResourceId,
    /// Provider version the resource was listed for
    pub version: String,
    /// Markdown body, once fetched
    pub content: Option<String>,
    /// Whether the document is in the local cache (any version)
    pub cached: bool,
}

impl Resource {
    pub fn new(
        provider: ProviderId,
        version: impl Into<String>,
        kind: ResourceKind,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: ResourceId {
                provider,
                kind,
                name: name.into(),
            },
            version: version.into(),
            content: None,
            cached: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.id.name
    }

    pub fn kind(&self) -> ResourceKind {
        self.id.kind
    }

    /// Part of the endpoint after the version segment
    pub fn doc_suffix(&self) -> String {
        format!("{}/{}.md", self.id.kind.path_segment(), self.id.name)
    }

    /// Endpoint key of the document
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.id.provider.organization,
            self.id.provider.name,
            self.version,
            self.doc_suffix()
        )
    }

    /// Listing order: cached first, then kind priority, then name
    pub fn listing_order(&self, other: &Self) -> Ordering {
        other
            .cached
            .cmp(&self.cached)
            .then(self.id.kind.cmp(&other.id.kind))
            .then_with(|| self.id.name.cmp(&other.id.name))
    }
}

/// Sort resources into listing order
pub fn sort_resources(resources: &mut [Resource]) {
    resources.sort_by(Resource::listing_order);
}
