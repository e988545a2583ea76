//! Display models for table and JSON output

use serde::Serialize;
use tabled::Tabled;

use super::{Provider, ProviderVersion, Resource, ResourceKind};

/// Longest description shown in a table cell
const MAX_DESCRIPTION: usize = 60;

/// Provider row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ProviderDisplay {
    #[tabled(rename = "PROVIDER")]
    pub name: String,

    #[tabled(rename = "LATEST")]
    pub latest: String,

    #[tabled(rename = "POPULARITY")]
    pub popularity: i64,

    #[tabled(rename = "CACHED")]
    pub cached: String,

    #[tabled(rename = "DESCRIPTION")]
    pub description: String,
}

impl From<&Provider> for ProviderDisplay {
    fn from(provider: &Provider) -> Self {
        let mut description = provider.description.clone();
        if let Some(parent) = &provider.fork_of {
            description = format!("(fork of {}) {}", parent, description);
        }

        Self {
            name: provider.display_name(),
            latest: provider
                .versions
                .first()
                .map(|v| v.id.clone())
                .unwrap_or_else(|| "--".to_string()),
            popularity: provider.popularity,
            cached: cached_marker(provider.cached),
            description: truncate(&description, MAX_DESCRIPTION),
        }
    }
}

/// Resource row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ResourceDisplay {
    #[tabled(rename = "KIND")]
    pub kind: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "CACHED")]
    pub cached: String,
}

impl From<&Resource> for ResourceDisplay {
    fn from(resource: &Resource) -> Self {
        Self {
            kind: resource.kind().to_string(),
            name: resource.name().to_string(),
            cached: cached_marker(resource.cached),
        }
    }
}

/// Version row
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct VersionDisplay {
    #[tabled(rename = "VERSION")]
    pub version: String,

    #[tabled(rename = "PUBLISHED")]
    pub published: String,

    #[tabled(rename = "ACTIVE")]
    pub active: String,
}

impl VersionDisplay {
    pub fn new(version: &ProviderVersion, active: &str) -> Self {
        Self {
            version: version.id.clone(),
            published: version
                .published
                .as_deref()
                .and_then(|p| p.get(..10))
                .unwrap_or("--")
                .to_string(),
            active: if version.id == active { "*" } else { "" }.to_string(),
        }
    }
}

/// A rendered document. Overviews carry no kind or name.
#[derive(Debug, Serialize)]
pub struct DocumentOutput<'a> {
    pub provider: String,
    pub version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ResourceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub content: &'a str,
}

fn cached_marker(cached: bool) -> String {
    if cached { "C" } else { "" }.to_string()
}

fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}
