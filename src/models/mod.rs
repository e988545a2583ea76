//! Document model: providers and their documentation units
//!
//! These are plain records. Fetching lives in [`DocsService`](crate::docs::DocsService).

pub mod display;
pub mod front_matter;
pub mod provider;
pub mod resource;

pub use front_matter::{split_front_matter, strip_front_matter};
pub use provider::{OVERVIEW_DOC, Provider, ProviderId, ProviderVersion};
pub use resource::{Resource, ResourceId, ResourceKind, sort_resources};
