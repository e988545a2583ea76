//! Local cache for registry responses
//!
//! One file per endpoint under the user cache directory. Provider docs for a
//! released version never change, so only the provider index expires.

pub mod client;
pub mod key;
pub mod storage;

// Re-export main types
pub use client::{CachedRegistryClient, FetchEvent, FetchSource, Format, Payload};
pub use key::INDEX_KEY;
pub use storage::CacheStorage;
