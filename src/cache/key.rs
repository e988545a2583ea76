//! Endpoint keys and their flat on-disk names
//!
//! An endpoint key is the registry path of a document, e.g.
//! `hashicorp/aws/v5.0.0/resources/instance.md`. The same string is the
//! cache key; on disk every `/` becomes `_` so all entries live in one
//! directory.

use glob::Pattern;

/// Endpoint key of the provider index, the only entry that expires
pub const INDEX_KEY: &str = "index.json";

const SEPARATOR: char = '/';
const FLAT_SEPARATOR: char = '_';

/// Flatten an endpoint key into a file name.
pub fn flat_name(endpoint: &str) -> String {
    endpoint.replace(SEPARATOR, &FLAT_SEPARATOR.to_string())
}

/// Whether the key refers to the provider index
pub fn is_index(endpoint: &str) -> bool {
    endpoint == INDEX_KEY
}

/// Glob pattern (relative to the cache dir) matching a provider document at
/// any version.
///
/// `suffix` is the part of the endpoint after the version segment, such as
/// `index.md` or `resources/instance.md`.
pub fn any_version_pattern(organization: &str, name: &str, suffix: &str) -> String {
    format!(
        "{}{sep}{}{sep}*{sep}{}",
        Pattern::escape(organization),
        Pattern::escape(name),
        Pattern::escape(&flat_name(suffix)),
        sep = FLAT_SEPARATOR
    )
}
