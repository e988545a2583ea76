//! Dynamic shell completions for tofuref
//!
//! Provider names are completed from the locally cached provider index. The
//! network is never touched at completion time, so completions stay instant
//! and work offline; before the first run there is simply nothing to offer.
//!
//! Shell support:
//! - Fish/Zsh: Full support with descriptions
//! - Bash: Values only (no description display)

use clap_complete::engine::{ArgValueCandidates, CompletionCandidate};

use crate::cache::{CacheStorage, INDEX_KEY};
use crate::config::Config;
use crate::docs::parse_provider_index;

/// Longest description shown next to a candidate
const MAX_HELP: usize = 50;

/// Complete provider names (`organization/name`) with their descriptions.
///
/// Note: clap_complete handles prefix filtering - we return all candidates.
pub fn complete_provider_names() -> Vec<CompletionCandidate> {
    let config = Config::load_at(None);
    let Ok(cache) = CacheStorage::open(config.index_ttl()) else {
        return vec![];
    };

    // A stale index is still good enough for names
    let Ok(Some(body)) = cache.read_stale(INDEX_KEY) else {
        return vec![];
    };
    let Ok(index) = serde_json::from_str(&body) else {
        return vec![];
    };

    candidates_from_index(index)
}

fn candidates_from_index(index: serde_json::Value) -> Vec<CompletionCandidate> {
    parse_provider_index(index)
        .into_iter()
        .map(|provider| {
            let help = truncate_str(provider.description.trim(), MAX_HELP);
            CompletionCandidate::new(provider.display_name()).help(Some(help.into()))
        })
        .collect()
}

/// Truncate a string to max characters, adding "..." if truncated.
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Create completion candidates for provider names.
pub fn provider_name_candidates() -> ArgValueCandidates {
    ArgValueCandidates::new(complete_provider_names)
}
