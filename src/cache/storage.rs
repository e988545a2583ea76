//! File-per-key cache storage
//!
//! Every endpoint is stored as one file named after its flattened key.
//! Documents of a released provider version never change upstream, so only
//! the provider index is subject to expiry.

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

use glob::Pattern;

use crate::cache::key::{self, INDEX_KEY};
use crate::config::APP_NAME;
use crate::error::CacheError;

type Result<T> = std::result::Result<T, CacheError>;

/// Distinguishes temp files of concurrent writes within one process
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// On-disk cache of registry responses
#[derive(Debug, Clone)]
pub struct CacheStorage {
    dir: PathBuf,
    index_ttl: Duration,
}

impl CacheStorage {
    /// Use the default XDG cache location
    pub fn open(index_ttl: Duration) -> Result<Self> {
        Ok(Self::open_at(Self::cache_dir()?, index_ttl))
    }

    /// Get the cache directory path (~/.cache/tofuref on Linux)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join(APP_NAME))
    }

    /// Use a specific directory. Does not touch the disk.
    pub fn open_at(dir: impl Into<PathBuf>, index_ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            index_ttl,
        }
    }

    /// Directory holding the cache files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Location of the file for an endpoint key. Does not touch the disk.
    pub fn path_for(&self, endpoint: &str) -> PathBuf {
        self.dir.join(key::flat_name(endpoint))
    }

    /// Read a cached entry.
    ///
    /// Returns `None` when nothing is cached, or when the entry is the
    /// provider index and it is older than the configured TTL.
    pub fn read(&self, endpoint: &str) -> Result<Option<String>> {
        let path = self.path_for(endpoint);

        if key::is_index(endpoint) {
            match self.modified(&path)? {
                None => return Ok(None),
                Some(mtime) if is_expired(mtime, SystemTime::now(), self.index_ttl) => {
                    log::debug!("Cached {} is older than {:?}", endpoint, self.index_ttl);
                    return Ok(None);
                }
                Some(_) => {}
            }
        }

        read_optional(&path)
    }

    /// Read a cached entry regardless of its age.
    pub fn read_stale(&self, endpoint: &str) -> Result<Option<String>> {
        read_optional(&self.path_for(endpoint))
    }

    /// Store an entry, replacing any previous value.
    ///
    /// The body is written to a temporary file first and renamed into place,
    /// so readers never observe a partial entry.
    pub fn write(&self, endpoint: &str, content: &str) -> Result<()> {
        let path = self.path_for(endpoint);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;
        }

        let tmp = self.dir.join(format!(
            ".{}.{}.{}.tmp",
            key::flat_name(endpoint),
            std::process::id(),
            WRITE_SEQ.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::write(&tmp, content)
            .map_err(|e| CacheError::Io(format!("Failed to write {}: {}", endpoint, e)))?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            CacheError::Io(format!("Failed to store {}: {}", endpoint, e))
        })
    }

    /// Whether a document of the provider is cached at any version.
    pub fn exists_any_version(&self, organization: &str, name: &str, suffix: &str) -> bool {
        let dir = self.dir.to_string_lossy();
        let pattern = format!(
            "{}/{}",
            Pattern::escape(&dir),
            key::any_version_pattern(organization, name, suffix)
        );

        match glob::glob(&pattern) {
            Ok(mut paths) => paths.any(|p| p.is_ok()),
            Err(e) => {
                log::warn!("{}", CacheError::Pattern(e.to_string()));
                false
            }
        }
    }

    /// Flattened document suffixes (`resources_instance.md`, `index.md`, ...)
    /// cached for a provider at any version.
    ///
    /// Reads the directory once, for marking a whole resource list at a time.
    /// Version segments never contain `_`, so the first `_` after the provider
    /// prefix ends the version.
    pub fn cached_suffixes(&self, organization: &str, name: &str) -> Result<HashSet<String>> {
        let prefix = format!("{}_", key::flat_name(&format!("{}/{}", organization, name)));

        Ok(self
            .entries()?
            .into_iter()
            .filter_map(|(path, _)| {
                let file = path.file_name()?.to_str()?.to_string();
                let rest = file.strip_prefix(&prefix)?;
                let (_version, suffix) = rest.split_once('_')?;
                Some(suffix.to_string())
            })
            .collect())
    }

    /// Flattened `organization_name` of every provider with `doc` (a
    /// top-level document such as `index.md`) cached at any version.
    pub fn cached_providers(&self, doc: &str) -> Result<HashSet<String>> {
        let suffix = format!("_{}", key::flat_name(doc));

        Ok(self
            .entries()?
            .into_iter()
            .filter_map(|(path, _)| {
                let file = path.file_name()?.to_str()?;
                let (owner, _version) = file.strip_suffix(&suffix)?.rsplit_once('_')?;
                Some(owner.to_string())
            })
            .collect())
    }

    /// Remove every cached entry
    pub fn clear_all(&self) -> Result<ClearStats> {
        let mut entries_removed = 0;
        for (path, _) in self.entries()? {
            std::fs::remove_file(&path).map_err(|e| {
                CacheError::Io(format!("Failed to remove {}: {}", path.display(), e))
            })?;
            entries_removed += 1;
        }
        Ok(ClearStats { entries_removed })
    }

    /// Get cache statistics
    pub fn stats(&self) -> Result<CacheStats> {
        let entries = self.entries()?;
        let now = SystemTime::now();

        let mut stats = CacheStats {
            total_entries: entries.len(),
            ..CacheStats::default()
        };

        for (path, meta) in &entries {
            stats.total_size_bytes += meta.len() as usize;

            let Ok(modified) = meta.modified() else {
                continue;
            };
            let ts = chrono::DateTime::<chrono::Utc>::from(modified).timestamp();
            stats.oldest_entry = Some(stats.oldest_entry.map_or(ts, |o| o.min(ts)));
            stats.newest_entry = Some(stats.newest_entry.map_or(ts, |n| n.max(ts)));

            if path.file_name().is_some_and(|n| n == INDEX_KEY) {
                stats.index_age = Some(now.duration_since(modified).unwrap_or_default());
                stats.index_fresh = !is_expired(modified, now, self.index_ttl);
            }
        }

        Ok(stats)
    }

    fn modified(&self, path: &Path) -> Result<Option<SystemTime>> {
        match std::fs::metadata(path) {
            Ok(meta) => meta
                .modified()
                .map(Some)
                .map_err(|e| CacheError::Io(e.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::Io(e.to_string())),
        }
    }

    fn entries(&self) -> Result<Vec<(PathBuf, std::fs::Metadata)>> {
        let read_dir = match std::fs::read_dir(&self.dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CacheError::Io(e.to_string())),
        };

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| CacheError::Io(e.to_string()))?;
            let meta = entry.metadata().map_err(|e| CacheError::Io(e.to_string()))?;
            if meta.is_file() {
                entries.push((entry.path(), meta));
            }
        }
        Ok(entries)
    }
}

/// Whether an entry written at `modified` has outlived `ttl` at `now`.
///
/// Timestamps in the future count as age zero.
pub fn is_expired(modified: SystemTime, now: SystemTime, ttl: Duration) -> bool {
    now.duration_since(modified).unwrap_or_default() >= ttl
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CacheError::Io(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Statistics about cache clear operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug, Default)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_size_bytes: usize,
    pub oldest_entry: Option<i64>,
    pub newest_entry: Option<i64>,
    pub index_age: Option<Duration>,
    pub index_fresh: bool,
}
