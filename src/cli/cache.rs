//! Cache management commands

use colored::Colorize;

use crate::cache::CacheStorage;
use crate::cli::{GlobalOptions, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::json::format_json;

fn open(opts: &GlobalOptions) -> Result<CacheStorage> {
    let config = Config::load_at(opts.config_ref());
    Ok(CacheStorage::open(config.index_ttl())?)
}

/// Show cache status/statistics
pub fn status(opts: &GlobalOptions) -> Result<()> {
    let cache = open(opts)?;
    let stats = cache.stats()?;
    let path = cache.dir().display().to_string();

    match opts.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "total_entries": stats.total_entries,
                "total_size_bytes": stats.total_size_bytes,
                "total_size_human": format_size(stats.total_size_bytes),
                "oldest_entry_timestamp": stats.oldest_entry,
                "newest_entry_timestamp": stats.newest_entry,
                "index_age_seconds": stats.index_age.map(|a| a.as_secs()),
                "index_fresh": stats.index_fresh,
                "path": path,
            });
            println!("{}", format_json(&json)?);
        }
        _ => {
            println!("Cache Status");
            println!("────────────────────────────────────────");
            println!("Location:       {}", path);
            println!("Entries:        {}", stats.total_entries);
            println!("Total size:     {}", format_size(stats.total_size_bytes));

            match stats.index_age {
                Some(age) if stats.index_fresh => println!(
                    "Provider index: {} ({} old)",
                    "fresh".green(),
                    format_age(age.as_secs())
                ),
                Some(age) => println!(
                    "Provider index: {} ({} old, refreshed on next load)",
                    "expired".yellow(),
                    format_age(age.as_secs())
                ),
                None => println!("Provider index: {}", "not cached".dimmed()),
            }

            if let Some(oldest) = stats.oldest_entry {
                println!("Oldest entry:   {}", format_timestamp(oldest));
            }
            if let Some(newest) = stats.newest_entry {
                println!("Newest entry:   {}", format_timestamp(newest));
            }
        }
    }

    Ok(())
}

/// Clear all cache entries
pub fn clear(opts: &GlobalOptions) -> Result<()> {
    let cache = open(opts)?;
    let stats = cache.clear_all()?;

    match opts.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": stats.entries_removed,
                "success": true,
            });
            println!("{}", format_json(&json)?);
        }
        _ => {
            if stats.entries_removed > 0 {
                println!("Cleared {} cache entries", stats.entries_removed);
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}

/// Show cache path
pub fn path() -> Result<()> {
    let path = CacheStorage::cache_dir()?;
    println!("{}", path.display());
    Ok(())
}

/// Format bytes as human-readable size
fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    const GB: usize = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Coarse age: days, hours or minutes
fn format_age(secs: u64) -> String {
    match secs {
        s if s >= 86_400 => format!("{}d", s / 86_400),
        s if s >= 3_600 => format!("{}h", s / 3_600),
        s => format!("{}m", s / 60),
    }
}

fn format_timestamp(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|d| {
            d.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(59), "0m");
        assert_eq!(format_age(7_200), "2h");
        assert_eq!(format_age(3 * 86_400 + 5), "3d");
    }
}
