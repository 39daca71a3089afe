//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{debug, warn};

/// Extract the on-disk file of a `sqlite://` URL, if there is one.
///
/// In-memory URLs (`sqlite::memory:`, `mode=memory`) have no file.
pub fn sqlite_file_path(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    if rest.starts_with(":memory:") || url.contains("mode=memory") {
        return None;
    }
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() { None } else { Some(path) }
}

/// Make sure the directory holding a SQLite database file exists.
/// Non-sqlite URLs are left alone.
pub async fn ensure_database_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(file) = sqlite_file_path(database_url) else {
        debug!("database url has no local file; nothing to prepare");
        return Ok(());
    };
    let Some(parent) = Path::new(file).parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if tokio::fs::metadata(parent).await.is_err() {
        warn!(dir = %parent.display(), "database directory missing; creating it");
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    Ok(())
}
