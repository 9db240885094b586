//! Loading the ride pool snapshot.
//!
//! The read is the only await point before the synchronous search, raced
//! against the configured fetch timeout.

use rideshare_core::config::PoolConfig;
use rideshare_core::{Error, Result, ResultExt};
use rideshare_search::RideOffer;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Pick the pool path from the flag, falling back to the configured one.
///
/// Only the configured path is expanded; the shell has already expanded the flag.
pub fn resolve_path(flag: Option<&Path>, config: &PoolConfig) -> Result<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| config.resolved_path())
        .ok_or_else(|| {
            Error::invalid_input("pool", "No ride pool given")
                .with_suggestion("Pass --pool <file> or set pool.path in .rideshare.toml")
        })
}

/// Read and parse a pool snapshot within `timeout`.
pub async fn load(path: &Path, timeout: Duration) -> Result<Vec<RideOffer>> {
    let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

    let bytes = tokio::time::timeout(timeout, tokio::fs::read(path))
        .await
        .map_err(|_| Error::timeout("Loading the ride pool", millis))?
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::file_not_found(path).with_source(e),
            _ => Error::from(e),
        })
        .context(format!("Pool file: {}", path.display()))?;

    let pool: Vec<RideOffer> = serde_json::from_slice(&bytes).map_err(|e| {
        Error::pool_parse(format!("Invalid ride pool {}: {}", path.display(), e)).with_source(e)
    })?;

    debug!(offers = pool.len(), path = %path.display(), "Loaded ride pool");
    Ok(pool)
}
