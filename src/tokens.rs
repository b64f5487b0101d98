//! Token Pool
//!
//! Per-region ordered lists of pre-acquired bearer tokens. The core only
//! ever reads snapshots; the write side is the loader, which re-reads the
//! token file on an interval so operators can rotate tokens without a
//! restart.
//!
//! File format: a JSON object mapping region name to an ordered token
//! array, e.g. `{"ind": ["eyJ...", "eyJ..."], "br": []}`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Shared pool of per-region tokens.
#[derive(Clone, Default)]
pub struct TokenPool {
    regions: Arc<RwLock<HashMap<String, Vec<String>>>>,
}

impl TokenPool {
    /// Empty pool; every region reads as having no tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pool from an in-memory map.
    pub fn from_map(map: HashMap<String, Vec<String>>) -> Self {
        Self {
            regions: Arc::new(RwLock::new(map)),
        }
    }

    /// Load the pool from a JSON token file.
    ///
    /// A missing or malformed file yields an empty pool with a logged
    /// warning; the service then starts degraded rather than refusing to
    /// come up.
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let pool = Self::new();
        if let Err(e) = pool.reload(path.as_ref()).await {
            warn!("Token file not loaded: {:#}", e);
        }
        pool
    }

    /// Re-read the token file, replacing the current lists.
    pub async fn reload(&self, path: &Path) -> Result<()> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read token file {:?}", path))?;

        let map: HashMap<String, Vec<String>> = serde_json::from_str(&raw)
            .with_context(|| format!("token file {:?} is not a region->tokens map", path))?;

        let total: usize = map.values().map(Vec::len).sum();
        info!(
            "Loaded {} tokens across {} regions from {:?}",
            total,
            map.len(),
            path
        );

        *self.regions.write().await = map;
        Ok(())
    }

    /// Snapshot of the current token list for one region.
    ///
    /// Returns an owned copy so callers hold no lock across their network
    /// calls. Unknown regions read as empty.
    pub async fn get(&self, region: &str) -> Vec<String> {
        self.regions
            .read()
            .await
            .get(region)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of tokens currently held for one region.
    pub async fn count(&self, region: &str) -> usize {
        self.regions
            .read()
            .await
            .get(region)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_with(region: &str, tokens: &[&str]) -> TokenPool {
        let mut map = HashMap::new();
        map.insert(
            region.to_string(),
            tokens.iter().map(|t| t.to_string()).collect(),
        );
        TokenPool::from_map(map)
    }

    #[tokio::test]
    async fn test_get_preserves_order() {
        let pool = pool_with("ind", &["first", "second", "third"]);

        assert_eq!(pool.get("ind").await, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_unknown_region_is_empty() {
        let pool = pool_with("ind", &["tok"]);

        assert!(pool.get("br").await.is_empty());
        assert_eq!(pool.count("br").await, 0);
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let pool = TokenPool::load("/nonexistent/tokens.json").await;

        assert_eq!(pool.count("ind").await, 0);
    }
}
