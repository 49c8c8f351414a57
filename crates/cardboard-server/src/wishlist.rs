//! Wishlist persistence: a single JSON file holding the saved game list.

use std::path::{Path, PathBuf};

use anyhow::Context;
use cardboard_core::Game;
use tokio::sync::RwLock;

/// File-backed wishlist. Loads and saves are serialized by one lock so a
/// save never interleaves with a concurrent load.
#[derive(Debug)]
pub struct WishlistStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl WishlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the saved games, or an empty list when nothing has been saved.
    pub async fn load(&self) -> anyhow::Result<Vec<Game>> {
        let _guard = self.lock.read().await;

        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("reading wishlist {}", self.path.display()))
            }
        };

        serde_json::from_slice(&data)
            .with_context(|| format!("parsing wishlist {}", self.path.display()))
    }

    /// Replaces the saved list with `games`, pretty-printed.
    pub async fn save(&self, games: &[Game]) -> anyhow::Result<()> {
        let _guard = self.lock.write().await;

        let data = serde_json::to_vec_pretty(games).context("serializing wishlist")?;
        tokio::fs::write(&self.path, data)
            .await
            .with_context(|| format!("writing wishlist {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), games = games.len(), "wishlist saved");
        Ok(())
    }
}
