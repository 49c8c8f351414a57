//! Fan-out/fan-in over games and stores.
//!
//! Each game and each store check runs as its own task on the runtime's
//! worker pool. Games wait on a semaphore of `max_concurrent_games` permits;
//! stores within a game are not limited. Results are collected by input
//! position, so output order always matches input order. Dropping a check
//! detaches its tasks rather than aborting them.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use cardboard_core::{CheckResponse, Game, GameResult, StoreResult};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::client::StoreClient;
use crate::store::{Store, StoreCheck};

/// Default number of games checked concurrently.
pub const DEFAULT_MAX_CONCURRENT_GAMES: usize = 3;

pub struct Checker<S = Store> {
    stores: Arc<Vec<S>>,
    client: StoreClient,
    max_concurrent_games: usize,
}

impl<S: StoreCheck + 'static> Checker<S> {
    /// `max_concurrent_games` of `0` is treated as `1`.
    #[must_use]
    pub fn new(stores: Vec<S>, client: StoreClient, max_concurrent_games: usize) -> Self {
        Self {
            stores: Arc::new(stores),
            client,
            max_concurrent_games: max_concurrent_games.max(1),
        }
    }

    #[must_use]
    pub fn stores(&self) -> &[S] {
        &self.stores
    }

    #[must_use]
    pub fn store_names(&self) -> Vec<String> {
        self.stores.iter().map(|s| s.name().to_owned()).collect()
    }

    /// Checks one game against every store concurrently. `results[i]` is the
    /// verdict of `stores()[i]`.
    pub async fn check_game(&self, game_name: &str) -> GameResult {
        check_all_stores(
            Arc::clone(&self.stores),
            self.client.clone(),
            game_name.to_owned(),
        )
        .await
    }

    /// Checks every game, at most `max_concurrent_games` at a time. The
    /// output is index-aligned with `games`.
    pub async fn check_games(&self, games: &[Game]) -> Vec<GameResult> {
        let permits = Arc::new(Semaphore::new(self.max_concurrent_games));

        let handles: Vec<JoinHandle<GameResult>> = games
            .iter()
            .map(|game| {
                let permits = Arc::clone(&permits);
                let stores = Arc::clone(&self.stores);
                let client = self.client.clone();
                let name = game.name.clone();
                tokio::spawn(async move {
                    // The semaphore is never closed, so acquiring only waits.
                    let _permit = permits.acquire_owned().await.ok();
                    check_all_stores(stores, client, name).await
                })
            })
            .collect();

        let mut results = Vec::with_capacity(games.len());
        for (game, handle) in games.iter().zip(handles) {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    tracing::warn!(game = %game.name, error = %e, "game check task failed");
                    results.push(GameResult {
                        name: game.name.clone(),
                        results: self
                            .stores
                            .iter()
                            .map(|s| StoreResult::failed(s.name(), format!("check task failed: {e}")))
                            .collect(),
                    });
                }
            }
        }
        results
    }

    /// In-stock count per store name. Every store starts at zero so stores
    /// with nothing available still appear.
    #[must_use]
    pub fn calculate_summary(&self, results: &[GameResult]) -> BTreeMap<String, usize> {
        let mut summary: BTreeMap<String, usize> = self
            .stores
            .iter()
            .map(|s| (s.name().to_owned(), 0))
            .collect();

        for store_result in results.iter().flat_map(|g| &g.results) {
            if store_result.is_available() {
                *summary.entry(store_result.store.clone()).or_insert(0) += 1;
            }
        }
        summary
    }

    /// Checks `games` and summarizes the outcome.
    pub async fn run(&self, games: &[Game]) -> CheckResponse {
        let started = Instant::now();
        let results = self.check_games(games).await;
        let summary = self.calculate_summary(&results);

        tracing::info!(
            games = games.len(),
            stores = self.stores.len(),
            in_stock = summary.values().sum::<usize>(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "check complete"
        );

        CheckResponse { results, summary }
    }
}

/// Spawns one task per store and gathers the verdicts in store order.
async fn check_all_stores<S: StoreCheck + 'static>(
    stores: Arc<Vec<S>>,
    client: StoreClient,
    game_name: String,
) -> GameResult {
    let game_name: Arc<str> = Arc::from(game_name);

    let handles: Vec<JoinHandle<StoreResult>> = (0..stores.len())
        .map(|idx| {
            let stores = Arc::clone(&stores);
            let client = client.clone();
            let game_name = Arc::clone(&game_name);
            tokio::spawn(async move { stores[idx].check(&client, &game_name).await })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (store, handle) in stores.iter().zip(handles) {
        results.push(handle.await.unwrap_or_else(|e| {
            tracing::warn!(store = %store.name(), error = %e, "store check task failed");
            StoreResult::failed(store.name(), format!("check task failed: {e}"))
        }));
    }

    GameResult {
        name: game_name.to_string(),
        results,
    }
}

#[cfg(test)]
#[path = "checker_test.rs"]
mod tests;
