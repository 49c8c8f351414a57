//! The store abstraction: one named source that turns a game name into a
//! [`StoreResult`], whatever happens on the wire.

use std::collections::BTreeMap;
use std::future::Future;

use cardboard_core::{
    build_store_result, select_candidates, RegistryLoader, StoreConfig, StoreResult,
    DEFAULT_MAX_MATCHES,
};

use crate::builtin::{larevanche, LaRevanche};
use crate::client::StoreClient;
use crate::strategy::Strategy;

/// Contract shared by every store the checker can fan out to.
///
/// `check` is total: transport failures, bad payloads and configuration
/// problems all come back as a [`StoreResult`] with `error` set.
pub trait StoreCheck: Send + Sync {
    fn name(&self) -> &str;

    fn check(
        &self,
        client: &StoreClient,
        game_name: &str,
    ) -> impl Future<Output = StoreResult> + Send;
}

/// Where a store's requests go.
#[derive(Debug, Clone)]
pub struct StoreTarget {
    pub base_url: String,
    /// Extra headers sent with every request to this store.
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
enum Backend {
    Strategy(Strategy),
    LaRevanche(LaRevanche),
    /// Construction failed; every check reports this message.
    Misconfigured(String),
}

#[derive(Debug, Clone)]
pub struct Store {
    id: String,
    name: String,
    target: StoreTarget,
    max_matches: usize,
    backend: Backend,
}

impl Store {
    /// Builds a store from its registry document. A document whose strategy
    /// cannot be built still yields a store; its checks report the problem.
    #[must_use]
    pub fn from_config(cfg: &StoreConfig, max_matches: usize) -> Self {
        let backend = match Strategy::from_config(cfg) {
            Ok(strategy) => Backend::Strategy(strategy),
            Err(e) => {
                tracing::warn!(store = %cfg.id, error = %e, "store is misconfigured");
                Backend::Misconfigured(e.to_string())
            }
        };

        Self {
            id: cfg.id.clone(),
            name: cfg.display_name().to_owned(),
            target: StoreTarget {
                base_url: cfg.base_url.clone(),
                headers: cfg.headers.clone(),
            },
            max_matches,
            backend,
        }
    }

    /// The built-in store registered under `id`, if there is one.
    #[must_use]
    pub fn builtin(id: &str, max_matches: usize) -> Option<Self> {
        match id {
            larevanche::ID => Some(Self::larevanche(larevanche::BASE_URL, max_matches)),
            _ => None,
        }
    }

    /// La Revanche pointed at `base_url`.
    #[must_use]
    pub fn larevanche(base_url: &str, max_matches: usize) -> Self {
        let backend = match LaRevanche::new(base_url) {
            Ok(store) => Backend::LaRevanche(store),
            Err(e) => Backend::Misconfigured(e.to_string()),
        };

        Self {
            id: larevanche::ID.to_owned(),
            name: larevanche::NAME.to_owned(),
            target: StoreTarget {
                base_url: base_url.to_owned(),
                headers: larevanche::default_headers(),
            },
            max_matches,
            backend,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.target.base_url
    }

    /// Short label for the store's extraction method.
    #[must_use]
    pub fn kind(&self) -> String {
        match &self.backend {
            Backend::Strategy(strategy) => strategy.kind().to_string(),
            Backend::LaRevanche(_) => "builtin".to_owned(),
            Backend::Misconfigured(_) => "misconfigured".to_owned(),
        }
    }
}

impl StoreCheck for Store {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self, client: &StoreClient, game_name: &str) -> StoreResult {
        let listings = match &self.backend {
            Backend::Strategy(strategy) => {
                strategy.fetch_listings(client, &self.target, game_name).await
            }
            Backend::LaRevanche(store) => {
                store
                    .fetch_listings(client, &self.target.headers, game_name)
                    .await
            }
            Backend::Misconfigured(reason) => {
                return StoreResult::failed(&self.name, reason.clone());
            }
        };

        match listings {
            Ok(listings) => {
                let candidates = select_candidates(game_name, listings, self.max_matches);
                let result = build_store_result(&self.name, game_name, candidates);
                tracing::debug!(
                    store = %self.name,
                    game = game_name,
                    found = result.found,
                    in_stock = result.in_stock,
                    "store checked"
                );
                result
            }
            Err(e) => {
                tracing::warn!(store = %self.name, game = game_name, error = %e, "store check failed");
                StoreResult::failed(&self.name, e.to_string())
            }
        }
    }
}

/// Builds the store list from the registry, in registry order.
///
/// Disabled stores, unreadable store documents and unknown built-in ids are
/// skipped with a warning. When the registry cannot be read at all, or
/// yields no stores, the built-in list is used instead.
#[must_use]
pub fn load_stores(loader: &RegistryLoader) -> Vec<Store> {
    let stores_cfg = match loader.load_stores_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(error = %e, "store registry unavailable; using built-in stores");
            return builtin_stores();
        }
    };
    let max_matches = stores_cfg.defaults.effective_max_matches();

    let mut stores = Vec::with_capacity(stores_cfg.stores.len());
    for store_ref in &stores_cfg.stores {
        if store_ref.builtin {
            match Store::builtin(&store_ref.id, max_matches) {
                Some(store) => stores.push(store),
                None => tracing::warn!(store = %store_ref.id, "unknown built-in store; skipping"),
            }
            continue;
        }

        match loader.load_store_config(store_ref) {
            Ok(Some(cfg)) if cfg.enabled => stores.push(Store::from_config(&cfg, max_matches)),
            Ok(Some(_)) => tracing::debug!(store = %store_ref.id, "store disabled; skipping"),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(store = %store_ref.id, error = %e, "store config unreadable; skipping");
            }
        }
    }

    if stores.is_empty() {
        tracing::warn!("store registry produced no stores; using built-in stores");
        return builtin_stores();
    }
    tracing::info!(count = stores.len(), "stores loaded");
    stores
}

/// Stores used when no registry is available.
#[must_use]
pub fn builtin_stores() -> Vec<Store> {
    vec![Store::larevanche(larevanche::BASE_URL, DEFAULT_MAX_MATCHES)]
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
