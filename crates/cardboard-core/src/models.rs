use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A board game from the user's wishlist. Identity is `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    #[serde(default)]
    pub priority: i32,
}

/// A single candidate product found at a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMatch {
    pub title: String,
    pub url: String,
    /// Display price as shown (or reformatted) by the store, e.g. `"$39.99"`.
    pub price: String,
    pub price_num: f64,
    pub in_stock: bool,
}

/// The verdict for one (game, store) pair.
///
/// When `found` is `false` every positive field is zero-valued. `error` is
/// set only when the store could not be fetched or its payload could not be
/// parsed; a reachable store with no match has `found == false` and no error.
///
/// When `found` is `true`, `matches` is non-empty and the top-level
/// title/url/price/price_num/in_stock fields mirror `matches[0]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreResult {
    pub store: String,
    pub found: bool,
    pub in_stock: bool,
    pub price: String,
    pub price_num: f64,
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<ProductMatch>,
}

impl StoreResult {
    /// A reachable store that had nothing matching the search.
    #[must_use]
    pub fn not_found(store: impl Into<String>) -> Self {
        Self {
            store: store.into(),
            ..Self::default()
        }
    }

    /// A store that could not be checked.
    #[must_use]
    pub fn failed(store: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            store: store.into(),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// `true` when the store has the game and reports it available.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.found && self.in_stock
    }
}

/// All store verdicts for a single game, index-aligned with the store list
/// used for the check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub name: String,
    pub results: Vec<StoreResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub results: Vec<GameResult>,
    /// In-stock count per store name; every configured store is present.
    pub summary: BTreeMap<String, usize>,
}
