//! Store registry configuration.
//!
//! The registry is a root `stores.json` listing store references plus one
//! JSON document per configured store. Files are read from an optional
//! external directory first and fall back to copies bundled into the binary,
//! so a user can override a single store without shipping the whole set.

use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const ROOT_FILE: &str = "stores.json";

const BUNDLED: &[(&str, &str)] = &[
    ("stores.json", include_str!("../defaults/stores.json")),
    (
        "stores/boardgamebliss.json",
        include_str!("../defaults/stores/boardgamebliss.json"),
    ),
    (
        "stores/401games.json",
        include_str!("../defaults/stores/401games.json"),
    ),
    (
        "stores/lapioche.json",
        include_str!("../defaults/stores/lapioche.json"),
    ),
    (
        "stores/boardgamesnmore.json",
        include_str!("../defaults/stores/boardgamesnmore.json"),
    ),
    (
        "stores/levalet.json",
        include_str!("../defaults/stores/levalet.json"),
    ),
];

/// Root registry document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoresConfig {
    pub version: u32,
    pub stores: Vec<StoreRef>,
    #[serde(default)]
    pub defaults: DefaultConfig,
}

/// A store entry in the root document: either a file to load or a built-in id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreRef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default)]
    pub builtin: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultConfig {
    /// Candidate cap per store; `0` means the built-in default.
    #[serde(default)]
    pub max_matches: usize,
    /// Informational. The effective timeout comes from the application config.
    #[serde(default)]
    pub timeout: String,
}

impl DefaultConfig {
    #[must_use]
    pub fn effective_max_matches(&self) -> usize {
        if self.max_matches == 0 {
            crate::DEFAULT_MAX_MATCHES
        } else {
            self.max_matches
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    Shopify,
    HtmlScraper,
    JsonApi,
    /// Any type string this build does not know; surfaced as a per-check error.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreType::Shopify => write!(f, "shopify"),
            StoreType::HtmlScraper => write!(f, "html_scraper"),
            StoreType::JsonApi => write!(f, "json_api"),
            StoreType::Unknown => write!(f, "unknown"),
        }
    }
}

/// A single store document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(rename = "type")]
    pub store_type: StoreType,
    #[serde(rename = "baseURL")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopify: Option<ShopifyConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scraper: Option<ScraperConfig>,
    #[serde(
        default,
        rename = "jsonApi",
        skip_serializing_if = "Option::is_none"
    )]
    pub json_api: Option<JsonApiConfig>,
}

impl StoreConfig {
    /// Display name, falling back to the id when the document leaves it blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopifyConfig {
    /// Extra case-insensitive title substrings to drop for this store only.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScraperConfig {
    /// Path appended to the base URL; `{query}` is replaced by the encoded game name.
    pub search_path: String,
    /// Regex separating product cards. Content before the first card is discarded.
    pub card_splitter: String,
    /// Tried in order; the first that matches a card wins.
    #[serde(default)]
    pub title_patterns: Vec<String>,
    #[serde(default)]
    pub title_groups: CaptureGroups,
    #[serde(default)]
    pub price_patterns: Vec<PricePattern>,
    #[serde(default)]
    pub price_prefix: String,
    #[serde(default)]
    pub out_of_stock_indicators: Vec<String>,
    #[serde(default)]
    pub in_stock_indicators: Vec<String>,
    #[serde(default)]
    pub stock_logic: StockLogic,
}

/// Capture group indices within a title pattern.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CaptureGroups {
    #[serde(default)]
    pub url: usize,
    #[serde(default)]
    pub title: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePattern {
    pub pattern: String,
    #[serde(default)]
    pub groups: PriceCaptureMode,
}

/// How a price pattern's groups are read. Index `0` means "not used".
///
/// Either `amount` holds the full decimal price, or `dollars` and `cents`
/// are joined with a `.`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PriceCaptureMode {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub amount: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub dollars: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub cents: usize,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(v: &usize) -> bool {
    *v == 0
}

/// How a scraped card's stock status is decided once no out-of-stock
/// indicator is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLogic {
    /// Out of stock unless an in-stock indicator appears.
    InStockRequired,
    /// In stock unless an out-of-stock indicator appears.
    #[default]
    #[serde(other)]
    OutOfStock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonApiConfig {
    /// Path appended to the base URL; `{query}` is replaced by the encoded game name.
    pub search_path: String,
    /// Top-level key holding the product array.
    pub products_path: String,
    pub fields: JsonFieldMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock_value: Option<String>,
}

/// Key names used to read each product field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFieldMap {
    pub title: String,
    pub price: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<String>,
}

/// Reads registry documents from an external directory with bundled fallback.
#[derive(Debug, Clone, Default)]
pub struct RegistryLoader {
    config_dir: Option<PathBuf>,
}

impl RegistryLoader {
    /// Creates a loader. With `None`, only the bundled defaults are used.
    #[must_use]
    pub fn new(config_dir: Option<PathBuf>) -> Self {
        Self { config_dir }
    }

    /// Loads and validates the root `stores.json`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing from both locations, does
    /// not parse, or lists the same store id twice.
    pub fn load_stores_config(&self) -> Result<StoresConfig, ConfigError> {
        let content = self.read_file(ROOT_FILE)?;
        let cfg: StoresConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::RegistryFileParse {
                path: ROOT_FILE.to_string(),
                source: e,
            })?;
        validate_store_refs(&cfg)?;
        Ok(cfg)
    }

    /// Loads the document for a store reference. Built-in references have no
    /// document and return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the reference names no file, or the file is
    /// missing or does not parse.
    pub fn load_store_config(&self, store_ref: &StoreRef) -> Result<Option<StoreConfig>, ConfigError> {
        if store_ref.builtin {
            return Ok(None);
        }
        let Some(file) = store_ref.file.as_deref() else {
            return Err(ConfigError::Validation(format!(
                "store '{}' is neither builtin nor backed by a file",
                store_ref.id
            )));
        };

        let content = self.read_file(file)?;
        let cfg: StoreConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::RegistryFileParse {
                path: file.to_string(),
                source: e,
            })?;
        Ok(Some(cfg))
    }

    /// Reads `rel_path` from the external directory, falling back to the
    /// bundled copy.
    fn read_file(&self, rel_path: &str) -> Result<String, ConfigError> {
        if let Some(dir) = &self.config_dir {
            let ext_path = dir.join(rel_path);
            match std::fs::read_to_string(&ext_path) {
                Ok(content) => return Ok(content),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(
                        path = %ext_path.display(),
                        "registry file not in config dir; using bundled default"
                    );
                }
                Err(e) => {
                    return Err(ConfigError::RegistryFileIo {
                        path: ext_path.display().to_string(),
                        source: e,
                    });
                }
            }
        }

        BUNDLED
            .iter()
            .find(|(name, _)| *name == rel_path)
            .map(|(_, content)| (*content).to_string())
            .ok_or_else(|| ConfigError::RegistryFileMissing(rel_path.to_string()))
    }
}

fn validate_store_refs(cfg: &StoresConfig) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for store_ref in &cfg.stores {
        if store_ref.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store id must be non-empty".to_string(),
            ));
        }
        if !seen.insert(store_ref.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store id: '{}'",
                store_ref.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
