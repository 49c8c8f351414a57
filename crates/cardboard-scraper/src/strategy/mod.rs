//! The three config-driven extraction strategies.
//!
//! Each strategy owns a search URL builder and a pure `parse_listings`
//! function from response body to [`ProductMatch`] listings. Filtering,
//! capping and ranking happen afterwards in [`crate::store`], identically for
//! every strategy.

mod html_scraper;
mod json_api;
mod shopify;

use cardboard_core::{ProductMatch, StoreConfig, StoreType};

use crate::client::StoreClient;
use crate::error::ScraperError;
use crate::store::StoreTarget;

pub use html_scraper::HtmlScraperStrategy;
pub use json_api::JsonApiStrategy;
pub use shopify::ShopifyStrategy;

/// A store's extraction strategy, selected by the `type` field of its
/// registry document.
#[derive(Debug, Clone)]
pub enum Strategy {
    Shopify(ShopifyStrategy),
    JsonApi(JsonApiStrategy),
    HtmlScraper(HtmlScraperStrategy),
}

impl Strategy {
    /// Builds the strategy for a store document, compiling any patterns up
    /// front.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnknownStoreType`] for a `type` this build does not know.
    /// - [`ScraperError::MissingConfig`] when the strategy block for the
    ///   declared type is absent (Shopify's block is optional).
    /// - [`ScraperError::InvalidPattern`] when a scraper regex does not compile.
    pub fn from_config(cfg: &StoreConfig) -> Result<Self, ScraperError> {
        match cfg.store_type {
            StoreType::Shopify => Ok(Self::Shopify(ShopifyStrategy::new(
                cfg.shopify.clone().unwrap_or_default(),
            ))),
            StoreType::JsonApi => {
                let json_api = cfg.json_api.clone().ok_or_else(|| ScraperError::MissingConfig {
                    store: cfg.id.clone(),
                    block: "jsonApi",
                })?;
                Ok(Self::JsonApi(JsonApiStrategy::new(json_api)))
            }
            StoreType::HtmlScraper => {
                let scraper = cfg.scraper.as_ref().ok_or_else(|| ScraperError::MissingConfig {
                    store: cfg.id.clone(),
                    block: "scraper",
                })?;
                Ok(Self::HtmlScraper(HtmlScraperStrategy::new(scraper)?))
            }
            StoreType::Unknown => Err(ScraperError::UnknownStoreType {
                store: cfg.id.clone(),
            }),
        }
    }

    #[must_use]
    pub fn kind(&self) -> StoreType {
        match self {
            Self::Shopify(_) => StoreType::Shopify,
            Self::JsonApi(_) => StoreType::JsonApi,
            Self::HtmlScraper(_) => StoreType::HtmlScraper,
        }
    }

    /// Fetches the store's search page for `game_name` and returns every
    /// listing it contains, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] on transport failure, non-2xx status, or a
    /// payload that does not decode.
    pub async fn fetch_listings(
        &self,
        client: &StoreClient,
        target: &StoreTarget,
        game_name: &str,
    ) -> Result<Vec<ProductMatch>, ScraperError> {
        match self {
            Self::Shopify(s) => {
                let url = s.search_url(&target.base_url, game_name);
                let body = client.get_text(&url, &target.headers).await?;
                s.parse_listings(&target.base_url, &body)
            }
            Self::JsonApi(s) => {
                let url = s.search_url(&target.base_url, game_name);
                let body = client.get_text(&url, &target.headers).await?;
                s.parse_listings(&target.base_url, &body)
            }
            Self::HtmlScraper(s) => {
                let url = s.search_url(&target.base_url, game_name);
                let body = client.get_text(&url, &target.headers).await?;
                Ok(s.parse_listings(&target.base_url, &body))
            }
        }
    }
}
