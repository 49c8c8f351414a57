use cardboard_core::{parse_price, ProductMatch, ShopifyConfig};

use crate::client::{encode_query, join_base, resolve_product_url};
use crate::error::ScraperError;
use crate::types::SuggestResponse;

/// Storefront predictive search (`/search/suggest.json`).
#[derive(Debug, Clone)]
pub struct ShopifyStrategy {
    /// Lowercased store-specific exclusions, applied on top of the global ones.
    exclude_patterns: Vec<String>,
}

impl ShopifyStrategy {
    #[must_use]
    pub fn new(cfg: ShopifyConfig) -> Self {
        Self {
            exclude_patterns: cfg
                .exclude_patterns
                .into_iter()
                .map(|p| p.to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    #[must_use]
    pub fn search_url(&self, base_url: &str, game_name: &str) -> String {
        join_base(
            base_url,
            &format!(
                "/search/suggest.json?q={}&resources[type]=product&resources[limit]=10",
                encode_query(game_name)
            ),
        )
    }

    fn is_store_excluded(&self, title: &str) -> bool {
        let lower = title.to_lowercase();
        self.exclude_patterns.iter().any(|p| lower.contains(p.as_str()))
    }

    /// Decodes a suggest payload into listings, dropping titles that hit a
    /// store-specific exclusion.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Deserialize`] if the body is not a suggest payload.
    pub fn parse_listings(
        &self,
        base_url: &str,
        body: &str,
    ) -> Result<Vec<ProductMatch>, ScraperError> {
        let response: SuggestResponse =
            serde_json::from_str(body).map_err(|e| ScraperError::Deserialize {
                context: format!("suggest response from {base_url}"),
                source: e,
            })?;

        Ok(response
            .into_products()
            .into_iter()
            .filter(|p| !self.is_store_excluded(&p.title))
            .map(|p| ProductMatch {
                url: resolve_product_url(base_url, &p.url),
                price_num: parse_price(&p.price),
                price: p.price,
                in_stock: p.available,
                title: p.title,
            })
            .collect())
    }
}
