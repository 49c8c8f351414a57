//! La Revanche (boutique.larevanche.ca).
//!
//! The search page has no product API. Listings are read from the analytics
//! `gtag('event', 'view_item_list', {...})` payload embedded in the page, and
//! product links are matched back to titles by slug.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use cardboard_core::ProductMatch;
use regex::Regex;

use crate::client::{encode_query, join_base, StoreClient};
use crate::error::ScraperError;

pub const ID: &str = "larevanche";
pub const NAME: &str = "La Revanche";
pub const BASE_URL: &str = "https://boutique.larevanche.ca";

/// Bytes either side of an `item_id` searched for the out-of-stock label.
const STOCK_WINDOW: usize = 500;
const OUT_OF_STOCK_LABEL: &str = "Hors stock";

static GTAG_ITEM_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"gtag\('event',\s*'view_item_list',\s*(\{[^;]+\})").expect("valid regex")
});

static GTAG_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#""item_id"\s*:\s*"([^"]+)"[^}]*"item_name"\s*:\s*"([^"]+)"[^}]*"price"\s*:\s*(\d+(?:\.\d+)?)"#,
    )
    .expect("valid regex")
});

static NON_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Request headers the storefront expects.
#[must_use]
pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([(
        "Accept-Language".to_owned(),
        "fr-CA,fr;q=0.9,en;q=0.8".to_owned(),
    )])
}

#[derive(Debug, Clone)]
pub struct LaRevanche {
    base_url: String,
    product_link: Regex,
}

impl LaRevanche {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidPattern`] if the product link pattern
    /// built from `base_url` does not compile.
    pub fn new(base_url: &str) -> Result<Self, ScraperError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let pattern = format!(r#"href="({}/fc/[^"]+\.html)""#, regex::escape(&base_url));
        let product_link = Regex::new(&pattern).map_err(|e| ScraperError::InvalidPattern {
            pattern,
            source: e,
        })?;
        Ok(Self {
            base_url,
            product_link,
        })
    }

    #[must_use]
    pub fn search_url(&self, game_name: &str) -> String {
        join_base(&self.base_url, &format!("/search?q={}", encode_query(game_name)))
    }

    /// Fetches the search page and extracts its listings.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] on transport failure or non-2xx status.
    pub async fn fetch_listings(
        &self,
        client: &StoreClient,
        headers: &BTreeMap<String, String>,
        game_name: &str,
    ) -> Result<Vec<ProductMatch>, ScraperError> {
        let html = client.get_text(&self.search_url(game_name), headers).await?;
        Ok(self.parse_listings(&html))
    }

    /// Reads every `(item_id, item_name, price)` triple from the item-list
    /// event. A page without the event has no listings.
    #[must_use]
    pub fn parse_listings(&self, html: &str) -> Vec<ProductMatch> {
        let Some(payload) = GTAG_ITEM_LIST
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
        else {
            return Vec::new();
        };

        let links = self.product_links(html);

        GTAG_ITEM
            .captures_iter(payload)
            .map(|caps| {
                let item_id = &caps[1];
                let title = caps[2].to_owned();
                let price_num: f64 = caps[3].parse().unwrap_or(0.0);

                ProductMatch {
                    url: self.resolve_url(&links, &title),
                    price: format!("${price_num:.2}"),
                    price_num,
                    in_stock: !contains_near(html, item_id, OUT_OF_STOCK_LABEL, STOCK_WINDOW),
                    title,
                }
            })
            .collect()
    }

    /// `(slug, url)` for every product link on the page, in page order.
    fn product_links(&self, html: &str) -> Vec<(String, String)> {
        let prefix = format!("{}/fc/", self.base_url);
        self.product_link
            .captures_iter(html)
            .map(|caps| {
                let url = caps[1].to_owned();
                let slug = url
                    .strip_prefix(&prefix)
                    .unwrap_or(&url)
                    .trim_end_matches(".html")
                    .to_owned();
                (slug, url)
            })
            .collect()
    }

    /// First link whose slug contains, or is contained in, the title's slug.
    /// Falls back to a search for the title.
    fn resolve_url(&self, links: &[(String, String)], title: &str) -> String {
        let title_slug = slugify(title);
        links
            .iter()
            .find(|(slug, _)| slug.contains(&title_slug) || title_slug.contains(slug.as_str()))
            .map_or_else(|| self.search_url(title), |(_, url)| url.clone())
    }
}

fn slugify(title: &str) -> String {
    let lower = title
        .to_lowercase()
        .replace("[français]", "francais")
        .replace("[anglais]", "anglais");
    NON_SLUG.replace_all(&lower, "-").trim_matches('-').to_owned()
}

/// `true` when `needle` occurs within `window` bytes of the first occurrence
/// of `anchor`. A missing anchor is never near anything.
fn contains_near(haystack: &str, anchor: &str, needle: &str, window: usize) -> bool {
    let Some(idx) = haystack.find(anchor) else {
        return false;
    };

    let mut start = idx.saturating_sub(window);
    while !haystack.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = (idx + anchor.len() + window).min(haystack.len());
    while !haystack.is_char_boundary(end) {
        end += 1;
    }

    haystack[start..end].contains(needle)
}

#[cfg(test)]
#[path = "larevanche_test.rs"]
mod tests;
