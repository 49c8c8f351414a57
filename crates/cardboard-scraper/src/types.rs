//! Shopify predictive-search response types for `GET /search/suggest.json`.
//!
//! ## Observed shape
//!
//! Products sit three levels deep under `resources.results.products`. Any of
//! the wrapping objects may be missing when a store returns no results, so
//! every level defaults to empty.
//!
//! ### `price`
//! Usually a decimal string such as `"39.99"`. Some themes emit a bare
//! number instead; both decode to the display string.
//!
//! ### `available`
//! Boolean stock flag taken verbatim. Absent means not available.

use serde::Deserialize;

/// Top-level response from `GET /search/suggest.json`.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub resources: SuggestResources,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestResources {
    #[serde(default)]
    pub results: SuggestResults,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuggestResults {
    #[serde(default)]
    pub products: Vec<SuggestProduct>,
}

/// A single product from predictive search.
#[derive(Debug, Deserialize)]
pub struct SuggestProduct {
    pub title: String,

    /// Storefront path, usually root-relative (e.g. `"/products/catan?_pos=1"`).
    #[serde(default)]
    pub url: String,

    #[serde(default, deserialize_with = "price_text")]
    pub price: String,

    #[serde(default)]
    pub available: bool,
}

impl SuggestResponse {
    #[must_use]
    pub fn into_products(self) -> Vec<SuggestProduct> {
        self.resources.results.products
    }
}

fn price_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Text(String),
        Number(serde_json::Number),
        Null(()),
    }

    Ok(match Price::deserialize(deserializer)? {
        Price::Text(s) => s,
        Price::Number(n) => n.to_string(),
        Price::Null(()) => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_nested_products() {
        let json = r#"{"resources":{"results":{"products":[
            {"title":"Catan","url":"/products/catan","price":"39.99","available":true}
        ]}}}"#;
        let products = serde_json::from_str::<SuggestResponse>(json)
            .expect("deserialize")
            .into_products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Catan");
        assert_eq!(products[0].price, "39.99");
        assert!(products[0].available);
    }

    #[test]
    fn missing_levels_decode_as_empty() {
        let products = serde_json::from_str::<SuggestResponse>(r#"{"resources":{}}"#)
            .expect("deserialize")
            .into_products();
        assert!(products.is_empty());
    }

    #[test]
    fn numeric_price_and_missing_available() {
        let json = r#"{"resources":{"results":{"products":[
            {"title":"Azul","url":"/products/azul","price":44.5}
        ]}}}"#;
        let products = serde_json::from_str::<SuggestResponse>(json)
            .expect("deserialize")
            .into_products();
        assert_eq!(products[0].price, "44.5");
        assert!(!products[0].available);
    }

    #[test]
    fn null_price_is_empty() {
        let json = r#"{"resources":{"results":{"products":[
            {"title":"Azul","url":"/products/azul","price":null,"available":true}
        ]}}}"#;
        let products = serde_json::from_str::<SuggestResponse>(json)
            .expect("deserialize")
            .into_products();
        assert!(products[0].price.is_empty());
    }
}
