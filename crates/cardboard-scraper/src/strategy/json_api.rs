use cardboard_core::{parse_price, JsonApiConfig, ProductMatch};
use serde_json::{Map, Value};

use crate::client::{resolve_product_url, search_url};
use crate::error::ScraperError;

/// Generic JSON search endpoint with configurable field names.
#[derive(Debug, Clone)]
pub struct JsonApiStrategy {
    cfg: JsonApiConfig,
}

impl JsonApiStrategy {
    #[must_use]
    pub fn new(cfg: JsonApiConfig) -> Self {
        Self { cfg }
    }

    #[must_use]
    pub fn search_url(&self, base_url: &str, game_name: &str) -> String {
        search_url(base_url, &self.cfg.search_path, game_name)
    }

    /// Reads the product array at `productsPath` and maps each object through
    /// the configured field names.
    ///
    /// A missing key or a non-array value yields no listings; non-object
    /// array items are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Deserialize`] if the body is not a JSON object.
    pub fn parse_listings(
        &self,
        base_url: &str,
        body: &str,
    ) -> Result<Vec<ProductMatch>, ScraperError> {
        let data: Map<String, Value> =
            serde_json::from_str(body).map_err(|e| ScraperError::Deserialize {
                context: format!("JSON search response from {base_url}"),
                source: e,
            })?;

        let Some(Value::Array(items)) = data.get(&self.cfg.products_path) else {
            return Ok(Vec::new());
        };

        let fields = &self.cfg.fields;
        Ok(items
            .iter()
            .filter_map(Value::as_object)
            .map(|product| {
                let price = field_text(product, &fields.price).trim().to_owned();
                ProductMatch {
                    title: field_text(product, &fields.title),
                    url: resolve_product_url(base_url, &field_text(product, &fields.url)),
                    price_num: parse_price(&price),
                    price,
                    in_stock: self.determine_stock(product),
                }
            })
            .collect())
    }

    fn determine_stock(&self, product: &Map<String, Value>) -> bool {
        let fields = &self.cfg.fields;

        if let Some(key) = fields.quantity.as_deref() {
            if field_number(product, key) > 0.0 {
                return true;
            }
        }

        if let (Some(key), Some(sentinel)) =
            (fields.stock_status.as_deref(), self.cfg.in_stock_value.as_deref())
        {
            if field_text(product, key) == sentinel {
                return true;
            }
        }

        fields.quantity.is_none() && fields.stock_status.is_none()
    }
}

/// String value of a field. Numbers are rendered; anything else is empty.
fn field_text(product: &Map<String, Value>, key: &str) -> String {
    match product.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Numeric value of a field, accepting integer or float encodings.
fn field_number(product: &Map<String, Value>, key: &str) -> f64 {
    product.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}
