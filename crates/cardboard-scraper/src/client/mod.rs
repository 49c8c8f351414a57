//! Shared HTTP client for store searches.

mod origin;

use std::collections::BTreeMap;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;

use crate::error::ScraperError;

pub use origin::{extract_store_origin, join_base, resolve_product_url};

/// Thin wrapper over `reqwest::Client` with the per-request timeout and
/// default `User-Agent` baked in.
///
/// One instance is built by the caller and passed to every store check, so
/// all stores share a connection pool.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: Client,
}

impl StoreClient {
    /// Creates a `StoreClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// GETs `url` with the store's extra headers and returns the body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ScraperError::Http`] on network failure, timeout, or an invalid
    ///   header in the store configuration.
    pub async fn get_text(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<String, ScraperError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// Like [`get_text`](Self::get_text), then decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Everything `get_text` returns, plus [`ScraperError::Deserialize`] when
    /// the body does not decode as `T`.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
    ) -> Result<T, ScraperError> {
        let body = self.get_text(url, headers).await?;
        serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
            context: format!("response from {url}"),
            source: e,
        })
    }
}

/// Percent-encodes a game name for use in a query string.
#[must_use]
pub fn encode_query(game_name: &str) -> String {
    utf8_percent_encode(game_name, NON_ALPHANUMERIC).to_string()
}

/// Substitutes the encoded game name into a `{query}` search template and
/// joins it to the base URL.
#[must_use]
pub fn search_url(base_url: &str, search_path: &str, game_name: &str) -> String {
    let path = search_path.replacen("{query}", &encode_query(game_name), 1);
    join_base(base_url, &path)
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
