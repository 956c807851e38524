use crate::core::FetchError;
use anyhow::{Context, Result};
use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// One blocking HTTP client bound to a single query endpoint and API key.
///
/// Each call is a single GET; nothing is retried.
pub struct ApiClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: String, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(&format!("{}/query", base_url.trim_end_matches('/')))
            .with_context(|| format!("Invalid API base URL: {base_url}"))?;
        let client = Client::builder()
            .user_agent("stockview/0.1")
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(ApiClient {
            client,
            endpoint,
            api_key,
        })
    }

    /// Issues `GET <endpoint>?<params>&symbol=..&apikey=..` and decodes the
    /// body into a JSON tree.
    pub fn get_json(&self, symbol: &str, params: &[(&str, &str)]) -> Result<Value, FetchError> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("symbol", symbol)
            .append_pair("apikey", &self.api_key);

        debug!(endpoint = %self.endpoint, ?params, "Requesting market data");

        // The request URL carries the API key; drop it before the error escapes.
        let transport = |source: reqwest::Error| FetchError::Transport {
            symbol: symbol.to_string(),
            source: source.without_url(),
        };

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(transport)?;
        let text = response.text().map_err(transport)?;

        debug!(bytes = text.len(), "Received market data response");

        serde_json::from_str(&text)
            .map_err(|e| FetchError::parse(symbol, format!("invalid JSON: {e}")))
    }
}
