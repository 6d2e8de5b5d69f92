use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use super::Quote;
use crate::config::ProviderConfig;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("batch request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned HTTP {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("malformed provider payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("quote for {symbol} is missing {field}")]
    MissingField {
        symbol: String,
        field: &'static str,
    },
}

/// Trait for batch quote providers
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Get the name of the provider
    fn name(&self) -> &str;

    /// Fetch quotes for one batch of symbols.
    ///
    /// Symbols the provider does not recognize are simply absent from the
    /// result. Any transport, status or payload failure fails the whole batch.
    async fn fetch_batch(&self, symbols: &[String])
        -> Result<HashMap<String, Quote>, ProviderError>;
}

/// IEX Cloud batch quote provider
pub struct IexProvider {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl IexProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn batch_url(&self, symbols: &[String]) -> String {
        format!(
            "{}/stable/stock/market/batch/?types=quote&symbols={}&token={}",
            self.config.host,
            symbols.join(","),
            self.config.token
        )
    }
}

/// Wire format: `{ "AAPL": { "quote": { "latestPrice": .., "marketCap": .. } } }`
#[derive(Deserialize)]
struct BatchEntry {
    quote: RawQuote,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuote {
    latest_price: Option<Decimal>,
    // null for funds and freshly listed tickers
    market_cap: Option<Decimal>,
}

#[async_trait]
impl QuoteProvider for IexProvider {
    fn name(&self) -> &str {
        "IEX Cloud"
    }

    async fn fetch_batch(
        &self,
        symbols: &[String],
    ) -> Result<HashMap<String, Quote>, ProviderError> {
        let url = self.batch_url(symbols);
        debug!(symbols = symbols.len(), "Requesting quote batch");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status,
                // Don't leak the token into error messages or logs
                url: url.split("&token=").next().unwrap_or(&url).to_string(),
            });
        }

        let body = response.text().await?;
        let entries: HashMap<String, BatchEntry> = serde_json::from_str(&body)?;

        let mut quotes = HashMap::with_capacity(entries.len());
        for (symbol, entry) in entries {
            let price = entry
                .quote
                .latest_price
                .ok_or_else(|| ProviderError::MissingField {
                    symbol: symbol.clone(),
                    field: "latestPrice",
                })?;
            let market_cap = entry.quote.market_cap.unwrap_or_default();
            quotes.insert(
                symbol.clone(),
                Quote {
                    symbol,
                    price,
                    market_cap,
                },
            );
        }

        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_url_joins_symbols_with_commas() {
        let provider = IexProvider::new(ProviderConfig::new(
            "https://sandbox.iexapis.com",
            "Tpk_test",
        ));
        let symbols = vec!["AAPL".to_string(), "MSFT".to_string()];

        let url = provider.batch_url(&symbols);
        assert!(url.starts_with("https://sandbox.iexapis.com/stable/stock/market/batch/"));
        assert!(url.contains("symbols=AAPL,MSFT"));
        assert!(url.contains("types=quote"));
        assert!(url.contains("token=Tpk_test"));
    }

    #[test]
    fn test_status_error_strips_token_from_url() {
        let url = "https://x/stable/stock/market/batch/?types=quote&symbols=A&token=secret";
        let shown = url.split("&token=").next().unwrap();
        assert!(!shown.contains("secret"));
    }
}
