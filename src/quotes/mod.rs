//! Batch quote retrieval: quote types, the provider abstraction and the
//! chunked batch fetcher.

mod fetcher;
mod provider;

pub use fetcher::{chunk_symbols, QuoteFetcher};
pub use provider::{IexProvider, ProviderError, QuoteProvider};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single market quote. Immutable once produced by the fetcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: Decimal,
    pub market_cap: Decimal,
}

/// Insertion-ordered mapping from symbol to quote.
///
/// Iteration follows insertion order, which the fetcher keeps equal to the
/// requested symbol order, so allocations and reports come out in the same
/// order as the input universe.
#[derive(Debug, Clone, Default)]
pub struct QuoteSet {
    quotes: Vec<Quote>,
    index: HashMap<String, usize>,
}

impl QuoteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a quote, replacing any existing quote for the same symbol in place
    pub fn insert(&mut self, quote: Quote) {
        match self.index.get(&quote.symbol) {
            Some(&pos) => self.quotes[pos] = quote,
            None => {
                self.index.insert(quote.symbol.clone(), self.quotes.len());
                self.quotes.push(quote);
            }
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&Quote> {
        self.index.get(symbol).map(|&pos| &self.quotes[pos])
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.index.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Iterate quotes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Quote> {
        self.quotes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(symbol: &str, price: Decimal) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            price,
            market_cap: dec!(0),
        }
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut set = QuoteSet::new();
        set.insert(quote("MSFT", dec!(300)));
        set.insert(quote("AAPL", dec!(150)));
        set.insert(quote("GOOG", dec!(2800)));

        let order: Vec<&str> = set.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(order, vec!["MSFT", "AAPL", "GOOG"]);
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let mut set = QuoteSet::new();
        set.insert(quote("AAPL", dec!(150)));
        set.insert(quote("MSFT", dec!(300)));
        set.insert(quote("AAPL", dec!(151)));

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("AAPL").unwrap().price, dec!(151));
        let order: Vec<&str> = set.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(order, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn test_get_missing_symbol() {
        let set = QuoteSet::new();
        assert!(set.get("AAPL").is_none());
        assert!(set.is_empty());
    }
}
