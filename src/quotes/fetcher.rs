use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{debug, info};

use super::provider::{ProviderError, QuoteProvider};
use super::QuoteSet;

/// Partition symbols into contiguous chunks of at most `batch_size`.
///
/// The last chunk may be smaller; chunk order matches input order. For N
/// symbols this yields ceil(N / batch_size) chunks.
pub fn chunk_symbols(symbols: &[String], batch_size: usize) -> Vec<Vec<String>> {
    symbols
        .chunks(batch_size.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Chunked batch quote fetcher.
///
/// Issues one provider request per chunk (optionally several in flight) and
/// merges the results into a single [`QuoteSet`] ordered like the input
/// symbol list. Excluded symbols are dropped regardless of what the provider
/// returns; symbols the provider omits are simply absent. Any failed chunk
/// fails the whole fetch, and nothing is retried.
pub struct QuoteFetcher<P: QuoteProvider> {
    provider: P,
    batch_size: usize,
    concurrency: usize,
    excluded: HashSet<String>,
}

impl<P: QuoteProvider> QuoteFetcher<P> {
    pub fn new(provider: P, batch_size: usize, excluded: HashSet<String>) -> Self {
        Self {
            provider,
            batch_size: batch_size.max(1),
            concurrency: 1,
            excluded,
        }
    }

    /// Allow up to `concurrency` chunk requests in flight at once
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub async fn fetch(&self, symbols: &[String]) -> Result<QuoteSet, ProviderError> {
        let chunks = chunk_symbols(symbols, self.batch_size);
        info!(
            provider = self.provider.name(),
            symbols = symbols.len(),
            chunks = chunks.len(),
            "Fetching quote batches"
        );

        // buffered() yields results in chunk order, so the merged set follows
        // the input symbol order even when requests overlap.
        let mut results = stream::iter(chunks.into_iter().map(|chunk| {
            let provider = &self.provider;
            async move {
                let fetched = provider.fetch_batch(&chunk).await?;
                Ok::<_, ProviderError>((chunk, fetched))
            }
        }))
        .buffered(self.concurrency);

        let mut quotes = QuoteSet::new();
        while let Some(result) = results.next().await {
            let (chunk, mut fetched) = result?;
            for symbol in &chunk {
                if self.excluded.contains(symbol) {
                    debug!(%symbol, "Skipping excluded symbol");
                    continue;
                }
                if let Some(quote) = fetched.remove(symbol) {
                    quotes.insert(quote);
                } else {
                    debug!(%symbol, "Provider omitted symbol");
                }
            }
        }

        Ok(quotes)
    }
}
