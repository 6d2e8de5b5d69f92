//! CLI Commands module
//!
//! Each command follows a consistent pattern with dedicated Args and Command
//! structs.

pub mod allocate;
pub mod quotes;

use anyhow::{Context, Result};
use std::collections::HashSet;

use crate::config::ProviderConfig;
use crate::quotes::{IexProvider, QuoteFetcher};

/// Build a quote fetcher against the given host with exclusion and batching
/// settings taken from the command line.
pub(crate) fn build_fetcher(
    host: &str,
    batch_size: usize,
    exclude: &[String],
    concurrency: usize,
) -> Result<QuoteFetcher<IexProvider>> {
    let config = ProviderConfig::from_env(host).context("provider configuration failed")?;
    let provider = IexProvider::new(config);

    let excluded: HashSet<String> = exclude
        .iter()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    Ok(QuoteFetcher::new(provider, batch_size, excluded).with_concurrency(concurrency))
}
