//! Symbol source: the index constituent list, read from a CSV file whose
//! first column is the ticker. File order is preserved so downstream output
//! is deterministic.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("failed to read universe file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse universe file: {0}")]
    Csv(#[from] csv::Error),
    #[error("universe file {path} contains no tickers")]
    Empty { path: PathBuf },
}

/// Load the ordered ticker universe from a CSV file.
///
/// The first column of each record is the ticker. A leading "Ticker" header
/// row is skipped if present. Duplicate tickers keep their first position.
pub fn load_universe(path: &Path) -> Result<Vec<String>, UniverseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for record in reader.records() {
        let record = record?;
        let Some(field) = record.get(0) else {
            continue;
        };
        let ticker = field.trim();
        if ticker.is_empty() || ticker.eq_ignore_ascii_case("ticker") {
            continue;
        }
        let ticker = ticker.to_uppercase();
        if seen.insert(ticker.clone()) {
            symbols.push(ticker);
        }
    }

    if symbols.is_empty() {
        return Err(UniverseError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!(count = symbols.len(), path = %path.display(), "Loaded ticker universe");
    Ok(symbols)
}
