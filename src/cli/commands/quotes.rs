use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;
use std::path::PathBuf;

use crate::cli::parse_positive_count;
use crate::data_paths::DataPaths;
use crate::universe;

#[derive(Args, Clone)]
pub struct QuotesArgs {
    /// Universe CSV file (first column is the ticker)
    #[arg(long, default_value = "sp_500_stocks.csv")]
    pub universe: PathBuf,

    /// Maximum symbols per batch request
    #[arg(long, default_value = "100", value_parser = parse_positive_count)]
    pub batch_size: usize,

    /// Tickers to drop regardless of provider response
    #[arg(long, value_delimiter = ',', default_value = "HFC,VIAC,WLTW,DISCA")]
    pub exclude: Vec<String>,

    /// Concurrent batch requests (1 = sequential)
    #[arg(long, default_value = "1", value_parser = parse_positive_count)]
    pub concurrency: usize,
}

pub struct QuotesCommand {
    args: QuotesArgs,
}

impl QuotesCommand {
    pub fn new(args: QuotesArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, _data_paths: DataPaths) -> Result<()> {
        let symbols = universe::load_universe(&self.args.universe).with_context(|| {
            format!(
                "failed to load ticker universe from {}",
                self.args.universe.display()
            )
        })?;

        let fetcher = super::build_fetcher(
            host,
            self.args.batch_size,
            &self.args.exclude,
            self.args.concurrency,
        )?;
        let quotes = fetcher
            .fetch(&symbols)
            .await
            .context("batch quote fetch failed")?;

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(["Ticker", "Stock Price", "Market Cap"]);
        for quote in quotes.iter() {
            table.add_row(vec![
                quote.symbol.clone(),
                format!("${:.2}", quote.price),
                format!("${:.2}", quote.market_cap),
            ]);
        }
        println!("{table}");

        println!(
            "{}",
            format!("💹 Quoted {} of {} tickers", quotes.len(), symbols.len()).bright_blue()
        );

        Ok(())
    }
}
