use anyhow::{Context, Result};
use clap::Args;
use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

use crate::allocator::{self, PortfolioRequest};
use crate::cli::{parse_portfolio_value, parse_positive_count};
use crate::data_paths::DataPaths;
use crate::report;
use crate::universe;

/// Tickers delisted or renamed since the reference list was published
const DEFAULT_EXCLUDED: &str = "HFC,VIAC,WLTW,DISCA";

#[derive(Args, Clone)]
pub struct AllocateArgs {
    /// Universe CSV file (first column is the ticker)
    #[arg(long, default_value = "sp_500_stocks.csv")]
    pub universe: PathBuf,

    /// Total portfolio value to allocate (prompted for when omitted)
    #[arg(long, value_parser = parse_portfolio_value)]
    pub portfolio_value: Option<Decimal>,

    /// Maximum symbols per batch request
    #[arg(long, default_value = "100", value_parser = parse_positive_count)]
    pub batch_size: usize,

    /// Tickers to drop regardless of provider response
    #[arg(long, value_delimiter = ',', default_value = DEFAULT_EXCLUDED)]
    pub exclude: Vec<String>,

    /// Concurrent batch requests (1 = sequential)
    #[arg(long, default_value = "1", value_parser = parse_positive_count)]
    pub concurrency: usize,

    /// Output spreadsheet path (default: <data-dir>/reports/recommended_trades.xlsx)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub struct AllocateCommand {
    args: AllocateArgs,
}

impl AllocateCommand {
    pub fn new(args: AllocateArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, host: &str, data_paths: DataPaths) -> Result<()> {
        let symbols = universe::load_universe(&self.args.universe).with_context(|| {
            format!(
                "failed to load ticker universe from {}",
                self.args.universe.display()
            )
        })?;
        println!(
            "{}",
            format!("📈 Loaded {} tickers from {}", symbols.len(), self.args.universe.display())
                .bright_blue()
        );

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
        println!(
            "{}",
            format!("💹 Quoted {} of {} tickers", quotes.len(), symbols.len()).bright_blue()
        );

        let total_value = match self.args.portfolio_value {
            Some(value) => value,
            None => prompt_portfolio_value()?,
        };
        let request = PortfolioRequest::new(total_value).context("invalid portfolio value")?;

        let rows = allocator::allocate(&request, &quotes).context("allocation failed")?;
        info!(
            rows = rows.len(),
            total_value = %total_value,
            "Computed equal-weight allocation"
        );

        println!("{}", report::render_table(&rows));

        let output = self
            .args
            .output
            .clone()
            .unwrap_or_else(|| data_paths.reports().join("recommended_trades.xlsx"));
        report::write_report(&rows, &output)
            .with_context(|| format!("failed to write report to {}", output.display()))?;

        println!(
            "{}",
            format!(
                "✅ Wrote {} recommendations to {}",
                rows.len(),
                output.display()
            )
            .bright_green()
        );

        Ok(())
    }
}

/// Ask for the portfolio value until a positive decimal parses.
/// Thin collaborator around the allocator; validation proper lives in
/// `PortfolioRequest`.
fn prompt_portfolio_value() -> Result<Decimal> {
    loop {
        print!("Enter the value of your portfolio: ");
        io::stdout().flush()?;

        let mut line = String::new();
        let read = io::stdin().read_line(&mut line)?;
        if read == 0 {
            anyhow::bail!("no portfolio value provided");
        }

        match line.trim().parse::<Decimal>() {
            Ok(value) if value > Decimal::ZERO => return Ok(value),
            _ => println!(
                "{}",
                "Portfolio value must be a positive number.".bright_red()
            ),
        }
    }
}
