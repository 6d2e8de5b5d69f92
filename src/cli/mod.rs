//! CLI module for equiweight
//!
//! Command-line interface for the equal-weight index allocation tool. Uses
//! clap for argument parsing and a structured command pattern: one Args +
//! Command pair per subcommand.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod args;
pub mod commands;

pub use args::{parse_portfolio_value, parse_positive_count};

use crate::data_paths::{DataPaths, DEFAULT_DATA_DIR};
use crate::logging::{self, LoggingConfig};

use commands::allocate::{AllocateArgs, AllocateCommand};
use commands::quotes::{QuotesArgs, QuotesCommand};

#[derive(Parser)]
#[command(name = "equiweight")]
#[command(version)]
#[command(about = "Equal-weight index fund allocation tool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use the IEX sandbox environment (randomized quote data)
    #[arg(long, global = true)]
    pub sandbox: bool,

    /// Data directory path (default: ./data)
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute equal-weight share purchases and emit the spreadsheet
    Allocate(AllocateArgs),

    /// Fetch and display quotes for the universe without allocating
    Quotes(QuotesArgs),
}

impl Cli {
    /// Get the provider host based on the sandbox flag
    pub fn get_host(&self) -> &'static str {
        if self.sandbox {
            "https://sandbox.iexapis.com"
        } else {
            "https://cloud.iexapis.com"
        }
    }

    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let host = self.get_host();
        let data_paths = DataPaths::new(&self.data_dir);

        data_paths.ensure_directories()?;
        logging::init_logging(LoggingConfig::new(data_paths.clone(), self.verbose > 0))?;

        match self.command {
            Commands::Allocate(args) => AllocateCommand::new(args).execute(host, data_paths).await,
            Commands::Quotes(args) => QuotesCommand::new(args).execute(host, data_paths).await,
        }
    }
}
