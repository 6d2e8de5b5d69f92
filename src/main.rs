use anyhow::Result;
use clap::Parser;

use equiweight::{cli, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables (IEX_CLOUD_API_TOKEN lives in .env)
    dotenvy::dotenv().ok();

    // Parse CLI and execute (CLI handles logging initialization)
    let cli = cli::Cli::parse();

    match cli.execute().await {
        Ok(()) => {
            logging::log_session_end();
            Ok(())
        }
        Err(e) => {
            tracing::error!("Application error: {}", e);

            // Log error chain if available
            let mut source = e.source();
            while let Some(err) = source {
                tracing::error!("   Caused by: {}", err);
                source = err.source();
            }

            logging::log_session_end();
            Err(e)
        }
    }
}
