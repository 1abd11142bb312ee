//! dorkscan - search-engine dork scanner for exposed sensitive files.

mod cli;

use std::process::ExitCode;

use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "dorkscan=info"
    } else {
        "dorkscan=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let result = cli::run().await;
    match &result {
        Ok(()) => {}
        Err(cli::RunError::Interrupted) => {
            eprintln!("\n{} Scan interrupted by user!", style("[-]").red());
            // A prompt read may still be blocking stdin; don't wait for it.
            std::process::exit(cli::exit_status(&result).into());
        }
        Err(cli::RunError::Usage(e)) => {
            let _ = e.print();
        }
        Err(e) => {
            tracing::debug!("Run failed: {:?}", e);
            eprintln!("{} Error: {:#}", style("[-]").red(), e);
        }
    }
    ExitCode::from(cli::exit_status(&result))
}
