//! Depindex server binary.

use anyhow::Result;
use depindex::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the depindex server.
///
/// Uses the multi-threaded runtime so client connections are served in
/// parallel.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=depindex=debug cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("depindex=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Depindex stopped");
    Ok(())
}
