//! Command-line interface for the depindex server.
//!
//! Flags override values from the configuration file, which override the
//! built-in defaults.
//!
//! # Example
//!
//! ```bash
//! depindex --bind 127.0.0.1:8080 --cycle-detection
//! depindex --config /etc/depindex.yaml --max-line-length 4096
//! ```

use crate::config::ServerConfig;
use crate::error::Result;
use crate::index::new_in_memory_index;
use crate::server::Server;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};

/// Depindex - a package index that enforces dependency integrity
///
/// Serves the INDEX/REMOVE/QUERY line protocol over TCP.
#[derive(Parser, Debug)]
#[command(name = "depindex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address to listen on (default 0.0.0.0:8080)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<SocketAddr>,

    /// Reject index requests that would create a dependency cycle
    ///
    /// Pass `--cycle-detection=false` to turn it off when the config file enables it.
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub cycle_detection: Option<bool>,

    /// Longest accepted request line in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_line_length: Option<usize>,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded or the
    /// result fails validation.
    pub async fn resolve_config(&self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path).await?,
            None => ServerConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(cycle_detection) = self.cycle_detection {
            config.cycle_detection = cycle_detection;
        }
        if let Some(max_line_length) = self.max_line_length {
            config.max_line_length = max_line_length;
        }

        config.validate()?;
        Ok(config)
    }

    /// Run the server until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the listener cannot be bound.
    pub async fn execute(self) -> Result<()> {
        let config = self.resolve_config().await?;
        info!(
            bind = %config.bind,
            cycle_detection = config.cycle_detection,
            max_line_length = config.max_line_length,
            "Starting depindex"
        );

        let index = new_in_memory_index(config.cycle_detection);
        let server = Server::bind(config.bind, index, config.max_line_length).await?;
        server.run_until(shutdown_signal()).await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
}
