//! Configuration management for depindex.
//!
//! Settings come from three layers, later ones winning: built-in defaults, an
//! optional YAML file, and command-line flags (see [`crate::cli`]).
//!
//! ```yaml
//! bind: 0.0.0.0:8080
//! cycle-detection: true
//! max-line-length: 65536
//! ```

use crate::error::{Error, Result};
use depindex_wire::DEFAULT_MAX_LINE_LENGTH;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use tokio::fs;

/// Default TCP port the server listens on
pub const DEFAULT_PORT: u16 = 8080;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the listener binds to
    pub bind: SocketAddr,

    /// Reject index requests that would close a dependency cycle
    pub cycle_detection: bool,

    /// Longest accepted request line in bytes, excluding the terminator
    pub max_line_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            cycle_detection: false,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file.
    ///
    /// Keys missing from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML for this
    /// structure, or fails [`validate`](Self::validate).
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check value ranges that the type system does not.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if `max-line-length` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_line_length == 0 {
            return Err(Error::Config(
                "max-line-length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind.to_string(), "0.0.0.0:8080");
        assert!(!config.cycle_detection);
        assert_eq!(config.max_line_length, 64 * 1024);
    }

    #[tokio::test]
    async fn load_fills_missing_keys_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("depindex.yaml");
        std::fs::write(&path, "cycle-detection: true\n").unwrap();

        let config = ServerConfig::load(&path).await.unwrap();
        assert!(config.cycle_detection);
        assert_eq!(config.bind, ServerConfig::default().bind);
    }

    #[tokio::test]
    async fn save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("depindex.yaml");
        let config = ServerConfig {
            bind: "127.0.0.1:9999".parse().unwrap(),
            cycle_detection: true,
            max_line_length: 1024,
        };

        config.save(&path).await.unwrap();
        assert_eq!(ServerConfig::load(&path).await.unwrap(), config);
    }

    #[tokio::test]
    async fn load_rejects_unknown_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("depindex.yaml");
        std::fs::write(&path, "port: 80\n").unwrap();

        let err = ServerConfig::load(&path).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn load_rejects_zero_line_length() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("depindex.yaml");
        std::fs::write(&path, "max-line-length: 0\n").unwrap();

        let err = ServerConfig::load(&path).await.unwrap_err();
        assert!(err.to_string().contains("max-line-length"));
    }

    #[tokio::test]
    async fn load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = ServerConfig::load(&temp_dir.path().join("absent.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
