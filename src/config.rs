use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ServerError;

/// Environment variable naming an optional YAML configuration file.
pub const CONFIG_ENV: &str = "PLINTH_CONFIG";

/// Environment variable overriding `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

/// Socket and per-connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listening socket binds to
    pub listen_addr: String,
    /// Pending-connection queue length passed to `listen`
    pub backlog: u32,
    /// Capacity of the scratch buffer a request is read into
    pub buffer_capacity: usize,
}

/// Where files are served from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory request paths are resolved against
    pub root: PathBuf,
    /// Document served for the root path `/`
    pub index: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            backlog: 10,
            buffer_capacity: 1024,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            index: "/index.html".to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration from the file named by `PLINTH_CONFIG` (if any),
    /// then applies the `LISTEN` override.
    pub fn load() -> Result<Self, ServerError> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path).map_err(|e| ServerError::Config {
                    reason: format!("cannot read {}: {}", path, e),
                })?;
                Self::from_yaml(&raw)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = addr;
        }

        Ok(cfg)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ServerError> {
        let cfg: Config = serde_yaml::from_str(raw).map_err(|e| ServerError::Config {
            reason: e.to_string(),
        })?;

        if cfg.server.buffer_capacity == 0 {
            return Err(ServerError::Config {
                reason: "server.buffer_capacity must be greater than zero".to_string(),
            });
        }

        Ok(cfg)
    }
}
