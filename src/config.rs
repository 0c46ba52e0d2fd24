//! Configuration for gun-http

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Name of the config file inside the data directory
pub const CONFIG_FILE: &str = "gun-http.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the config and graph snapshot (default: ~/.gun-http)
    #[serde(default)]
    pub data_dir: PathBuf,

    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest PUT body accepted, in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Allow cross-origin requests
    #[serde(default = "default_true")]
    pub cors: bool,

    /// Write the graph to a snapshot file after every change
    #[serde(default = "default_true")]
    pub persist: bool,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_dir: home.join(".gun-http"),
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            cors: true,
            persist: true,
        }
    }
}

impl Config {
    /// Load config from the default data directory, or use defaults
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not find home directory".into()))?;
        Self::load_from_dir(home.join(".gun-http"))
    }

    /// Load config from a specific data directory
    pub fn load_from_dir(data_dir: PathBuf) -> Result<Self> {
        let config_path = data_dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Config>(&content)?
        } else {
            Config::default()
        };
        config.data_dir = data_dir;

        Ok(config)
    }

    /// Save config into its data directory
    pub fn save(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir)?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(self.config_path(), content)?;

        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Path to the graph snapshot
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join("graph.json")
    }

    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8765
}

fn default_max_body_bytes() -> usize {
    100 * 1024
}

fn default_true() -> bool {
    true
}
