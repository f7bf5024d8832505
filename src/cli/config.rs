//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use crate::grading::TotalWeightPolicy;

/// Default address for `quizbank serve`.
pub const DEFAULT_BIND: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5000);

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database file
    pub database: Option<PathBuf>,

    pub server: ServerConfig,

    pub grading: GradingConfig,
}

/// `[server]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind: Option<SocketAddr>,
}

/// `[grading]` table.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GradingConfig {
    /// Which questions count toward the total weight
    pub total_weight: TotalWeightPolicy,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/quizbank/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quizbank")
            .join("config.toml")
    }

    /// Resolve the database path, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--db` argument
    /// 2. Config file `database` setting
    /// 3. `<data dir>/quizbank/quizbank.db`
    pub fn database_path(&self, cli_db: Option<&PathBuf>) -> PathBuf {
        cli_db
            .cloned()
            .or_else(|| self.database.clone())
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("quizbank")
                    .join("quizbank.db")
            })
    }

    /// Resolve the listen address, with CLI argument taking precedence.
    pub fn bind_addr(&self, cli_bind: Option<SocketAddr>) -> SocketAddr {
        cli_bind
            .or(self.server.bind)
            .unwrap_or(DEFAULT_BIND)
    }
}
