//! Configuration management for tokenlist-sync
//!
//! Loads from TOML files + environment variables via .env

mod types;

pub use types::*;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::tokenlist::{CorruptPolicy, DocumentHeader};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub chain: ChainConfig,
    pub clients: ClientsConfig,
    pub repository: RepositoryConfig,
    pub tokenlist: TokenListConfig,
    pub merge: MergeConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientsConfig {
    /// Binance DEX API endpoint
    pub dex_url: String,
    /// Binance explorer API endpoint
    pub explorer_url: String,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryConfig {
    /// Root of the assets repository checkout
    pub root: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenListConfig {
    /// Prefix of the document name ("{publisher}: {chain name}")
    pub publisher: String,
    /// Document-level logo
    pub logo_uri: String,
    /// chrono format string for the document timestamp
    pub time_format: String,
    pub market_pairs_limit: usize,
    pub tokens_limit: usize,
    pub assets_page: usize,
    pub assets_rows: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MergeConfig {
    /// Publish a fresh version 1 when the previous document is unreadable
    pub rewrite_corrupt: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Emit JSON log lines
    pub json: bool,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        Self::load_with(None)
    }

    /// Same as [`AppConfig::load`], with an extra config file layered on top
    pub fn load_with(extra: Option<&Path>) -> Result<Self> {
        // Load .env file first
        dotenvy::dotenv().ok();

        let chain = ChainConfig::binance();

        let mut builder = Config::builder()
            // Chain defaults
            .set_default("chain.coin_id", chain.coin_id as i64)?
            .set_default("chain.handle", chain.handle.as_str())?
            .set_default("chain.name", chain.name.as_str())?
            .set_default("chain.native_symbol", chain.native_symbol.as_str())?
            .set_default("chain.decimals", chain.decimals as i64)?
            .set_default("chain.token_type", chain.token_type.as_str())?
            .set_default("chain.explorer_url", chain.explorer_url.as_str())?
            .set_default("chain.assets_app_url", chain.assets_app_url.as_str())?
            // Client defaults
            .set_default("clients.dex_url", "https://dex.binance.org")?
            .set_default("clients.explorer_url", "https://explorer.binance.org")?
            .set_default("clients.timeout_secs", 30)?
            // Repository defaults
            .set_default("repository.root", ".")?
            // Token list defaults
            .set_default("tokenlist.publisher", "Trust Wallet")?
            .set_default(
                "tokenlist.logo_uri",
                "https://trustwallet.com/assets/images/favicon.png",
            )?
            .set_default("tokenlist.time_format", "%Y-%m-%dT%H:%M:%S%.6f")?
            .set_default("tokenlist.market_pairs_limit", 1000)?
            .set_default("tokenlist.tokens_limit", 10000)?
            .set_default("tokenlist.assets_page", 1)?
            .set_default("tokenlist.assets_rows", 1000)?
            // Merge defaults
            .set_default("merge.rewrite_corrupt", false)?
            // Logging defaults
            .set_default("logging.json", false)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        if let Some(path) = extra {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            // Override with environment variables (TOKENLIST__SECTION__KEY)
            .add_source(Environment::with_prefix("TOKENLIST").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(app_config)
    }

    /// Generate a digest of the config for logging
    pub fn digest(&self) -> String {
        format!(
            "chain={} native={} dex={} explorer={} repo={} rewrite_corrupt={}",
            self.chain.handle,
            self.chain.native_symbol,
            self.clients.dex_url,
            self.clients.explorer_url,
            self.repository.root.display(),
            self.merge.rewrite_corrupt
        )
    }

    pub fn document_header(&self) -> DocumentHeader {
        DocumentHeader {
            name: format!("{}: {}", self.tokenlist.publisher, self.chain.name),
            logo_uri: self.tokenlist.logo_uri.clone(),
        }
    }

    pub fn corrupt_policy(&self) -> CorruptPolicy {
        if self.merge.rewrite_corrupt {
            CorruptPolicy::Rewrite
        } else {
            CorruptPolicy::Preserve
        }
    }
}

impl std::fmt::Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest())
    }
}
