//! Upstream API clients (Binance DEX, Binance explorer, logo download)

mod dex;
mod explorer;

pub use dex::DexClient;
pub use explorer::ExplorerClient;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{Result, UpdateError};
use crate::types::{Bep2Asset, RawAsset, RawMarketPair};

/// Source of live market pairs and token metadata
#[async_trait]
pub trait MarketSource: Send + Sync {
    async fn fetch_market_pairs(&self, limit: usize) -> Result<Vec<RawMarketPair>>;

    async fn fetch_tokens(&self, limit: usize) -> Result<Vec<RawAsset>>;
}

/// Source of asset descriptors (logo URL, decimals) for bootstrapping
#[async_trait]
pub trait AssetCatalog: Send + Sync {
    async fn fetch_bep2_assets(&self, page: usize, rows: usize) -> Result<Vec<Bep2Asset>>;
}

/// Downloads logo images
#[async_trait]
pub trait LogoFetcher: Send + Sync {
    async fn fetch_logo(&self, url: &str) -> Result<Vec<u8>>;
}

pub(crate) fn build_http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| UpdateError::fetch("http client", e.to_string()))
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    source_name: &'static str,
) -> Result<T> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| UpdateError::fetch(source_name, e.to_string()))?;

    if !response.status().is_success() {
        return Err(UpdateError::fetch(
            source_name,
            format!("status {}", response.status()),
        ));
    }

    response
        .json()
        .await
        .map_err(|e| UpdateError::fetch(source_name, format!("failed to parse response: {}", e)))
}

/// Plain HTTP GET logo downloader
pub struct HttpLogoFetcher {
    client: Client,
}

impl HttpLogoFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
        })
    }
}

#[async_trait]
impl LogoFetcher for HttpLogoFetcher {
    async fn fetch_logo(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| UpdateError::fetch("logo", e.to_string()))?;

        if !response.status().is_success() {
            return Err(UpdateError::fetch(
                "logo",
                format!("status {} for {}", response.status(), url),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpdateError::fetch("logo", e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
