//! Binance DEX REST client
//!
//! Endpoints: `/api/v1/markets` and `/api/v1/tokens`

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use super::{build_http_client, get_json, MarketSource};
use crate::error::Result;
use crate::types::{RawAsset, RawMarketPair};

pub struct DexClient {
    client: Client,
    base_url: String,
}

impl DexClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn markets_url(&self, limit: usize) -> String {
        format!("{}/api/v1/markets?limit={}", self.base_url, limit.max(1))
    }

    fn tokens_url(&self, limit: usize) -> String {
        format!("{}/api/v1/tokens?limit={}", self.base_url, limit.max(1))
    }
}

#[async_trait]
impl MarketSource for DexClient {
    async fn fetch_market_pairs(&self, limit: usize) -> Result<Vec<RawMarketPair>> {
        let pairs: Vec<RawMarketPair> =
            get_json(&self.client, &self.markets_url(limit), "dex markets").await?;

        info!(count = pairs.len(), "Fetched market pairs");
        Ok(pairs)
    }

    async fn fetch_tokens(&self, limit: usize) -> Result<Vec<RawAsset>> {
        let tokens: Vec<RawAsset> =
            get_json(&self.client, &self.tokens_url(limit), "dex tokens").await?;

        info!(count = tokens.len(), "Fetched tokens");
        Ok(tokens)
    }
}
