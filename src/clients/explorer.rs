//! Binance explorer REST client

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use super::{build_http_client, get_json, AssetCatalog};
use crate::error::Result;
use crate::types::{Bep2Asset, Bep2AssetPage};

pub struct ExplorerClient {
    client: Client,
    base_url: String,
}

impl ExplorerClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout_secs)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn assets_url(&self, page: usize, rows: usize) -> String {
        format!(
            "{}/api/v1/assets?page={}&rows={}",
            self.base_url,
            page.max(1),
            rows.max(1)
        )
    }
}

#[async_trait]
impl AssetCatalog for ExplorerClient {
    async fn fetch_bep2_assets(&self, page: usize, rows: usize) -> Result<Vec<Bep2Asset>> {
        let body: Bep2AssetPage =
            get_json(&self.client, &self.assets_url(page, rows), "explorer assets").await?;

        info!(
            count = body.asset_info_list.len(),
            total = body.total_num,
            "Fetched explorer assets"
        );
        Ok(body.asset_info_list)
    }
}
