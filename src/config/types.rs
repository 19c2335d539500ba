//! Static chain metadata
//!
//! Passed explicitly into the resolver, aggregator and bootstrap instead of
//! being looked up from global coin tables.

use serde::Deserialize;

use crate::tokenlist::resolve_asset_id;
use crate::types::{AssetId, TokenType};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainConfig {
    /// SLIP-44 coin type used in asset ids
    pub coin_id: u32,
    /// Folder name under `blockchains/`
    pub handle: String,
    /// Display name, e.g. "BNB Beacon Chain"
    pub name: String,
    /// Native asset symbol, always eligible
    pub native_symbol: String,
    pub decimals: u32,
    #[serde(deserialize_with = "deserialize_token_type")]
    pub token_type: TokenType,
    pub explorer_url: String,
    pub assets_app_url: String,
}

impl ChainConfig {
    /// BNB Beacon Chain (BEP2)
    pub fn binance() -> Self {
        Self {
            coin_id: 714,
            handle: "binance".to_string(),
            name: "BNB Beacon Chain".to_string(),
            native_symbol: "BNB".to_string(),
            decimals: 8,
            token_type: TokenType::BEP2,
            explorer_url: "https://explorer.binance.org".to_string(),
            assets_app_url: "https://assets-cdn.trustwallet.com".to_string(),
        }
    }

    pub fn is_native(&self, symbol: &str) -> bool {
        symbol == self.native_symbol
    }

    /// Native asset form for the native symbol, token form otherwise
    pub fn resolve_asset_id(&self, symbol: &str) -> AssetId {
        resolve_asset_id(symbol, &self.native_symbol, self.coin_id)
    }

    pub fn token_type_for(&self, symbol: &str) -> TokenType {
        if self.is_native(symbol) {
            TokenType::Coin
        } else {
            self.token_type
        }
    }

    pub fn native_logo_uri(&self) -> String {
        format!(
            "{}/blockchains/{}/info/logo.png",
            self.assets_app_url.trim_end_matches('/'),
            self.handle
        )
    }

    pub fn token_logo_uri(&self, id: &str) -> String {
        format!(
            "{}/blockchains/{}/assets/{}/logo.png",
            self.assets_app_url.trim_end_matches('/'),
            self.handle,
            id
        )
    }

    pub fn logo_uri_for(&self, symbol: &str) -> String {
        if self.is_native(symbol) {
            self.native_logo_uri()
        } else {
            self.token_logo_uri(symbol)
        }
    }

    pub fn explorer_asset_url(&self, id: &str) -> String {
        format!("{}/asset/{}", self.explorer_url.trim_end_matches('/'), id)
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::binance()
    }
}

fn deserialize_token_type<'de, D>(deserializer: D) -> Result<TokenType, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    TokenType::parse(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown token type: {}", raw)))
}
