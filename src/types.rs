//! Core types used throughout the token list pipeline
//!
//! Raw records as returned by the upstream APIs, and the token list
//! document written to the assets repository.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token metadata as reported by the DEX `/api/v1/tokens` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAsset {
    /// Chain-unique symbol, e.g. "BUSD-BD1"
    pub symbol: String,
    /// Human-facing symbol, e.g. "BUSD"
    #[serde(default)]
    pub original_symbol: String,
    #[serde(default)]
    pub name: String,
}

/// Live trading pair as reported by the DEX `/api/v1/markets` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMarketPair {
    #[serde(rename = "base_asset_symbol")]
    pub base: String,
    #[serde(rename = "quote_asset_symbol")]
    pub quote: String,
    pub lot_size: Decimal,
    pub tick_size: Decimal,
}

/// Asset descriptor from the explorer `/api/v1/assets` endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bep2Asset {
    pub asset: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mapped_asset: String,
    #[serde(default)]
    pub asset_img: String,
    #[serde(default)]
    pub decimals: u32,
}

/// Paged response wrapper of the explorer assets endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bep2AssetPage {
    #[serde(default)]
    pub total_num: u64,
    #[serde(default)]
    pub asset_info_list: Vec<Bep2Asset>,
}

/// Chain-scoped asset identifier
///
/// Rendered as `c{coin}` for the native asset and `c{coin}_t{symbol}` for
/// hosted tokens. Ordering follows the rendered form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn native(coin_id: u32) -> Self {
        AssetId(format!("c{}", coin_id))
    }

    pub fn token(coin_id: u32, symbol: &str) -> Self {
        AssetId(format!("c{}_t{}", coin_id, symbol))
    }

    /// Build from coin type and symbol; an empty symbol means the native asset
    pub fn build(coin_id: u32, symbol: &str) -> Self {
        if symbol.is_empty() {
            Self::native(coin_id)
        } else {
            Self::token(coin_id, symbol)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token standard tag as written in `type` fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    #[serde(rename = "coin")]
    Coin,
    BEP2,
    BEP20,
    ERC20,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Coin => "coin",
            TokenType::BEP2 => "BEP2",
            TokenType::BEP20 => "BEP20",
            TokenType::ERC20 => "ERC20",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "COIN" => Some(TokenType::Coin),
            "BEP2" => Some(TokenType::BEP2),
            "BEP20" => Some(TokenType::BEP20),
            "ERC20" => Some(TokenType::ERC20),
            _ => None,
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound trading pair of a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub base: AssetId,
    /// Lot size in minor units
    pub lot_size: String,
    /// Tick size in minor units
    pub tick_size: String,
}

/// Token list entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub asset: AssetId,
    #[serde(rename = "type")]
    pub kind: TokenType,
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
    #[serde(rename = "logoURI")]
    pub logo_uri: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pairs: Vec<Pair>,
}

/// Older documents carry `"pairs": null` for tokens that only appear as a base
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Pair>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Pair>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u64,
}

/// Persisted token list (`tokenlist.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenListDocument {
    pub name: String,
    #[serde(rename = "logoURI")]
    pub logo_uri: String,
    pub timestamp: String,
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub version: Version,
}

/// Per-asset `info.json` record in the assets repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub symbol: String,
    pub decimals: u32,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub explorer: String,
    #[serde(default)]
    pub status: String,
    pub id: String,
}

impl AssetInfo {
    pub const ACTIVE_STATUS: &'static str = "active";

    pub fn is_active(&self) -> bool {
        self.status == Self::ACTIVE_STATUS
    }
}
