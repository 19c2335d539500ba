//! Token Aggregator - folds eligible market pairs into one token per symbol

use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

use super::filter::{AssetExistenceOracle, PairFilter};
use crate::amount::{format_minor_units, AmountError};
use crate::config::ChainConfig;
use crate::error::{Result, UpdateError};
use crate::types::{Pair, RawAsset, RawMarketPair, Token};

/// Upstream lists shorter than this are treated as a degraded response
pub const MIN_PLAUSIBLE_ENTRIES: usize = 5;

/// Reject the run when either upstream list looks truncated
pub fn check_plausibility(pairs: &[RawMarketPair], tokens: &[RawAsset]) -> Result<()> {
    if pairs.len() < MIN_PLAUSIBLE_ENTRIES {
        return Err(UpdateError::InsufficientMarkets { count: pairs.len() });
    }

    if tokens.len() < MIN_PLAUSIBLE_ENTRIES {
        return Err(UpdateError::InsufficientTokens {
            count: tokens.len(),
        });
    }

    Ok(())
}

/// Explicit `(symbol, legacy name) -> name` rewrites
#[derive(Debug, Clone, Default)]
pub struct NameRenames {
    entries: HashMap<(String, String), String>,
}

impl NameRenames {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rewrites applied to BNB Beacon Chain listings
    pub fn binance() -> Self {
        Self::empty().with("BNB", "Binance Chain Native Token", "BNB Beacon Chain")
    }

    pub fn with(
        mut self,
        symbol: impl Into<String>,
        legacy_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.entries
            .insert((symbol.into(), legacy_name.into()), name.into());
        self
    }

    pub fn rename<'a>(&'a self, symbol: &str, name: &'a str) -> &'a str {
        self.entries
            .get(&(symbol.to_string(), name.to_string()))
            .map(String::as_str)
            .unwrap_or(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Convert a raw market pair into the quote token's outbound pair
pub fn build_pair(raw: &RawMarketPair, chain: &ChainConfig) -> std::result::Result<Pair, AmountError> {
    Ok(Pair {
        base: chain.resolve_asset_id(&raw.base),
        lot_size: format_minor_units(raw.lot_size)?,
        tick_size: format_minor_units(raw.tick_size)?,
    })
}

fn build_token(asset: &RawAsset, pairs: Vec<Pair>, chain: &ChainConfig, renames: &NameRenames) -> Token {
    Token {
        asset: chain.resolve_asset_id(&asset.symbol),
        kind: chain.token_type_for(&asset.symbol),
        address: asset.symbol.clone(),
        name: renames.rename(&asset.symbol, &asset.name).to_string(),
        symbol: asset.original_symbol.clone(),
        decimals: chain.decimals,
        logo_uri: chain.logo_uri_for(&asset.symbol),
        pairs,
    }
}

/// Build one token per distinct symbol that appears on an eligible pair
///
/// Pairs are recorded under their quote symbol. The result is unsorted;
/// see [`super::sort_tokens`].
pub fn aggregate<O: AssetExistenceOracle>(
    market_pairs: &[RawMarketPair],
    raw_tokens: &[RawAsset],
    filter: &PairFilter<'_, O>,
    renames: &NameRenames,
) -> Vec<Token> {
    let chain = filter.chain();

    let tokens_by_symbol: HashMap<&str, &RawAsset> = raw_tokens
        .iter()
        .map(|token| (token.symbol.as_str(), token))
        .collect();

    let mut pairs_by_quote: HashMap<&str, Vec<Pair>> = HashMap::new();
    let mut symbols: BTreeSet<&str> = BTreeSet::new();

    for market_pair in market_pairs {
        if !filter.pair_is_eligible(&market_pair.base, &market_pair.quote) {
            continue;
        }

        let pair = match build_pair(market_pair, chain) {
            Ok(pair) => pair,
            Err(e) => {
                warn!(
                    base = %market_pair.base,
                    quote = %market_pair.quote,
                    error = %e,
                    "Skipping market pair with unrepresentable lot/tick size"
                );
                continue;
            }
        };

        pairs_by_quote
            .entry(market_pair.quote.as_str())
            .or_default()
            .push(pair);

        symbols.insert(market_pair.base.as_str());
        symbols.insert(market_pair.quote.as_str());
    }

    let mut tokens = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        let Some(asset) = tokens_by_symbol.get(symbol) else {
            warn!(symbol = %symbol, "No token metadata for paired symbol, skipping");
            continue;
        };

        let pairs = pairs_by_quote.remove(symbol).unwrap_or_default();
        tokens.push(build_token(asset, pairs, chain, renames));
    }

    debug!(
        market_pairs = market_pairs.len(),
        lookups = filter.lookups(),
        tokens = tokens.len(),
        "Aggregated token list"
    );

    tokens
}
