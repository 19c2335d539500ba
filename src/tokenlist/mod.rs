//! Token list synthesis
//!
//! Raw pairs + raw tokens -> pair filter + asset id resolver -> aggregator
//! -> sorter -> merge engine.

mod aggregator;
mod filter;
mod merge;
mod sorter;

pub use aggregator::{aggregate, build_pair, check_plausibility, NameRenames, MIN_PLAUSIBLE_ENTRIES};
pub use filter::{resolve_asset_id, AssetExistenceOracle, PairFilter, StaticAssetOracle};
pub use merge::{
    CorruptPolicy, DocumentHeader, MergeDecision, MergeEngine, PreviousDocument, SkipReason,
};
pub use sorter::{count_total_pairs, sort_tokens};

use crate::config::ChainConfig;
use crate::error::Result;
use crate::types::{RawAsset, RawMarketPair, Token};

/// Plausibility check, aggregation and ordering in one call
pub fn synthesize<O: AssetExistenceOracle>(
    market_pairs: &[RawMarketPair],
    raw_tokens: &[RawAsset],
    oracle: O,
    chain: &ChainConfig,
    renames: &NameRenames,
) -> Result<Vec<Token>> {
    check_plausibility(market_pairs, raw_tokens)?;

    let filter = PairFilter::new(oracle, chain);
    let mut tokens = aggregate(market_pairs, raw_tokens, &filter, renames);
    sort_tokens(&mut tokens);

    Ok(tokens)
}
