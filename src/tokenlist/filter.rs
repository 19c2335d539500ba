//! Pair eligibility and asset id resolution

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::config::ChainConfig;
use crate::types::AssetId;

/// Answers whether a persisted, active record exists for a symbol
///
/// Lookup failures are reported as `false`.
pub trait AssetExistenceOracle {
    fn exists_and_active(&self, symbol: &str) -> bool;
}

impl<T: AssetExistenceOracle + ?Sized> AssetExistenceOracle for &T {
    fn exists_and_active(&self, symbol: &str) -> bool {
        (**self).exists_and_active(symbol)
    }
}

/// In-memory oracle over a fixed set of active symbols
#[derive(Debug, Clone, Default)]
pub struct StaticAssetOracle {
    active: HashSet<String>,
}

impl StaticAssetOracle {
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            active: symbols.into_iter().map(Into::into).collect(),
        }
    }
}

impl AssetExistenceOracle for StaticAssetOracle {
    fn exists_and_active(&self, symbol: &str) -> bool {
        self.active.contains(symbol)
    }
}

/// Build the asset id for a raw symbol
pub fn resolve_asset_id(symbol: &str, native_symbol: &str, coin_id: u32) -> AssetId {
    if symbol == native_symbol {
        AssetId::build(coin_id, "")
    } else {
        AssetId::build(coin_id, symbol)
    }
}

/// Decides whether a pair leg may appear in the token list
pub struct PairFilter<'a, O: AssetExistenceOracle> {
    oracle: O,
    chain: &'a ChainConfig,
    memo: RefCell<HashMap<String, bool>>,
}

impl<'a, O: AssetExistenceOracle> PairFilter<'a, O> {
    pub fn new(oracle: O, chain: &'a ChainConfig) -> Self {
        Self {
            oracle,
            chain,
            memo: RefCell::new(HashMap::new()),
        }
    }

    pub fn chain(&self) -> &ChainConfig {
        self.chain
    }

    /// Native symbol is always eligible; anything else asks the oracle once per run
    pub fn is_eligible(&self, symbol: &str) -> bool {
        if self.chain.is_native(symbol) {
            return true;
        }

        if let Some(known) = self.memo.borrow().get(symbol) {
            return *known;
        }

        let eligible = self.oracle.exists_and_active(symbol);
        self.memo.borrow_mut().insert(symbol.to_string(), eligible);
        eligible
    }

    pub fn pair_is_eligible(&self, base: &str, quote: &str) -> bool {
        self.is_eligible(base) && self.is_eligible(quote)
    }

    /// Number of distinct non-native symbols looked up so far
    pub fn lookups(&self) -> usize {
        self.memo.borrow().len()
    }
}
