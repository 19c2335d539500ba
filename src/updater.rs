//! Token list update run
//!
//! fetch -> plausibility -> bootstrap missing assets -> synthesize -> reconcile -> write

use chrono::Utc;
use tracing::{error, info, warn};

use crate::bootstrap::fetch_missing_assets;
use crate::clients::{AssetCatalog, LogoFetcher, MarketSource};
use crate::config::{ChainConfig, TokenListConfig};
use crate::error::Result;
use crate::persistence::{AssetRepository, FsAssetOracle};
use crate::tokenlist::{
    check_plausibility, count_total_pairs, synthesize, MergeDecision, MergeEngine, NameRenames, PreviousDocument,
    SkipReason,
};

/// Fetch sizes for the upstream endpoints
#[derive(Debug, Clone, Copy)]
pub struct FetchLimits {
    pub market_pairs: usize,
    pub tokens: usize,
    pub assets_page: usize,
    pub assets_rows: usize,
}

impl From<&TokenListConfig> for FetchLimits {
    fn from(config: &TokenListConfig) -> Self {
        Self {
            market_pairs: config.market_pairs_limit,
            tokens: config.tokens_limit,
            assets_page: config.assets_page,
            assets_rows: config.assets_rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Published { version: u64 },
    Skipped(SkipReason),
    /// Dry run that would have published this version
    WouldPublish { version: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    pub outcome: UpdateOutcome,
    pub tokens: usize,
    pub pairs: usize,
    pub new_assets: Vec<String>,
}

pub struct TokenListUpdater<'a> {
    pub chain: &'a ChainConfig,
    pub markets: &'a dyn MarketSource,
    pub catalog: &'a dyn AssetCatalog,
    pub logos: &'a dyn LogoFetcher,
    pub repo: &'a AssetRepository,
    pub merge: &'a MergeEngine,
    pub renames: &'a NameRenames,
    pub limits: FetchLimits,
    pub dry_run: bool,
}

impl TokenListUpdater<'_> {
    pub async fn run(&self) -> Result<UpdateReport> {
        let assets = self
            .catalog
            .fetch_bep2_assets(self.limits.assets_page, self.limits.assets_rows)
            .await?;
        let market_pairs = self
            .markets
            .fetch_market_pairs(self.limits.market_pairs)
            .await?;
        let raw_tokens = self.markets.fetch_tokens(self.limits.tokens).await?;

        check_plausibility(&market_pairs, &raw_tokens)?;

        let new_assets = if self.dry_run {
            Vec::new()
        } else {
            fetch_missing_assets(self.chain, &assets, self.repo, self.logos).await?
        };

        let tokens = synthesize(
            &market_pairs,
            &raw_tokens,
            FsAssetOracle::new(self.repo),
            self.chain,
            self.renames,
        )?;

        let token_count = tokens.len();
        let pair_count = count_total_pairs(&tokens);

        let previous = self.repo.read_token_list();
        let decision = self.merge.reconcile(tokens, &previous, Utc::now());

        let outcome = match decision {
            MergeDecision::Publish(doc) if self.dry_run => {
                info!(
                    tokens = token_count,
                    pairs = pair_count,
                    version = doc.version.major,
                    "Dry run: token list would be written"
                );
                UpdateOutcome::WouldPublish {
                    version: doc.version.major,
                }
            }
            MergeDecision::Publish(doc) => {
                if let PreviousDocument::Corrupt(detail) = &previous {
                    warn!(error = %detail, "Replacing unreadable token list with version 1");
                }
                self.repo.write_token_list(&doc)?;
                info!(
                    tokens = token_count,
                    pairs = pair_count,
                    version = doc.version.major,
                    path = %self.repo.token_list_path().display(),
                    "Token list written"
                );
                UpdateOutcome::Published {
                    version: doc.version.major,
                }
            }
            MergeDecision::Skip(SkipReason::CorruptPrevious) => {
                let detail = match &previous {
                    PreviousDocument::Corrupt(detail) => detail.as_str(),
                    _ => "",
                };
                error!(
                    path = %self.repo.token_list_path().display(),
                    error = %detail,
                    "Previous token list unreadable, leaving it untouched"
                );
                UpdateOutcome::Skipped(SkipReason::CorruptPrevious)
            }
            MergeDecision::Skip(reason) => {
                info!(reason = %reason, tokens = token_count, "Token list not written");
                UpdateOutcome::Skipped(reason)
            }
        };

        Ok(UpdateReport {
            outcome,
            tokens: token_count,
            pairs: pair_count,
            new_assets,
        })
    }
}
