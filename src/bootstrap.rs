//! Asset bootstrap
//!
//! Creates the logo and a minimal `info.json` for explorer assets that are
//! not yet in the repository, so they can pass the pair filter.

use tracing::{debug, info, warn};

use crate::clients::LogoFetcher;
use crate::config::ChainConfig;
use crate::error::Result;
use crate::persistence::AssetRepository;
use crate::types::{AssetInfo, Bep2Asset};

/// Minimal record written for a newly discovered asset
pub fn new_asset_info(chain: &ChainConfig, asset: &Bep2Asset) -> AssetInfo {
    AssetInfo {
        name: asset.name.clone(),
        kind: chain.token_type.to_string(),
        symbol: asset.mapped_asset.clone(),
        decimals: asset.decimals,
        website: String::new(),
        description: "-".to_string(),
        explorer: chain.explorer_asset_url(&asset.asset),
        status: AssetInfo::ACTIVE_STATUS.to_string(),
        id: asset.asset.clone(),
    }
}

fn is_bootstrappable(asset: &Bep2Asset) -> bool {
    !asset.asset_img.is_empty() && asset.decimals != 0
}

/// Returns the ids of the assets that were created
pub async fn fetch_missing_assets(
    chain: &ChainConfig,
    assets: &[Bep2Asset],
    repo: &AssetRepository,
    logos: &dyn LogoFetcher,
) -> Result<Vec<String>> {
    let mut created = Vec::new();

    for asset in assets {
        if !is_bootstrappable(asset) {
            continue;
        }

        if repo.asset_exists(&asset.asset) {
            continue;
        }

        if repo.logo_exists(&asset.asset) {
            warn!(asset = %asset.asset, "Asset has a logo but no info.json, recreating");
        }

        debug!(asset = %asset.asset, url = %asset.asset_img, "Downloading logo");
        let bytes = logos.fetch_logo(&asset.asset_img).await?;
        // info.json last; the oracle keys on it
        repo.write_logo(&asset.asset, &bytes)?;
        repo.write_asset_info(&new_asset_info(chain, asset))?;

        info!(asset = %asset.asset, "Added new asset");
        created.push(asset.asset.clone());
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpdateError;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingFetcher {
        urls: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl LogoFetcher for RecordingFetcher {
        async fn fetch_logo(&self, url: &str) -> Result<Vec<u8>> {
            if self.fail {
                return Err(UpdateError::fetch("logo", "status 404"));
            }
            self.urls.lock().unwrap().push(url.to_string());
            Ok(b"png".to_vec())
        }
    }

    fn temp_root(test_name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "tokenlist_bootstrap_{}_{}",
            test_name,
            uuid::Uuid::new_v4()
        ))
    }

    fn asset(id: &str, img: &str, decimals: u32) -> Bep2Asset {
        Bep2Asset {
            asset: id.to_string(),
            name: format!("{} Token", id),
            mapped_asset: id.split('-').next().unwrap_or(id).to_string(),
            asset_img: img.to_string(),
            decimals,
        }
    }

    #[test]
    fn info_record_is_active_bep2() {
        let chain = ChainConfig::binance();
        let info = new_asset_info(&chain, &asset("AWC-986", "https://img/awc.png", 8));

        assert_eq!(info.kind, "BEP2");
        assert_eq!(info.symbol, "AWC");
        assert_eq!(info.decimals, 8);
        assert_eq!(info.website, "");
        assert_eq!(info.description, "-");
        assert_eq!(info.explorer, "https://explorer.binance.org/asset/AWC-986");
        assert!(info.is_active());
        assert_eq!(info.id, "AWC-986");
    }

    #[tokio::test]
    async fn creates_only_eligible_missing_assets() {
        let chain = ChainConfig::binance();
        let root = temp_root("create");
        let repo = AssetRepository::new(&root, &chain.handle);
        repo.write_logo("OLD-001", b"existing").unwrap();
        repo.write_asset_info(&new_asset_info(&chain, &asset("OLD-001", "https://img/old.png", 8)))
            .unwrap();

        let assets = vec![
            asset("AWC-986", "https://img/awc.png", 8),
            asset("NOIMG-111", "", 8),
            asset("ZERO-222", "https://img/zero.png", 0),
            asset("OLD-001", "https://img/old.png", 8),
        ];
        let fetcher = RecordingFetcher::default();

        let created = fetch_missing_assets(&chain, &assets, &repo, &fetcher).await.unwrap();

        assert_eq!(created, vec!["AWC-986".to_string()]);
        assert_eq!(*fetcher.urls.lock().unwrap(), vec!["https://img/awc.png".to_string()]);
        assert!(repo.read_asset_info("AWC-986").unwrap().is_active());
        assert_eq!(
            std::fs::read(repo.asset_logo_path("OLD-001")).unwrap(),
            b"existing"
        );

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn second_run_is_a_no_op() {
        let chain = ChainConfig::binance();
        let root = temp_root("idempotent");
        let repo = AssetRepository::new(&root, &chain.handle);
        let assets = vec![asset("AWC-986", "https://img/awc.png", 8)];
        let fetcher = RecordingFetcher::default();

        fetch_missing_assets(&chain, &assets, &repo, &fetcher).await.unwrap();
        let created = fetch_missing_assets(&chain, &assets, &repo, &fetcher).await.unwrap();

        assert!(created.is_empty());
        assert_eq!(fetcher.urls.lock().unwrap().len(), 1);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn download_failure_aborts() {
        let chain = ChainConfig::binance();
        let root = temp_root("fail");
        let repo = AssetRepository::new(&root, &chain.handle);
        let fetcher = RecordingFetcher {
            fail: true,
            ..Default::default()
        };

        let result = fetch_missing_assets(
            &chain,
            &[asset("AWC-986", "https://img/awc.png", 8)],
            &repo,
            &fetcher,
        )
        .await;

        assert!(matches!(result, Err(UpdateError::Fetch { .. })));
        assert!(!repo.logo_exists("AWC-986"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn interrupted_asset_is_completed_on_next_run() {
        let chain = ChainConfig::binance();
        let root = temp_root("interrupted");
        let repo = AssetRepository::new(&root, &chain.handle);
        let assets = vec![asset("X-1", "https://img/x.png", 8)];
        let fetcher = RecordingFetcher::default();

        // a directory where info.json belongs makes the first run fail after the logo
        let blocker = repo.asset_info_path("X-1");
        std::fs::create_dir_all(&blocker).unwrap();
        assert!(fetch_missing_assets(&chain, &assets, &repo, &fetcher).await.is_err());
        std::fs::remove_dir_all(&blocker).unwrap();

        let created = fetch_missing_assets(&chain, &assets, &repo, &fetcher).await.unwrap();

        assert_eq!(created, vec!["X-1".to_string()]);
        assert!(repo.read_asset_info("X-1").unwrap().is_active());
        assert!(repo.asset_exists("X-1"));

        let _ = std::fs::remove_dir_all(&root);
    }
}
