use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tokenlist_sync::clients::{DexClient, ExplorerClient, HttpLogoFetcher};
use tokenlist_sync::config::AppConfig;
use tokenlist_sync::persistence::AssetRepository;
use tokenlist_sync::tokenlist::{MergeEngine, NameRenames};
use tokenlist_sync::updater::{FetchLimits, TokenListUpdater, UpdateOutcome};

#[derive(Parser)]
#[command(name = "tokenlist-sync")]
#[command(about = "Regenerate the BEP2 token list from Binance DEX markets")]
struct Cli {
    /// Extra configuration file layered over config/default and config/local
    #[arg(long)]
    config: Option<PathBuf>,

    /// Assets repository root (overrides repository.root)
    #[arg(long)]
    repo: Option<PathBuf>,

    /// Compute the list and report, without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Emit JSON log lines
    #[arg(long)]
    json_logs: bool,
}

fn init_logging(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tokenlist_sync=info"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_with(cli.config.as_deref())?;
    if let Some(root) = cli.repo {
        config.repository.root = root;
    }

    init_logging(cli.json_logs || config.logging.json);
    info!(config = %config, dry_run = cli.dry_run, "Starting token list update");

    let timeout = config.clients.timeout_secs;
    let dex = DexClient::new(&config.clients.dex_url, timeout)?;
    let explorer = ExplorerClient::new(&config.clients.explorer_url, timeout)?;
    let logos = HttpLogoFetcher::new(timeout)?;

    let repo = AssetRepository::new(&config.repository.root, &config.chain.handle);
    let merge = MergeEngine::new(
        config.document_header(),
        config.tokenlist.time_format.as_str(),
        config.corrupt_policy(),
    )?;
    let renames = NameRenames::binance();

    let updater = TokenListUpdater {
        chain: &config.chain,
        markets: &dex,
        catalog: &explorer,
        logos: &logos,
        repo: &repo,
        merge: &merge,
        renames: &renames,
        limits: FetchLimits::from(&config.tokenlist),
        dry_run: cli.dry_run,
    };

    let report = updater.run().await.context("Token list update failed")?;

    match report.outcome {
        UpdateOutcome::Published { version } => {
            info!(version, tokens = report.tokens, pairs = report.pairs, "✅ Published");
        }
        UpdateOutcome::WouldPublish { version } => {
            info!(version, tokens = report.tokens, pairs = report.pairs, "Dry run complete");
        }
        UpdateOutcome::Skipped(reason) => {
            info!(reason = %reason, "No changes published");
        }
    }

    Ok(())
}
