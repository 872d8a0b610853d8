use chrono::Utc;
use clap::{Parser, Subcommand};
use launch_auditor::feeds::{FixtureTransport, HttpTransport, RelayRoute};
use launch_auditor::{
    audit, Asset, AuditEngine, FeedAggregator, FeedConfig, FeedTransport, MintSnapshot, PollUpdate,
    Poller, Result,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Live launch tracker - aggregates new tokens and scores their metadata
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON config file; flags below override it
    #[arg(long, global = true, env = "LAUNCH_AUDITOR_CONFIG")]
    config: Option<PathBuf>,

    /// Chain id used to filter profile records
    #[arg(long, global = true, env = "LAUNCH_AUDITOR_CHAIN")]
    chain: Option<String>,

    /// Relay routes for the launch feed, in preference order
    #[arg(long, global = true, env = "LAUNCH_AUDITOR_ROUTES", value_delimiter = ',')]
    routes: Option<Vec<RelayRoute>>,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true, env = "LAUNCH_AUDITOR_TIMEOUT_MS")]
    timeout_ms: Option<u64>,

    /// Delay between polls in milliseconds
    #[arg(long, global = true, env = "LAUNCH_AUDITOR_POLL_INTERVAL_MS")]
    poll_interval_ms: Option<u64>,

    /// Maximum assets kept per pass
    #[arg(long, global = true, env = "LAUNCH_AUDITOR_MAX_ASSETS")]
    max_assets: Option<usize>,

    /// Replay the launch feed from a JSON file instead of the network
    #[arg(long, global = true)]
    launch_fixture: Option<PathBuf>,

    /// Replay the profile feed from a JSON file instead of the network
    #[arg(long, global = true)]
    profile_fixture: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the feeds and print the live table
    Watch {
        /// Run a single pass and exit
        #[arg(long)]
        once: bool,
    },
    /// Look up one mint and print its audit report
    Scan {
        #[arg(value_name = "MINT")]
        mint: String,
    },
}

type CliResult = std::result::Result<ExitCode, Box<dyn std::error::Error>>;

/// Exit code when no feed produced any data
const EXIT_UNAVAILABLE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    let default_filter = if cli.verbose {
        "launch_auditor=debug"
    } else {
        "launch_auditor=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult {
    let mut config = load_config(&cli)?;
    let transport = build_transport(&cli, &mut config)?;
    config.validate()?;

    let aggregator = Arc::new(FeedAggregator::from_config(&config, transport));

    match cli.command {
        Command::Watch { once } => watch(aggregator, &config, once).await,
        Command::Scan { mint } => scan(&aggregator, &mint).await,
    }
}

fn load_config(cli: &Cli) -> Result<FeedConfig> {
    let mut config = match &cli.config {
        Some(path) => FeedConfig::from_file(path)?,
        None => FeedConfig::default(),
    };

    if let Some(chain) = &cli.chain {
        config.chain = chain.clone();
    }
    if let Some(routes) = &cli.routes {
        config.relay_routes = routes.clone();
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.request_timeout_ms = timeout_ms;
    }
    if let Some(poll_interval_ms) = cli.poll_interval_ms {
        config.poll_interval_ms = poll_interval_ms;
    }
    if let Some(max_assets) = cli.max_assets {
        config.max_assets = max_assets;
    }

    Ok(config)
}

/// Network transport, or a replay of fixture files when any are given
fn build_transport(cli: &Cli, config: &mut FeedConfig) -> Result<Arc<dyn FeedTransport>> {
    if cli.launch_fixture.is_none() && cli.profile_fixture.is_none() {
        return Ok(Arc::new(HttpTransport::new()?));
    }

    // Fixtures answer the raw feed URLs only
    config.relay_routes = vec![RelayRoute::Direct];

    let mut transport = FixtureTransport::new();
    if let Some(path) = &cli.launch_fixture {
        transport = transport.respond_from_file(config.launch_feed_url.clone(), path)?;
    }
    if let Some(path) = &cli.profile_fixture {
        transport = transport.respond_from_file(config.profile_feed_url.clone(), path)?;
    }

    Ok(Arc::new(transport))
}

async fn watch(
    aggregator: Arc<FeedAggregator>,
    config: &FeedConfig,
    once: bool,
) -> CliResult {
    let engine = AuditEngine::new();
    let mut poller = Poller::new(aggregator, config.poll_interval());

    println!("\n📡 Launch Auditor - chain: {}", config.chain);
    println!("================================\n");

    if once {
        let update = poller.poll_once().await;
        let code = once_exit_code(&update);
        let mut last = Vec::new();
        render_update(&engine, update, &mut last);
        return Ok(ExitCode::from(code));
    }

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let mut last = Vec::new();
    poller
        .run(cancel, |update| render_update(&engine, update, &mut last))
        .await;

    Ok(ExitCode::SUCCESS)
}

/// Exit status of a single `watch --once` pass
fn once_exit_code(update: &PollUpdate) -> u8 {
    match update {
        PollUpdate::Unavailable => EXIT_UNAVAILABLE,
        PollUpdate::Synced(_) | PollUpdate::SyncFailed => 0,
    }
}

async fn scan(
    aggregator: &FeedAggregator,
    mint: &str,
) -> CliResult {
    println!("\n🔍 Scanning {}\n", mint);

    let Some(asset) = aggregator.find(&MintSnapshot::new(), mint).await else {
        println!("❌ Asset not found in the current launch window");
        return Ok(ExitCode::FAILURE);
    };

    let report = audit(&asset)?;

    println!("🎯 {} ({})", asset.name, asset.symbol);
    println!("   • Market cap: {}", format_market_cap(asset.market_cap));
    println!("   • Age: {}", format_age(&asset));
    println!("   • Image: {}", asset.display_image());
    println!("   • Source: {:?}", asset.source);
    for (label, link) in [
        ("Twitter", &asset.twitter),
        ("Website", &asset.website),
        ("Telegram", &asset.telegram),
    ] {
        if let Some(link) = link.as_deref().filter(|l| !l.is_empty()) {
            println!("   • {}: {}", label, link);
        }
    }
    println!();
    println!("{}", report);

    Ok(ExitCode::SUCCESS)
}

fn render_update(engine: &AuditEngine, update: PollUpdate, last: &mut Vec<Asset>) {
    match update {
        PollUpdate::Synced(assets) => {
            *last = assets;
            render_table(engine, last);
        }
        PollUpdate::SyncFailed => {
            println!("⚠️  Sync failed, showing {} cached assets", last.len());
        }
        PollUpdate::Unavailable => {
            println!("❌ No launch data available from any feed");
        }
    }
}

fn render_table(engine: &AuditEngine, assets: &[Asset]) {
    println!(
        "{:<3} {:<10} {:<24} {:>10} {:>6}  {:<24} {:>5}",
        "", "SYMBOL", "NAME", "MCAP", "AGE", "STATUS", "RISK"
    );

    for (asset, report) in engine.audit_all(assets) {
        let flags = match (asset.is_flash, asset.is_new) {
            (true, _) => "⚡",
            (false, true) => "🆕",
            _ => "",
        };

        match report {
            Ok(report) => println!(
                "{:<3} {:<10} {:<24} {:>10} {:>6}  {} {:<21} {:>5.1}",
                flags,
                truncate(&asset.symbol, 10),
                truncate(&asset.name, 24),
                format_market_cap(asset.market_cap),
                format_age(asset),
                report.status.emoji(),
                report.status_label,
                report.risk_score
            ),
            Err(e) => tracing::warn!("Skipping {}: {}", asset.mint, e),
        }
    }

    println!("\n{} assets • updated {}\n", assets.len(), Utc::now().format("%H:%M:%S"));
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut short: String = value.chars().take(width.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}

fn format_market_cap(market_cap: f64) -> String {
    if market_cap <= 0.0 {
        "--".to_string()
    } else if market_cap >= 1_000_000.0 {
        format!("${:.2}M", market_cap / 1_000_000.0)
    } else if market_cap >= 1_000.0 {
        format!("${:.1}K", market_cap / 1_000.0)
    } else {
        format!("${:.0}", market_cap)
    }
}

fn format_age(asset: &Asset) -> String {
    let secs = asset.age(Utc::now()).num_seconds().max(0);
    match secs {
        0..=59 => format!("{}s", secs),
        60..=3_599 => format!("{}m", secs / 60),
        3_600..=86_399 => format!("{}h", secs / 3_600),
        _ => format!("{}d", secs / 86_400),
    }
}
