mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::AppConfig;
use goldpulse_api::state::AppState;
use goldpulse_core::{MarketDataFeed, MarketState, Timeframe};
use goldpulse_data::BinanceFeed;
use goldpulse_engine::Analyzer;
use goldpulse_signals::{heuristic_signal, AiSignalProvider, SignalEngine};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "goldpulse")]
#[command(about = "Streaming technical-analysis dashboard backend for a commodity instrument")]
#[command(version)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API key for the AI signal provider
    #[arg(long, env = "OPENAI_API_KEY")]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline: history load, live stream, signal cycle, API
    Run {
        /// Bind address (overrides the config file)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Fetch history once and print the snapshot plus a heuristic signal
    Snapshot {
        /// Timeframe to analyze
        #[arg(short, long, default_value = "1h")]
        timeframe: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt().with_env_filter(filter).with_target(false).init();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.api_key.is_some() {
        config.ai.api_key = cli.api_key;
    }

    match cli.command {
        Commands::Run { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            run_pipeline(config).await
        }
        Commands::Snapshot { timeframe } => {
            let timeframe: Timeframe = serde_json::from_value(serde_json::json!(timeframe))
                .context("unknown timeframe (expected 1m, 5m, 15m, or 1h)")?;
            print_snapshot(config, timeframe).await
        }
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

async fn run_pipeline(config: AppConfig) -> Result<()> {
    anyhow::ensure!(!config.timeframes.is_empty(), "no timeframes configured");

    let feed = Arc::new(BinanceFeed::new(config.feed.clone()));
    let engine = Arc::new(build_signal_engine(&config));
    let state = Arc::new(AppState::new());

    for (index, &timeframe) in config.timeframes.iter().enumerate() {
        let feed = Arc::clone(&feed);
        let engine = Arc::clone(&engine);
        let state = Arc::clone(&state);
        let config = config.clone();
        // The first timeframe owns the dashboard snapshot and chart series
        let primary = index == 0;
        tokio::spawn(async move {
            if let Err(err) = run_timeframe(feed, engine, state, config, timeframe, primary).await {
                error!(%timeframe, %err, "timeframe pipeline stopped");
            }
        });
    }

    goldpulse_api::start_server(state, &config.bind).await
}

fn build_signal_engine(config: &AppConfig) -> SignalEngine {
    if config.ai.api_key.is_some() {
        info!(model = config.ai.model.as_str(), "AI signal provider enabled");
        SignalEngine::new(Some(Box::new(AiSignalProvider::new(config.ai.clone()))))
    } else {
        info!("no AI credentials, running heuristic signals only");
        SignalEngine::heuristic_only()
    }
}

/// Event loop for one timeframe: load history, then fold live candles and
/// fire the signal cycle on its own interval.
///
/// Tick handling is synchronous and never blocked by signal generation; the
/// only await points sit between events, so every snapshot observes one
/// consistent series state.
async fn run_timeframe(
    feed: Arc<BinanceFeed>,
    engine: Arc<SignalEngine>,
    state: Arc<AppState>,
    config: AppConfig,
    timeframe: Timeframe,
    primary: bool,
) -> Result<()> {
    let mut analyzer = Analyzer::new(timeframe, config.capacity);
    let offset = config.calibration_offset;

    let history = feed.fetch_history(timeframe, config.history_limit).await?;
    let mut latest: Option<MarketState> = analyzer.load_history(history);
    if primary {
        publish_dashboard(&state, &analyzer, &latest, offset).await;
    }

    let mut candles = feed.subscribe(timeframe).await?;
    let mut interval = tokio::time::interval(Duration::from_secs(config.signal_interval_secs));

    loop {
        tokio::select! {
            candle = candles.recv() => {
                let Some(candle) = candle else {
                    anyhow::bail!("candle stream ended");
                };
                latest = Some(analyzer.on_candle(candle));
                if primary {
                    publish_dashboard(&state, &analyzer, &latest, offset).await;
                }
            }
            _ = interval.tick() => {
                if let Some(snapshot) = &latest {
                    let calibrated = snapshot.calibrated(offset);
                    let engine = Arc::clone(&engine);
                    let state = Arc::clone(&state);
                    // Runs detached so a slow AI call never holds up ticks;
                    // overlapping cycles race and the last to resolve wins
                    tokio::spawn(async move {
                        let signal = engine.generate(&calibrated, timeframe).await;
                        info!(
                            %timeframe,
                            action = ?signal.action,
                            confidence = signal.confidence,
                            "signal"
                        );
                        state.publish_signal(signal).await;
                    });
                }
            }
        }
    }
}

async fn publish_dashboard(
    state: &AppState,
    analyzer: &Analyzer,
    latest: &Option<MarketState>,
    offset: rust_decimal::Decimal,
) {
    if let Some(snapshot) = latest {
        state.publish_snapshot(snapshot.calibrated(offset)).await;
        state
            .publish_chart(analyzer.series().candles(), analyzer.ichimoku_projection())
            .await;
    }
}

// ---------------------------------------------------------------------------
// Snapshot (one-shot)
// ---------------------------------------------------------------------------

async fn print_snapshot(config: AppConfig, timeframe: Timeframe) -> Result<()> {
    let feed = BinanceFeed::new(config.feed.clone());
    let mut analyzer = Analyzer::new(timeframe, config.capacity);

    let history = feed.fetch_history(timeframe, config.history_limit).await?;
    let snapshot = analyzer
        .load_history(history)
        .context("feed returned no candles")?
        .calibrated(config.calibration_offset);
    let signal = heuristic_signal(&snapshot, timeframe);

    let out = serde_json::json!({
        "timeframe": timeframe,
        "snapshot": snapshot,
        "signal": signal,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
