// In app/src/main.rs

use anyhow::Result;
use api_client::YahooClient;
use app_config::Settings;
use clap::{Args, Parser, Subcommand};
use core_types::{EvaluationMode, IndicatorKind, Symbol};
use indicators::IndicatorEngine;
use tracing_subscriber::prelude::*;

mod runner;
mod sink;

use crate::runner::{RunRequest, run};
use crate::sink::sink_for;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Evaluates a technical indicator over a symbol's price history and emits BUY/SELL alerts."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Prints one alert for every bar with a BUY or SELL suggestion.
    Backtest {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Prints an alert only when the indicator crosses into a zone.
    Alert {
        #[command(flatten)]
        run: RunArgs,

        /// Deliver only the most recent alert.
        #[arg(long)]
        latest_only: bool,
    },
}

/// Overrides for the values in `config/`.
#[derive(Args, Debug, Clone, Default)]
struct RunArgs {
    /// The symbol to evaluate (e.g., "TATAMOTORS.NS").
    #[arg(short, long)]
    symbol: Option<String>,

    /// The indicator to run: RSI, MACD, STOCH, SMA or EMA.
    #[arg(short = 'n', long)]
    indicator: Option<IndicatorKind>,

    /// How much history to fetch (e.g., "6mo", "2y").
    #[arg(short, long)]
    period: Option<String>,

    /// The bar interval (e.g., "1d", "1h").
    #[arg(short, long)]
    interval: Option<String>,
}

impl RunArgs {
    fn into_request(self, settings: &Settings, mode: EvaluationMode, latest_only: bool) -> RunRequest {
        let market = &settings.market_data;
        let kind = self.indicator.unwrap_or(settings.indicators.indicator);
        RunRequest {
            symbol: Symbol(self.symbol.unwrap_or_else(|| market.symbol.clone())),
            period: self.period.unwrap_or_else(|| market.period.clone()),
            interval: self.interval.unwrap_or_else(|| market.interval.clone()),
            params: settings.indicators.params_for(kind),
            mode,
            latest_only,
        }
    }
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings()?;

    // Alerts own stdout; logs go to stderr.
    let level = settings
        .app
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            tracing_subscriber::filter::Targets::new()
                .with_target("reqwest", tracing::Level::WARN)
                .with_target("hyper_util", tracing::Level::WARN)
                .with_default(level),
        );
    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::info!(environment = %settings.app.environment, "Starting signal run");

    let (request, push_mode) = match cli.command {
        Commands::Backtest { run } => (
            run.into_request(&settings, EvaluationMode::Dense, settings.alerts.latest_only),
            settings.alerts.push_mode,
        ),
        Commands::Alert { run, latest_only } => (
            run.into_request(
                &settings,
                EvaluationMode::EdgeTriggered,
                latest_only || settings.alerts.latest_only,
            ),
            settings.alerts.push_mode,
        ),
    };

    let client = YahooClient::new(&settings.market_data)?;
    let engine = IndicatorEngine::new(settings.signals);
    let mut sink = sink_for(push_mode);

    let summary = run(&client, &engine, &request, sink.as_mut()).await?;

    tracing::info!(
        bars = summary.bars,
        alerts = summary.alerts,
        delivered = summary.delivered,
        "Signal run finished."
    );

    Ok(())
}
