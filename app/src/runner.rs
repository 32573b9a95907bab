// In app/src/runner.rs

use anyhow::Result;
use api_client::MarketDataSource;
use core_types::{EvaluationMode, IndicatorParams, Symbol};
use indicators::IndicatorEngine;
use signals::{AlertSink, deliver_all, deliver_latest, policy_for};
use tracing::info;

/// Everything one evaluation run needs to know.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub symbol: Symbol,
    pub period: String,
    pub interval: String,
    pub params: IndicatorParams,
    pub mode: EvaluationMode,
    pub latest_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub bars: usize,
    pub alerts: usize,
    pub delivered: usize,
}

/// Fetches prices, evaluates the indicator, and hands the alerts to the sink.
pub async fn run(
    source: &dyn MarketDataSource,
    engine: &IndicatorEngine,
    request: &RunRequest,
    sink: &mut dyn AlertSink,
) -> Result<RunSummary> {
    info!(
        source = source.name(),
        symbol = %request.symbol,
        period = %request.period,
        interval = %request.interval,
        "Fetching price history."
    );
    let series = source
        .fetch(&request.symbol, &request.period, &request.interval)
        .await?;

    let evaluation = engine.compute(&series, &request.params)?;

    let policy = policy_for(request.mode, *engine.config());
    let alerts = policy.alerts(&series, &evaluation);
    info!(
        indicator = %evaluation.kind,
        policy = policy.name(),
        bars = series.len(),
        alerts = alerts.len(),
        "Evaluation complete."
    );

    let delivered = if request.latest_only {
        deliver_latest(sink, &alerts)?
    } else {
        deliver_all(sink, &alerts)?
    };

    Ok(RunSummary {
        bars: series.len(),
        alerts: alerts.len(),
        delivered,
    })
}
