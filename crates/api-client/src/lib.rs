// In crates/api-client/src/lib.rs

use std::time::Duration;

use app_config::types::MarketDataSettings;
use async_trait::async_trait;
use chrono::DateTime;
use core_types::{PricePoint, PriceSeries, Symbol};
use tracing::{debug, info};

pub mod error;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use types::*;

/// The universal interface for a source of historical prices.
///
/// A source turns a symbol, a lookback period (e.g. "2y") and a bar interval
/// (e.g. "1d") into an ascending price series. Any failure is reported as
/// `DataUnavailable` and ends the run; no partial series is returned.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// The name of the source (e.g. "yahoo").
    fn name(&self) -> &'static str;

    async fn fetch(
        &self,
        symbol: &Symbol,
        period: &str,
        interval: &str,
    ) -> core_types::Result<PriceSeries>;
}

/// HTTP client for the Yahoo Finance chart API.
#[derive(Debug, Clone)]
pub struct YahooClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl YahooClient {
    /// Constructs a new YahooClient from MarketDataSettings.
    pub fn new(settings: &MarketDataSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;
        Ok(YahooClient {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches daily (or intraday) bars for a symbol.
    ///
    /// This corresponds to the `GET /v8/finance/chart/{symbol}` endpoint.
    ///
    /// # Arguments
    ///
    /// * `symbol`: The symbol to fetch bars for.
    /// * `range`: How far back to go (e.g. "6mo", "2y").
    /// * `interval`: The bar interval (e.g. "1d", "1h").
    pub async fn get_chart(&self, symbol: &Symbol, range: &str, interval: &str) -> Result<PriceSeries> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol.0);
        debug!(%url, range, interval, "Requesting chart.");

        let response = self
            .http_client
            .get(&url)
            .query(&[("range", range), ("interval", interval)])
            .send()
            .await
            .map_err(Error::RequestFailed)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::RequestFailed)?;

        // Yahoo wraps errors in the same envelope, even on 4xx responses.
        let series = parse_chart(&body).map_err(|e| match e {
            Error::DeserializationFailed(_) if !status.is_success() => Error::ApiError {
                code: status.as_u16().to_string(),
                msg: status.canonical_reason().unwrap_or("Unknown error").to_string(),
            },
            other => other,
        })?;

        info!(symbol = %symbol, bars = series.len(), "Price history received.");
        Ok(series)
    }
}

#[async_trait]
impl MarketDataSource for YahooClient {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn fetch(
        &self,
        symbol: &Symbol,
        period: &str,
        interval: &str,
    ) -> core_types::Result<PriceSeries> {
        Ok(self.get_chart(symbol, period, interval).await?)
    }
}

/// Decodes a chart response body into a price series.
///
/// Bars without a close are dropped. Timestamps are shifted into exchange
/// time so that daily bars carry the exchange's calendar date.
pub fn parse_chart(body: &str) -> Result<PriceSeries> {
    let response: ChartResponse = serde_json::from_str(body).map_err(Error::DeserializationFailed)?;

    if let Some(err) = response.chart.error {
        return Err(Error::ApiError {
            code: err.code,
            msg: err.description,
        });
    }

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| Error::EmptyResponse("chart".to_string()))?;
    let symbol = result.meta.symbol.clone();
    let offset = result.meta.gmtoffset;
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut points = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let Some(close) = quote.close.get(i).copied().flatten() else {
            continue;
        };
        let timestamp = DateTime::from_timestamp(ts + offset, 0)
            .ok_or_else(|| Error::InvalidData(format!("timestamp {} out of range", ts)))?
            .naive_utc();
        points.push(PricePoint {
            timestamp,
            close,
            low: quote.low.get(i).copied().flatten(),
            high: quote.high.get(i).copied().flatten(),
        });
    }

    if points.is_empty() {
        return Err(Error::EmptyResponse(symbol));
    }

    PriceSeries::new(points).map_err(|e| Error::InvalidData(e.to_string()))
}
