// In crates/api-client/src/types.rs

use serde::Deserialize;

// --- Structs for the Yahoo Finance chart endpoint ---

/// Top-level envelope of `GET /v8/finance/chart/{symbol}`.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    /// Bar open times in seconds since the epoch. Absent when the range is empty.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartMeta {
    pub symbol: String,
    /// Exchange offset from UTC in seconds; used to date bars in exchange time.
    #[serde(default)]
    pub gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Vec<Quote>,
}

/// Column-oriented OHLC values. Yahoo reports missing bars as `null`.
#[derive(Debug, Default, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
}
