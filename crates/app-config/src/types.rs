// In crates/app-config/src/types.rs

use serde::Deserialize;

use core_types::{
    CrossoverParams, IndicatorKind, IndicatorParams, MacdParams, RsiParams, SignalConfig,
    StochParams,
};

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Where prices come from and which instrument to evaluate.
    #[serde(default)]
    pub market_data: MarketDataSettings,
    /// The selected indicator and the parameters of every indicator.
    #[serde(default)]
    pub indicators: IndicatorSettings,
    /// Buy/sell thresholds shared by the engine and the signal policies.
    #[serde(default)]
    pub signals: SignalConfig,
    #[serde(default)]
    pub alerts: AlertSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MarketDataSettings {
    /// The REST base URL of the chart API.
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// The instrument to evaluate (e.g., "TATAMOTORS.NS").
    pub symbol: String,
    /// How much history to fetch (e.g., "2y").
    pub period: String,
    /// The bar interval (e.g., "1d").
    pub interval: String,
}

impl Default for MarketDataSettings {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            user_agent: "Mozilla/5.0 (compatible; sentinel/0.1)".to_string(),
            timeout_secs: 30,
            symbol: "TATAMOTORS.NS".to_string(),
            period: "2y".to_string(),
            interval: "1d".to_string(),
        }
    }
}

/// Parameters for every indicator; `indicator` picks the one that runs.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct IndicatorSettings {
    pub indicator: IndicatorKind,
    pub rsi: RsiParams,
    pub macd: MacdParams,
    pub stoch: StochParams,
    pub sma: CrossoverParams,
    pub ema: CrossoverParams,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            indicator: IndicatorKind::Rsi,
            rsi: RsiParams::default(),
            macd: MacdParams::default(),
            stoch: StochParams::default(),
            sma: CrossoverParams::default(),
            ema: CrossoverParams::default(),
        }
    }
}

impl IndicatorSettings {
    /// The configured parameters for `kind`.
    pub fn params_for(&self, kind: IndicatorKind) -> IndicatorParams {
        match kind {
            IndicatorKind::Rsi => IndicatorParams::Rsi(self.rsi),
            IndicatorKind::Macd => IndicatorParams::Macd(self.macd),
            IndicatorKind::Stoch => IndicatorParams::Stoch(self.stoch),
            IndicatorKind::Sma => IndicatorParams::Sma(self.sma),
            IndicatorKind::Ema => IndicatorParams::Ema(self.ema),
        }
    }

    /// The parameters of the selected indicator.
    pub fn selected(&self) -> IndicatorParams {
        self.params_for(self.indicator)
    }
}

/// Where formatted alerts go.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PushMode {
    #[default]
    Console,
    /// Alerts are computed but not delivered.
    Silent,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AlertSettings {
    pub push_mode: PushMode,
    /// Deliver only the most recent alert of a run.
    pub latest_only: bool,
}
