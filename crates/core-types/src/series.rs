// In crates/core-types/src/series.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single bar of the input series.
///
/// `low` and `high` are optional because only the stochastic oscillator needs them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: NaiveDateTime,
    pub close: f64,
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl PricePoint {
    /// A bar that only carries a closing price.
    pub fn close_only(timestamp: NaiveDateTime, close: f64) -> Self {
        Self {
            timestamp,
            close,
            low: None,
            high: None,
        }
    }

    pub fn with_range(mut self, low: f64, high: f64) -> Self {
        self.low = Some(low);
        self.high = Some(high);
        self
    }

    /// The bar date rendered as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }
}

/// An ordered price history for one instrument.
///
/// Timestamps are strictly increasing. The series is never re-sorted; callers
/// must hand it over in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        if let Some(index) = points
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(Error::InvalidParameter(format!(
                "timestamps must be strictly increasing (bar {} is not after bar {})",
                index + 1,
                index
            )));
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&PricePoint> {
        self.points.get(index)
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }
}
