// In crates/indicators/src/moving_average.rs

use core_types::{CrossoverParams, Error, IndicatorValue, Result};
use ta::Next;
use ta::indicators::{ExponentialMovingAverage as Ema, SimpleMovingAverage as Sma};

/// Short and long SMA values per bar, defined once the long window is full.
pub fn sma_crossover(closes: &[f64], params: &CrossoverParams) -> Result<Vec<Option<IndicatorValue>>> {
    let short = Sma::new(params.short_period).map_err(|e| invalid("SMA", e))?;
    let long = Sma::new(params.long_period).map_err(|e| invalid("SMA", e))?;
    Ok(pair(closes, short, long, params.long_period))
}

/// Short and long EMA values per bar, defined once the long window is full.
pub fn ema_crossover(closes: &[f64], params: &CrossoverParams) -> Result<Vec<Option<IndicatorValue>>> {
    let short = Ema::new(params.short_period).map_err(|e| invalid("EMA", e))?;
    let long = Ema::new(params.long_period).map_err(|e| invalid("EMA", e))?;
    Ok(pair(closes, short, long, params.long_period))
}

fn invalid(indicator: &str, err: ta::errors::TaError) -> Error {
    Error::InvalidParameter(format!("{} rejected its parameters: {:?}", indicator, err))
}

fn pair<I>(closes: &[f64], mut short: I, mut long: I, long_period: usize) -> Vec<Option<IndicatorValue>>
where
    I: Next<f64, Output = f64>,
{
    closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            let short_value = short.next(*close);
            let long_value = long.next(*close);
            (i + 1 >= long_period).then_some(IndicatorValue::Crossover {
                short: short_value,
                long: long_value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_values_match_window_means() {
        let closes = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let params = CrossoverParams {
            short_period: 2,
            long_period: 4,
        };
        let values = sma_crossover(&closes, &params).unwrap();
        assert!(values[..3].iter().all(Option::is_none));
        assert_eq!(
            values[5],
            Some(IndicatorValue::Crossover {
                short: 5.5,
                long: 4.5
            })
        );
    }

    #[test]
    fn ema_on_a_flat_series_is_flat() {
        let closes = [100.0; 10];
        let params = CrossoverParams {
            short_period: 3,
            long_period: 7,
        };
        let values = ema_crossover(&closes, &params).unwrap();
        assert_eq!(values.iter().flatten().count(), 4);
        for value in values.iter().flatten() {
            assert_eq!(
                *value,
                IndicatorValue::Crossover {
                    short: 100.0,
                    long: 100.0
                }
            );
        }
    }
}
