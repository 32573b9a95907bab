//! Dense vs. edge-triggered behaviour on engine output and on hand-built evaluations.

use chrono::{Duration, NaiveDate};
use core_types::{
    Evaluation, EvaluationMode, IndicatorKind, IndicatorParams, IndicatorSeries, IndicatorValue,
    MacdParams, PricePoint, PriceSeries, RsiParams, SignalConfig, StochParams, Suggestion,
};
use indicators::IndicatorEngine;
use signals::{DensePolicy, EdgeTriggeredPolicy, SignalPolicy, policy_for};

fn series_from(closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2022, 6, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    PriceSeries::new(
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                PricePoint::close_only(start + Duration::days(i as i64), close)
                    .with_range(close - 1.0, close + 1.0)
            })
            .collect(),
    )
    .unwrap()
}

fn signals_of(alerts: &[core_types::AlertRecord]) -> Vec<Suggestion> {
    alerts.iter().map(|a| a.signal).collect()
}

#[test]
fn stochastic_sustained_overbought() {
    let prices = series_from(&[100.0, 101.0, 102.0]);
    let evaluation = Evaluation {
        kind: IndicatorKind::Stoch,
        series: IndicatorSeries::new(vec![
            Some(IndicatorValue::Stoch { k: 50.0, d: 50.0 }),
            Some(IndicatorValue::Stoch { k: 85.0, d: 85.0 }),
            Some(IndicatorValue::Stoch { k: 85.0, d: 85.0 }),
        ]),
        suggestions: vec![Suggestion::Hold, Suggestion::Sell, Suggestion::Sell],
    };

    let dense = DensePolicy.alerts(&prices, &evaluation);
    assert_eq!(signals_of(&dense), vec![Suggestion::Sell, Suggestion::Sell]);
    assert_eq!(dense[0].date, "2022-06-02");
    assert_eq!(dense[1].date, "2022-06-03");

    let edge = EdgeTriggeredPolicy::new(SignalConfig::default()).alerts(&prices, &evaluation);
    assert_eq!(signals_of(&edge), vec![Suggestion::Sell]);
    assert_eq!(edge[0].date, "2022-06-02");
    assert_eq!(edge[0].indicator_name, "STOCH");
    assert_eq!(edge[0].indicator_value, 85.0);
}

#[test]
fn stochastic_edge_needs_both_lines() {
    let prices = series_from(&[100.0, 101.0]);
    let evaluation = Evaluation {
        kind: IndicatorKind::Stoch,
        series: IndicatorSeries::new(vec![
            Some(IndicatorValue::Stoch { k: 50.0, d: 50.0 }),
            Some(IndicatorValue::Stoch { k: 90.0, d: 60.0 }),
        ]),
        suggestions: vec![Suggestion::Hold, Suggestion::Hold],
    };
    let edge = EdgeTriggeredPolicy::new(SignalConfig::default()).alerts(&prices, &evaluation);
    assert!(edge.is_empty());
}

#[test]
fn macd_histogram_sign_drives_dense_alerts() {
    let prices = series_from(&[10.0, 11.0, 12.0, 13.0, 14.0]);
    let histograms = [-1.0, -1.0, 1.0, 1.0, -1.0];
    let params = IndicatorParams::Macd(MacdParams::default());
    let values: Vec<Option<IndicatorValue>> = histograms
        .iter()
        .map(|&h| {
            Some(IndicatorValue::Macd {
                macd: h,
                signal: 0.0,
                histogram: h,
            })
        })
        .collect();
    let evaluation = Evaluation {
        kind: IndicatorKind::Macd,
        suggestions: indicators::rules::suggest(
            &params,
            &SignalConfig::default(),
            &prices.closes(),
            &values,
        ),
        series: IndicatorSeries::new(values),
    };

    let dense = DensePolicy.alerts(&prices, &evaluation);
    assert_eq!(
        signals_of(&dense),
        vec![
            Suggestion::Sell,
            Suggestion::Sell,
            Suggestion::Buy,
            Suggestion::Buy,
            Suggestion::Sell
        ]
    );

    let edge = EdgeTriggeredPolicy::new(SignalConfig::default()).alerts(&prices, &evaluation);
    assert_eq!(signals_of(&edge), vec![Suggestion::Buy, Suggestion::Sell]);
    assert_eq!(edge[0].date, "2022-06-03");
    assert_eq!(edge[1].date, "2022-06-05");
}

#[test]
fn rsi_edge_buy_lands_on_the_first_oversold_crossing() {
    let mut closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64 * 2.0).collect();
    closes.extend((1..=20).map(|i| 138.0 - i as f64 * 3.0));
    let prices = series_from(&closes);
    let evaluation = IndicatorEngine::default()
        .compute(&prices, &IndicatorParams::Rsi(RsiParams { period: 14 }))
        .unwrap();

    let crossing = (1..evaluation.series.len())
        .find(|&i| {
            match (evaluation.series.primary(i - 1), evaluation.series.primary(i)) {
                (Some(prev), Some(current)) => prev > 30.0 && current <= 30.0,
                _ => false,
            }
        })
        .expect("the decline should push RSI through 30");

    let edge = EdgeTriggeredPolicy::new(SignalConfig::default()).alerts(&prices, &evaluation);
    let buys: Vec<&core_types::AlertRecord> = edge
        .iter()
        .filter(|a| a.signal == Suggestion::Buy)
        .collect();
    assert_eq!(buys.len(), 1);
    assert_eq!(buys[0].date, prices.get(crossing).unwrap().date_string());
    assert!(buys[0].indicator_value <= 30.0);
}

#[test]
fn steady_decline_from_the_start_has_no_edge_crossing() {
    // RSI is already oversold on its first defined bar; warm-up bars are
    // never the previous side of a crossing.
    let closes: Vec<f64> = (0..20).map(|i| 200.0 - i as f64 * 3.0).collect();
    let prices = series_from(&closes);
    let evaluation = IndicatorEngine::default()
        .compute(&prices, &IndicatorParams::Rsi(RsiParams { period: 14 }))
        .unwrap();
    assert!(evaluation.series.primary(13).unwrap() <= 30.0);

    let dense = DensePolicy.alerts(&prices, &evaluation);
    assert_eq!(dense.len(), 7);
    assert!(dense.iter().all(|a| a.signal == Suggestion::Buy));
    assert_eq!(dense[0].date, "2022-06-14");

    let edge = EdgeTriggeredPolicy::new(SignalConfig::default()).alerts(&prices, &evaluation);
    assert!(edge.is_empty());
}

#[test]
fn stochastic_touching_the_level_is_not_a_crossing() {
    let prices = series_from(&[100.0, 101.0, 102.0]);
    let params = IndicatorParams::Stoch(StochParams::default());
    let values = vec![
        Some(IndicatorValue::Stoch { k: 75.0, d: 75.0 }),
        Some(IndicatorValue::Stoch { k: 80.0, d: 80.0 }),
        Some(IndicatorValue::Stoch { k: 20.0, d: 20.0 }),
    ];
    let evaluation = Evaluation {
        kind: IndicatorKind::Stoch,
        suggestions: indicators::rules::suggest(
            &params,
            &SignalConfig::default(),
            &prices.closes(),
            &values,
        ),
        series: IndicatorSeries::new(values),
    };

    assert!(DensePolicy.alerts(&prices, &evaluation).is_empty());
    let edge = EdgeTriggeredPolicy::new(SignalConfig::default()).alerts(&prices, &evaluation);
    assert!(edge.is_empty());
}

#[test]
fn edge_triggered_never_exceeds_dense() {
    let shapes: Vec<Vec<f64>> = vec![
        (0..150).map(|i| 100.0 + (i as f64 * 0.2).sin() * 15.0).collect(),
        (0..150).map(|i| 100.0 + (i as f64 * 0.05).sin() * 30.0 + (i % 3) as f64).collect(),
        (0..150).map(|i| 50.0 + ((i * 13) % 17) as f64).collect(),
    ];
    let params = [
        IndicatorParams::Rsi(RsiParams::default()),
        IndicatorParams::Macd(MacdParams::default()),
        IndicatorParams::Stoch(StochParams::default()),
    ];
    let engine = IndicatorEngine::default();
    let dense = policy_for(EvaluationMode::Dense, SignalConfig::default());
    let edge = policy_for(EvaluationMode::EdgeTriggered, SignalConfig::default());

    for closes in &shapes {
        let prices = series_from(closes);
        for p in &params {
            let evaluation = engine.compute(&prices, p).unwrap();
            let dense_count = dense.alerts(&prices, &evaluation).len();
            let edge_count = edge.alerts(&prices, &evaluation).len();
            assert!(
                edge_count <= dense_count,
                "{}: edge {} > dense {}",
                p.kind(),
                edge_count,
                dense_count
            );
        }
    }
}

#[test]
fn dense_alerts_are_oldest_first() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin() * 20.0).collect();
    let prices = series_from(&closes);
    let evaluation = IndicatorEngine::default()
        .compute(&prices, &IndicatorParams::Rsi(RsiParams { period: 5 }))
        .unwrap();
    let alerts = DensePolicy.alerts(&prices, &evaluation);
    assert!(!alerts.is_empty());
    assert!(alerts.windows(2).all(|pair| pair[0].date < pair[1].date));
}
