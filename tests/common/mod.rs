#![allow(dead_code)]

use chrono::{Days, NaiveDate};
use stock_pattern_scanner::models::CandleSeries;

/// First session date used by every builder.
pub fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

pub fn day(offset: u64) -> NaiveDate {
    base_date().checked_add_days(Days::new(offset)).unwrap()
}

/// Mild bullish drift with no formation the manual rules recognize.
pub fn drift_series(symbol: &str, bars: usize) -> CandleSeries {
    let mut series = CandleSeries::new(symbol);
    for i in 0..bars {
        push_drift_bar(&mut series, i);
    }
    series
}

/// Drift series whose last bar is a textbook doji.
pub fn doji_tailed_series(symbol: &str, bars: usize) -> CandleSeries {
    let mut series = drift_series(symbol, bars - 1);
    push_doji_bar(&mut series, bars - 1);
    series
}

pub fn push_drift_bar(series: &mut CandleSeries, index: usize) {
    let base = 100.0 + index as f64 * 0.5;
    series.push_bar(
        day(index as u64),
        base,
        base + 1.2,
        base - 0.2,
        base + 1.0,
        1_000 + index as u64 * 10,
    );
}

/// Body 0.05 over a 2.0 range: scores a full doji signal and nothing else.
pub fn push_doji_bar(series: &mut CandleSeries, index: usize) {
    series.push_bar(day(index as u64), 100.0, 101.0, 99.0, 100.05, 1_000);
}
