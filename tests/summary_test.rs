mod common;

use std::collections::BTreeMap;

use stock_pattern_scanner::catalog::PatternKind;
use stock_pattern_scanner::models::{RawSignal, ScanResult};
use stock_pattern_scanner::scanner::PatternBreakdown;
use stock_pattern_scanner::summary::SummaryAggregator;

use common::day;

fn result(symbol: &str, confidence: u8, raw_strength: RawSignal, volume: u64, price: f64) -> ScanResult {
    ScanResult {
        symbol: symbol.to_string(),
        pattern: PatternKind::Doji,
        occurrence_date: day(5),
        raw_strength,
        confidence_score: confidence,
        recommendation: "Moderate CONSIDER BUY Signal".to_string(),
        close_price: price,
        volume,
        high: price + 1.0,
        low: price - 1.0,
        days_ago: 3,
    }
}

#[test]
fn empty_input_gives_a_zeroed_summary() {
    let summary = SummaryAggregator::summarize(&[], &BTreeMap::new());
    assert_eq!(summary.total_count, 0);
    assert_eq!(summary.by_confidence.high, 0);
    assert_eq!(summary.by_confidence.medium, 0);
    assert_eq!(summary.by_confidence.low, 0);
    assert!(summary.by_strength.is_empty());
    assert_eq!(summary.average_confidence, 0.0);
    assert_eq!(summary.average_volume, 0.0);
    assert_eq!(summary.average_price, 0.0);
    assert_eq!(summary.high_confidence_count, 0);
    assert!(summary.symbols.is_empty());
}

#[test]
fn confidence_buckets_split_at_seventy_and_fifty() {
    let results = vec![
        result("AAA", 70, 100, 1_000, 100.0),
        result("BBB", 69, 100, 1_000, 100.0),
        result("CCC", 50, 100, 1_000, 100.0),
        result("DDD", 49, 100, 1_000, 100.0),
    ];
    let summary = SummaryAggregator::summarize(&results, &BTreeMap::new());

    assert_eq!(summary.by_confidence.high, 1);
    assert_eq!(summary.by_confidence.medium, 2);
    assert_eq!(summary.by_confidence.low, 1);
    assert_eq!(summary.high_confidence_count, 1);
}

#[test]
fn strength_histogram_counts_each_value() {
    let results = vec![
        result("AAA", 60, 100, 1_000, 100.0),
        result("BBB", 60, 100, 1_000, 100.0),
        result("CCC", 60, -100, 1_000, 100.0),
        result("DDD", 60, 50, 1_000, 100.0),
    ];
    let summary = SummaryAggregator::summarize(&results, &BTreeMap::new());

    assert_eq!(summary.by_strength[&100], 2);
    assert_eq!(summary.by_strength[&-100], 1);
    assert_eq!(summary.by_strength[&50], 1);
}

#[test]
fn averages_are_arithmetic_means() {
    let results = vec![
        result("AAA", 80, 100, 2_000, 50.0),
        result("BBB", 60, 100, 4_000, 150.0),
    ];
    let summary = SummaryAggregator::summarize(&results, &BTreeMap::new());

    assert_eq!(summary.total_count, 2);
    assert_eq!(summary.average_confidence, 70.0);
    assert_eq!(summary.average_volume, 3_000.0);
    assert_eq!(summary.average_price, 100.0);
}

#[test]
fn symbols_are_distinct_in_first_appearance_order() {
    let results = vec![
        result("MSFT", 75, 100, 1_000, 100.0),
        result("AAPL", 70, 100, 1_000, 100.0),
        result("MSFT", 65, 100, 1_000, 100.0),
    ];
    let summary = SummaryAggregator::summarize(&results, &BTreeMap::new());
    assert_eq!(summary.symbols, vec!["MSFT".to_string(), "AAPL".to_string()]);
}

#[test]
fn pattern_breakdown_passes_through() {
    let mut breakdown = BTreeMap::new();
    breakdown.insert(
        PatternKind::Doji,
        PatternBreakdown {
            found: 3,
            filtered: 2,
            avg_confidence: 61.5,
        },
    );

    let summary = SummaryAggregator::summarize(&[result("AAA", 60, 100, 1_000, 100.0)], &breakdown);
    assert_eq!(summary.pattern_breakdown, breakdown);
}

#[test]
fn summary_and_results_serialize_for_downstream_consumers() {
    let results = vec![result("AAA", 72, 100, 1_000, 100.0)];
    let summary = SummaryAggregator::summarize(&results, &BTreeMap::new());

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["total_count"], 1);
    assert_eq!(json["by_confidence"]["high"], 1);
    assert_eq!(json["by_strength"]["100"], 1);

    let json = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(json["pattern"], "doji");
    assert_eq!(json["occurrence_date"], "2025-06-07");
    assert_eq!(json["recommendation"], "Moderate CONSIDER BUY Signal");
}
