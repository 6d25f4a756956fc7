use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::PatternKind;
use crate::models::{RawSignal, ScanResult};
use crate::scanner::{PatternBreakdown, ScanOutcome};

/// Confidence-tier counts over a result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfidenceBuckets {
    /// confidence >= 70
    pub high: usize,
    /// 50 <= confidence <= 69
    pub medium: usize,
    /// confidence < 50
    pub low: usize,
}

impl ConfidenceBuckets {
    fn record(&mut self, confidence: u8) {
        if confidence >= 70 {
            self.high += 1;
        } else if confidence >= 50 {
            self.medium += 1;
        } else {
            self.low += 1;
        }
    }
}

/// Descriptive statistics over one scan's merged result list. Built once,
/// handed to reporting collaborators as a read-only snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanSummary {
    pub total_count: usize,
    pub by_confidence: ConfidenceBuckets,
    /// Raw strength value -> occurrence count.
    pub by_strength: BTreeMap<RawSignal, usize>,
    pub average_confidence: f64,
    pub average_volume: f64,
    pub average_price: f64,
    pub high_confidence_count: usize,
    /// Per-pattern accounting, passed through from the coordinator.
    pub pattern_breakdown: BTreeMap<PatternKind, PatternBreakdown>,
    /// Distinct symbols in first-appearance order.
    pub symbols: Vec<String>,
}

/// Pure reduction of a result list into a [`ScanSummary`].
pub struct SummaryAggregator;

impl SummaryAggregator {
    /// Summarize a merged result list. An empty list produces a zeroed
    /// summary; nothing here can fail or divide by zero.
    pub fn summarize(
        results: &[ScanResult],
        breakdown: &BTreeMap<PatternKind, PatternBreakdown>,
    ) -> ScanSummary {
        let mut summary = ScanSummary {
            pattern_breakdown: breakdown.clone(),
            ..Default::default()
        };

        if results.is_empty() {
            return summary;
        }

        summary.total_count = results.len();
        for result in results {
            summary.by_confidence.record(result.confidence_score);
            *summary.by_strength.entry(result.raw_strength).or_insert(0) += 1;
            if !summary.symbols.contains(&result.symbol) {
                summary.symbols.push(result.symbol.clone());
            }
        }

        let count = results.len() as f64;
        summary.average_confidence = results
            .iter()
            .map(|r| f64::from(r.confidence_score))
            .sum::<f64>()
            / count;
        summary.average_volume = results.iter().map(|r| r.volume as f64).sum::<f64>() / count;
        summary.average_price = results.iter().map(|r| r.close_price).sum::<f64>() / count;
        summary.high_confidence_count = summary.by_confidence.high;

        summary
    }

    /// Summarize a coordinator outcome.
    pub fn summarize_outcome(outcome: &ScanOutcome) -> ScanSummary {
        Self::summarize(&outcome.results, &outcome.breakdown)
    }
}
