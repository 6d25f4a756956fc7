use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{PatternCatalog, PatternKind};
use crate::error::ScanError;
use crate::models::{CandleSeries, ScanResult};
use crate::patterns::PatternRecognizer;
use crate::scoring::{ConfidenceScorer, RecommendationEngine};

// Scan tuning knobs. `as_of` pins the reference date used for `days_ago`;
// leaving it unset means the current UTC date, which is the only
// non-reproducible input a scan has.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Trailing bars considered per symbol.
    pub lookback_bars: usize,
    /// Threshold applied to the merged result list.
    pub min_confidence: u8,
    /// Penetration ratio forwarded to the recognition delegate for the
    /// star, piercing and dark-cloud formations.
    pub penetration: f64,
    /// Reference date for `days_ago`.
    pub as_of: Option<NaiveDate>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            lookback_bars: 30,
            min_confidence: 60,
            penetration: crate::patterns::DEFAULT_PENETRATION,
            as_of: None,
        }
    }
}

/// Per-pattern accounting for one scan pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatternBreakdown {
    /// Occurrences found before the confidence filter.
    pub found: usize,
    /// Occurrences at or above the confidence threshold.
    pub filtered: usize,
    /// Mean confidence over everything found.
    pub avg_confidence: f64,
}

/// Everything one scan invocation hands back: the merged, filtered,
/// confidence-ranked result list plus per-pattern accounting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanOutcome {
    pub results: Vec<ScanResult>,
    pub breakdown: BTreeMap<PatternKind, PatternBreakdown>,
    pub patterns_scanned: Vec<PatternKind>,
}

/// Orchestrates recognizer, scorer and recommendation across
/// symbols x patterns x lookback window.
pub struct ScanCoordinator {
    catalog: PatternCatalog,
    recognizer: PatternRecognizer,
    config: ScanConfig,
}

impl ScanCoordinator {
    pub fn new(catalog: PatternCatalog, recognizer: PatternRecognizer, config: ScanConfig) -> Self {
        let recognizer = recognizer.with_penetration(config.penetration);
        Self {
            catalog,
            recognizer,
            config,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every (pattern, symbol) pair sequentially.
    ///
    /// Fails only on an empty universe or pattern list; every per-unit
    /// problem is logged and folded into "no result".
    pub fn scan(
        &self,
        universe: &[CandleSeries],
        patterns: &[PatternKind],
    ) -> Result<ScanOutcome, ScanError> {
        self.scan_inner(universe, patterns, false)
    }

    /// Same contract as [`scan`](Self::scan) with units partitioned across
    /// the rayon pool. Unit results merge back in discovery order, so the
    /// output is identical to the sequential scan.
    pub fn scan_parallel(
        &self,
        universe: &[CandleSeries],
        patterns: &[PatternKind],
    ) -> Result<ScanOutcome, ScanError> {
        self.scan_inner(universe, patterns, true)
    }

    /// One pattern across the whole universe: unfiltered, sorted by
    /// confidence.
    pub fn scan_single_pattern(
        &self,
        universe: &[CandleSeries],
        kind: PatternKind,
    ) -> Result<Vec<ScanResult>, ScanError> {
        if universe.is_empty() {
            return Err(ScanError::EmptyUniverse);
        }
        if !self.catalog.is_supported(kind) {
            return Err(ScanError::UnsupportedPattern(kind.to_string()));
        }

        let as_of = self.reference_date();
        Ok(self.pattern_results(universe, kind, as_of, false))
    }

    fn scan_inner(
        &self,
        universe: &[CandleSeries],
        patterns: &[PatternKind],
        parallel: bool,
    ) -> Result<ScanOutcome, ScanError> {
        if universe.is_empty() {
            return Err(ScanError::EmptyUniverse);
        }
        let patterns = dedup_patterns(patterns);
        if patterns.is_empty() {
            return Err(ScanError::EmptyPatternSet);
        }

        let started = Instant::now();
        let as_of = self.reference_date();
        info!(
            symbols = universe.len(),
            patterns = patterns.len(),
            lookback = self.config.lookback_bars,
            "starting pattern scan"
        );

        let mut merged = Vec::new();
        let mut breakdown = BTreeMap::new();
        let mut patterns_scanned = Vec::new();

        for &kind in &patterns {
            if !self.catalog.is_supported(kind) {
                // Drops this pattern's contribution only
                warn!(pattern = %kind, "pattern not in catalog, skipping");
                continue;
            }

            let found = self.pattern_results(universe, kind, as_of, parallel);
            let filtered = found
                .iter()
                .filter(|r| r.confidence_score >= self.config.min_confidence)
                .count();
            let avg_confidence = if found.is_empty() {
                0.0
            } else {
                found
                    .iter()
                    .map(|r| f64::from(r.confidence_score))
                    .sum::<f64>()
                    / found.len() as f64
            };

            debug!(pattern = %kind, found = found.len(), filtered, "pattern pass complete");
            breakdown.insert(
                kind,
                PatternBreakdown {
                    found: found.len(),
                    filtered,
                    avg_confidence,
                },
            );
            patterns_scanned.push(kind);
            merged.extend(found);
        }

        merged.retain(|r| r.confidence_score >= self.config.min_confidence);
        // Stable sort: equal scores keep their discovery order
        merged.sort_by(|a, b| b.confidence_score.cmp(&a.confidence_score));

        info!(
            results = merged.len(),
            elapsed = ?started.elapsed(),
            "pattern scan complete"
        );

        Ok(ScanOutcome {
            results: merged,
            breakdown,
            patterns_scanned,
        })
    }

    // All occurrences of one pattern over the universe, sorted by
    // confidence with input order preserved on ties.
    fn pattern_results(
        &self,
        universe: &[CandleSeries],
        kind: PatternKind,
        as_of: NaiveDate,
        parallel: bool,
    ) -> Vec<ScanResult> {
        let mut found: Vec<ScanResult> = if parallel {
            universe
                .par_iter()
                .filter_map(|series| self.scan_unit(series, kind, as_of))
                .collect()
        } else {
            universe
                .iter()
                .filter_map(|series| self.scan_unit(series, kind, as_of))
                .collect()
        };

        found.sort_by(|a, b| b.confidence_score.cmp(&a.confidence_score));
        found
    }

    // One (symbol, pattern) unit. Returns None for thin history, a silent
    // window, or a degraded recognition with nothing to report; no unit
    // outcome can abort the scan.
    fn scan_unit(
        &self,
        series: &CandleSeries,
        kind: PatternKind,
        as_of: NaiveDate,
    ) -> Option<ScanResult> {
        let window = series.tail(self.config.lookback_bars);
        if window.len() < 3 {
            debug!(
                symbol = %series.symbol,
                pattern = %kind,
                bars = window.len(),
                "not enough bars, skipping"
            );
            return None;
        }

        let recognition = self.recognizer.recognize(kind, &window);
        let signals = recognition.signals();

        // Only the most recent occurrence inside the window counts
        let index = signals.iter().rposition(|signal| *signal != 0)?;
        let raw_strength = signals[index];

        let confidence =
            ConfidenceScorer::score(&self.catalog, kind, raw_strength, window.volume, index);
        let recommendation = RecommendationEngine::recommend(kind, raw_strength, confidence);

        let occurrence_date = window.dates[index];
        // Price context comes from the full-history bar on the occurrence
        // date
        let bar = series
            .bar_on(occurrence_date)
            .unwrap_or_else(|| window.candle(index));

        info!(
            symbol = %series.symbol,
            pattern = %kind,
            date = %occurrence_date,
            confidence,
            "pattern occurrence found"
        );

        Some(ScanResult {
            symbol: series.symbol.clone(),
            pattern: kind,
            occurrence_date,
            raw_strength,
            confidence_score: confidence,
            recommendation,
            close_price: bar.close,
            volume: bar.volume,
            high: bar.high,
            low: bar.low,
            days_ago: (as_of - occurrence_date).num_days(),
        })
    }

    fn reference_date(&self) -> NaiveDate {
        self.config
            .as_of
            .unwrap_or_else(|| Utc::now().date_naive())
    }
}

fn dedup_patterns(patterns: &[PatternKind]) -> Vec<PatternKind> {
    let mut unique = Vec::with_capacity(patterns.len());
    for &kind in patterns {
        if !unique.contains(&kind) {
            unique.push(kind);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_preserves_first_occurrence_order() {
        let patterns = [
            PatternKind::Doji,
            PatternKind::Hammer,
            PatternKind::Doji,
            PatternKind::MorningStar,
            PatternKind::Hammer,
        ];
        assert_eq!(
            dedup_patterns(&patterns),
            vec![
                PatternKind::Doji,
                PatternKind::Hammer,
                PatternKind::MorningStar
            ]
        );
    }

    #[test]
    fn default_config_matches_scan_settings() {
        let config = ScanConfig::default();
        assert_eq!(config.lookback_bars, 30);
        assert_eq!(config.min_confidence, 60);
        assert_eq!(config.penetration, 0.3);
        assert_eq!(config.as_of, None);
    }
}
