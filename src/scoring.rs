use crate::catalog::{PatternCatalog, PatternKind};
use crate::models::RawSignal;

// How many preceding sessions the volume confirmation averages over.
const VOLUME_LOOKBACK: usize = 10;

// Keyword sets driving the action side of a recommendation. Empirical
// constants carried over unchanged from the research behind the catalog.
const BULLISH_ACTION_KEYWORDS: [&str; 5] = ["morning", "hammer", "piercing", "white", "engulfing"];
const BEARISH_ACTION_KEYWORDS: [&str; 5] = ["evening", "shooting", "hanging", "dark", "black"];

/// Confidence scoring for a single pattern occurrence.
pub struct ConfidenceScorer;

impl ConfidenceScorer {
    /// Combine catalog reliability, signal strength and volume
    /// confirmation into a score in [0, 100].
    ///
    /// Deterministic and side-effect free: the same inputs always produce
    /// the same score.
    pub fn score(
        catalog: &PatternCatalog,
        kind: PatternKind,
        raw_strength: RawSignal,
        volume: &[u64],
        occurrence_index: usize,
    ) -> u8 {
        let base = f64::from(catalog.reliability(kind));

        let strength = raw_strength.abs();
        let strength_factor = if strength == 100 {
            1.0
        } else if strength >= 50 {
            0.8
        } else {
            0.6
        };

        let volume_factor = Self::volume_factor(volume, occurrence_index);

        (base * strength_factor * volume_factor).min(100.0).floor() as u8
    }

    // Volume confirmation against the mean of the ten sessions before the
    // occurrence. Thin history keeps the factor neutral.
    fn volume_factor(volume: &[u64], occurrence_index: usize) -> f64 {
        if occurrence_index < VOLUME_LOOKBACK || occurrence_index >= volume.len() {
            return 1.0;
        }

        let trailing = &volume[occurrence_index - VOLUME_LOOKBACK..occurrence_index];
        let avg = trailing.iter().sum::<u64>() as f64 / trailing.len() as f64;
        let current = volume[occurrence_index] as f64;

        if current > avg * 1.5 {
            1.1
        } else if current < avg * 0.5 {
            0.9
        } else {
            1.0
        }
    }
}

/// Trading-direction labels for scored occurrences.
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Human-readable action label for one occurrence. A heuristic
    /// reading of the formation, not a profitability guarantee.
    pub fn recommend(kind: PatternKind, raw_strength: RawSignal, confidence: u8) -> String {
        let tier = if confidence >= 70 {
            "Strong"
        } else if confidence >= 60 {
            "Moderate"
        } else {
            "Weak"
        };

        let id = kind.as_str();
        let action = if raw_strength > 0 {
            if BULLISH_ACTION_KEYWORDS.iter().any(|kw| id.contains(kw)) {
                "BUY"
            } else {
                "CONSIDER BUY"
            }
        } else if BEARISH_ACTION_KEYWORDS.iter().any(|kw| id.contains(kw)) {
            "SELL"
        } else {
            "CONSIDER SELL"
        };

        format!("{} {} Signal", tier, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PatternCatalog {
        PatternCatalog::standard()
    }

    #[test]
    fn score_stays_in_bounds_across_input_grid() {
        let catalog = catalog();
        let volume: Vec<u64> = (0..40).map(|i| 1_000 + i * 37).collect();
        for kind in PatternKind::ALL {
            for raw in [-100, -73, -50, -20, 0, 20, 50, 73, 100] {
                for index in [0, 5, 10, 25, 39] {
                    let score = ConfidenceScorer::score(&catalog, kind, raw, &volume, index);
                    assert!(score <= 100, "{} raw {} idx {}", kind, raw, index);
                }
            }
        }
    }

    #[test]
    fn strength_factor_tiers() {
        let catalog = catalog();
        let volume = vec![1_000u64; 5];
        // three_black_crows base 78
        let kind = PatternKind::ThreeBlackCrows;
        assert_eq!(ConfidenceScorer::score(&catalog, kind, -100, &volume, 4), 78);
        assert_eq!(ConfidenceScorer::score(&catalog, kind, -50, &volume, 4), 62); // 78 * 0.8 = 62.4
        assert_eq!(ConfidenceScorer::score(&catalog, kind, -20, &volume, 4), 46); // 78 * 0.6 = 46.8
    }

    #[test]
    fn volume_surge_and_drought_adjust_the_score() {
        let catalog = catalog();
        let kind = PatternKind::MorningStar; // base 74

        let mut surge = vec![1_000u64; 10];
        surge.push(2_000); // > 1.5x the 1_000 average
        assert_eq!(
            ConfidenceScorer::score(&catalog, kind, 100, &surge, 10),
            81 // 74 * 1.1 = 81.4
        );

        let mut drought = vec![1_000u64; 10];
        drought.push(400); // < 0.5x the 1_000 average
        assert_eq!(
            ConfidenceScorer::score(&catalog, kind, 100, &drought, 10),
            66 // 74 * 0.9 = 66.6
        );

        let mut steady = vec![1_000u64; 10];
        steady.push(1_100);
        assert_eq!(ConfidenceScorer::score(&catalog, kind, 100, &steady, 10), 74);
    }

    #[test]
    fn thin_history_keeps_volume_factor_neutral() {
        let catalog = catalog();
        let volume = vec![1u64, 1, 1, 1_000_000];
        assert_eq!(
            ConfidenceScorer::score(&catalog, PatternKind::MorningStar, 100, &volume, 3),
            74
        );
    }

    #[test]
    fn score_caps_at_one_hundred() {
        // No standard reliability climbs over 100 even with the 1.1 volume
        // factor, so check the cap through a surge on the highest base.
        let catalog = catalog();
        let mut volume = vec![1_000u64; 10];
        volume.push(5_000);
        let score =
            ConfidenceScorer::score(&catalog, PatternKind::ThreeBlackCrows, -100, &volume, 10);
        assert_eq!(score, 85); // 78 * 1.1 = 85.8, floored
    }

    #[test]
    fn recommendation_tier_boundaries() {
        let kind = PatternKind::MorningStar;
        assert_eq!(
            RecommendationEngine::recommend(kind, 100, 70),
            "Strong BUY Signal"
        );
        assert_eq!(
            RecommendationEngine::recommend(kind, 100, 69),
            "Moderate BUY Signal"
        );
        assert_eq!(
            RecommendationEngine::recommend(kind, 100, 60),
            "Moderate BUY Signal"
        );
        assert_eq!(
            RecommendationEngine::recommend(kind, 100, 59),
            "Weak BUY Signal"
        );
    }

    #[test]
    fn keyword_sets_pick_the_action() {
        assert_eq!(
            RecommendationEngine::recommend(PatternKind::ThreeWhiteSoldiers, 100, 75),
            "Strong BUY Signal"
        );
        assert_eq!(
            RecommendationEngine::recommend(PatternKind::Doji, 100, 60),
            "Moderate CONSIDER BUY Signal"
        );
        assert_eq!(
            RecommendationEngine::recommend(PatternKind::DarkCloudCover, -100, 72),
            "Strong SELL Signal"
        );
        assert_eq!(
            RecommendationEngine::recommend(PatternKind::Harami, -100, 55),
            "Weak CONSIDER SELL Signal"
        );
    }

    #[test]
    fn bearish_engulfing_is_not_a_sell_keyword() {
        // "engulfing" sits in the bullish keyword set only; its bearish
        // occurrences downgrade to a considered sell.
        assert_eq!(
            RecommendationEngine::recommend(PatternKind::Engulfing, -100, 80),
            "Strong CONSIDER SELL Signal"
        );
    }
}
