use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Reliability assumed for any pattern the catalog has no entry for.
pub const DEFAULT_RELIABILITY: u8 = 60;

/// Expected reversal direction of a formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalDirection {
    Bullish,
    Bearish,
}

/// Closed set of recognized candlestick formations.
///
/// Every kind carries its own metadata and recognition rules, so dispatch
/// is a plain match instead of a name lookup against an open registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    // Single candlestick formations
    Marubozu,
    Doji,
    SpinningTop,
    Hammer,
    HangingMan,
    ShootingStar,
    InvertedHammer,
    DragonflyDoji,
    GravestoneDoji,
    LongLeggedDoji,
    // Multi candlestick formations
    MorningStar,
    EveningStar,
    MorningDojiStar,
    EveningDojiStar,
    Engulfing,
    Harami,
    HaramiCross,
    PiercingPattern,
    DarkCloudCover,
    ThreeBlackCrows,
    ThreeWhiteSoldiers,
    ThreeInside,
    ThreeOutside,
}

impl PatternKind {
    pub const ALL: [PatternKind; 23] = [
        PatternKind::Marubozu,
        PatternKind::Doji,
        PatternKind::SpinningTop,
        PatternKind::Hammer,
        PatternKind::HangingMan,
        PatternKind::ShootingStar,
        PatternKind::InvertedHammer,
        PatternKind::DragonflyDoji,
        PatternKind::GravestoneDoji,
        PatternKind::LongLeggedDoji,
        PatternKind::MorningStar,
        PatternKind::EveningStar,
        PatternKind::MorningDojiStar,
        PatternKind::EveningDojiStar,
        PatternKind::Engulfing,
        PatternKind::Harami,
        PatternKind::HaramiCross,
        PatternKind::PiercingPattern,
        PatternKind::DarkCloudCover,
        PatternKind::ThreeBlackCrows,
        PatternKind::ThreeWhiteSoldiers,
        PatternKind::ThreeInside,
        PatternKind::ThreeOutside,
    ];

    /// Stable string id, also used by the recommendation keyword rules.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Marubozu => "marubozu",
            PatternKind::Doji => "doji",
            PatternKind::SpinningTop => "spinning_top",
            PatternKind::Hammer => "hammer",
            PatternKind::HangingMan => "hanging_man",
            PatternKind::ShootingStar => "shooting_star",
            PatternKind::InvertedHammer => "inverted_hammer",
            PatternKind::DragonflyDoji => "dragonfly_doji",
            PatternKind::GravestoneDoji => "gravestone_doji",
            PatternKind::LongLeggedDoji => "long_legged_doji",
            PatternKind::MorningStar => "morning_star",
            PatternKind::EveningStar => "evening_star",
            PatternKind::MorningDojiStar => "morning_doji_star",
            PatternKind::EveningDojiStar => "evening_doji_star",
            PatternKind::Engulfing => "engulfing",
            PatternKind::Harami => "harami",
            PatternKind::HaramiCross => "harami_cross",
            PatternKind::PiercingPattern => "piercing_pattern",
            PatternKind::DarkCloudCover => "dark_cloud_cover",
            PatternKind::ThreeBlackCrows => "three_black_crows",
            PatternKind::ThreeWhiteSoldiers => "three_white_soldiers",
            PatternKind::ThreeInside => "three_inside",
            PatternKind::ThreeOutside => "three_outside",
        }
    }

    /// Formations whose confirming candle takes a penetration ratio.
    pub fn uses_penetration(&self) -> bool {
        matches!(
            self,
            PatternKind::MorningStar
                | PatternKind::EveningStar
                | PatternKind::MorningDojiStar
                | PatternKind::EveningDojiStar
                | PatternKind::PiercingPattern
                | PatternKind::DarkCloudCover
        )
    }

    /// The default multi-pattern scan set: the most reliable formations.
    pub fn default_scan_set() -> Vec<PatternKind> {
        vec![
            PatternKind::MorningStar,
            PatternKind::EveningStar,
            PatternKind::Hammer,
            PatternKind::ShootingStar,
            PatternKind::Engulfing,
            PatternKind::Doji,
            PatternKind::ThreeBlackCrows,
            PatternKind::ThreeWhiteSoldiers,
        ]
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternKind {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternKind::ALL
            .iter()
            .find(|kind| kind.as_str() == s)
            .copied()
            .ok_or_else(|| ScanError::UnsupportedPattern(s.to_string()))
    }
}

/// Immutable metadata for one formation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternDefinition {
    pub kind: PatternKind,
    pub name: &'static str,
    pub direction: SignalDirection,
    /// Empirical trustworthiness score in [0, 100].
    pub reliability: u8,
}

fn definition(kind: PatternKind) -> PatternDefinition {
    use PatternKind::*;
    use SignalDirection::{Bearish, Bullish};

    let (name, direction, reliability) = match kind {
        Marubozu => ("Marubozu", Bullish, 65),
        Doji => ("Doji", Bullish, 60),
        SpinningTop => ("Spinning Top", Bullish, 55),
        Hammer => ("Hammer", Bullish, 68),
        HangingMan => ("Hanging Man", Bearish, 58),
        ShootingStar => ("Shooting Star", Bearish, 68),
        InvertedHammer => ("Inverted Hammer", Bullish, 60),
        DragonflyDoji => ("Dragonfly Doji", Bullish, 58),
        GravestoneDoji => ("Gravestone Doji", Bearish, 58),
        LongLeggedDoji => ("Long-Legged Doji", Bullish, 55),
        MorningStar => ("Morning Star", Bullish, 74),
        EveningStar => ("Evening Star", Bearish, 72),
        MorningDojiStar => ("Morning Doji Star", Bullish, 70),
        EveningDojiStar => ("Evening Doji Star", Bearish, 69),
        Engulfing => ("Engulfing", Bullish, 70),
        Harami => ("Harami", Bullish, 63),
        HaramiCross => ("Harami Cross", Bullish, 62),
        PiercingPattern => ("Piercing Pattern", Bullish, 65),
        DarkCloudCover => ("Dark Cloud Cover", Bearish, 65),
        ThreeBlackCrows => ("Three Black Crows", Bearish, 78),
        ThreeWhiteSoldiers => ("Three White Soldiers", Bullish, 75),
        ThreeInside => ("Three Inside Up/Down", Bullish, 68),
        ThreeOutside => ("Three Outside Up/Down", Bullish, 70),
    };

    PatternDefinition {
        kind,
        name,
        direction,
        reliability,
    }
}

/// Registry of formations a scan may look for, built once at startup and
/// shared by reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternCatalog {
    defs: BTreeMap<PatternKind, PatternDefinition>,
}

impl PatternCatalog {
    /// Catalog holding every formation this crate knows about.
    pub fn standard() -> Self {
        Self::with_kinds(PatternKind::ALL)
    }

    /// Restricted catalog over an explicit set of formations.
    pub fn with_kinds(kinds: impl IntoIterator<Item = PatternKind>) -> Self {
        let defs = kinds
            .into_iter()
            .map(|kind| (kind, definition(kind)))
            .collect();
        Self { defs }
    }

    /// Registered reliability, or [`DEFAULT_RELIABILITY`] for a formation
    /// this catalog has no entry for. Never fails.
    pub fn reliability(&self, kind: PatternKind) -> u8 {
        self.defs
            .get(&kind)
            .map(|def| def.reliability)
            .unwrap_or(DEFAULT_RELIABILITY)
    }

    pub fn get(&self, kind: PatternKind) -> Option<&PatternDefinition> {
        self.defs.get(&kind)
    }

    pub fn is_supported(&self, kind: PatternKind) -> bool {
        self.defs.contains_key(&kind)
    }

    pub fn list_kinds(&self) -> Vec<PatternKind> {
        self.defs.keys().copied().collect()
    }

    /// Parse a string id against this catalog's contents.
    pub fn resolve(&self, id: &str) -> Result<PatternKind, ScanError> {
        let kind = PatternKind::from_str(id)?;
        if self.is_supported(kind) {
            Ok(kind)
        } else {
            Err(ScanError::UnsupportedPattern(id.to_string()))
        }
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
