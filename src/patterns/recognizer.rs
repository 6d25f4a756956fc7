use std::fmt;
use std::sync::Once;

use tracing::{error, warn};

use crate::catalog::PatternKind;
use crate::models::{CandleWindow, RawSignal};
use crate::patterns::delegate::RecognitionDelegate;
use crate::patterns::utils::{clamp_signal, zero_series, DEFAULT_PENETRATION};
use crate::patterns::{single_candle, triple_candle};

/// Why a recognition pass ran without the primary delegate's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    /// No delegate is installed; manual detection covers a small subset
    /// of formations.
    DelegateUnavailable,
    /// The delegate was called and failed; the series is all zeros.
    DelegateFailed(String),
}

impl fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegradeReason::DelegateUnavailable => write!(f, "recognition delegate unavailable"),
            DegradeReason::DelegateFailed(msg) => {
                write!(f, "recognition delegate failed: {}", msg)
            }
        }
    }
}

/// Outcome of one recognition pass. Degraded outcomes still carry a signal
/// series aligned to the window, so callers fall back deliberately instead
/// of unwinding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition {
    /// The delegate answered; signals are clamped to [-100, 100].
    Primary(Vec<RawSignal>),
    /// Manual fallback or an all-zero series, with the reason recorded.
    Degraded {
        reason: DegradeReason,
        signals: Vec<RawSignal>,
    },
}

impl Recognition {
    pub fn signals(&self) -> &[RawSignal] {
        match self {
            Recognition::Primary(signals) => signals,
            Recognition::Degraded { signals, .. } => signals,
        }
    }

    pub fn into_signals(self) -> Vec<RawSignal> {
        match self {
            Recognition::Primary(signals) => signals,
            Recognition::Degraded { signals, .. } => signals,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Recognition::Degraded { .. })
    }
}

/// Per-pattern signal detection over a candle window.
///
/// The primary strategy hands the window to the installed
/// [`RecognitionDelegate`]; without one the recognizer runs in degraded
/// mode, where doji, hammer and morning star are detected manually and
/// every other formation yields an all-zero series.
pub struct PatternRecognizer {
    delegate: Option<Box<dyn RecognitionDelegate>>,
    penetration: f64,
    degraded_notice: Once,
}

impl PatternRecognizer {
    pub fn new(delegate: Box<dyn RecognitionDelegate>) -> Self {
        Self {
            delegate: Some(delegate),
            penetration: DEFAULT_PENETRATION,
            degraded_notice: Once::new(),
        }
    }

    /// Recognizer with no delegate, running on manual detection only.
    pub fn degraded() -> Self {
        Self {
            delegate: None,
            penetration: DEFAULT_PENETRATION,
            degraded_notice: Once::new(),
        }
    }

    pub fn with_penetration(mut self, ratio: f64) -> Self {
        self.penetration = ratio;
        self
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    /// Produce the signal series for one formation over the window,
    /// aligned 1:1 with its bars. Never fails: delegate problems are
    /// logged and reported through the [`Recognition`] variant.
    pub fn recognize(&self, kind: PatternKind, window: &CandleWindow<'_>) -> Recognition {
        let Some(delegate) = &self.delegate else {
            return self.recognize_degraded(kind, window);
        };

        let penetration = kind.uses_penetration().then_some(self.penetration);
        match delegate.recognize(kind, window, penetration) {
            Ok(signals) if signals.len() == window.len() => {
                Recognition::Primary(signals.into_iter().map(clamp_signal).collect())
            }
            Ok(signals) => {
                error!(
                    pattern = %kind,
                    symbol = window.symbol,
                    expected = window.len(),
                    got = signals.len(),
                    "delegate returned a misaligned signal series"
                );
                Recognition::Degraded {
                    reason: DegradeReason::DelegateFailed("misaligned signal series".to_string()),
                    signals: zero_series(window.len()),
                }
            }
            Err(err) => {
                error!(
                    pattern = %kind,
                    symbol = window.symbol,
                    error = %err,
                    "recognition delegate failed"
                );
                Recognition::Degraded {
                    reason: DegradeReason::DelegateFailed(err.to_string()),
                    signals: zero_series(window.len()),
                }
            }
        }
    }

    fn recognize_degraded(&self, kind: PatternKind, window: &CandleWindow<'_>) -> Recognition {
        self.degraded_notice.call_once(|| {
            warn!("no recognition delegate installed, using manual detection fallback");
        });

        let signals = match kind {
            PatternKind::Doji => single_candle::doji_signals(window),
            PatternKind::Hammer => single_candle::hammer_signals(window),
            PatternKind::MorningStar => triple_candle::morning_star_signals(window),
            other => {
                warn!(pattern = %other, "manual detection not implemented, emitting zero series");
                zero_series(window.len())
            }
        };

        Recognition::Degraded {
            reason: DegradeReason::DelegateUnavailable,
            signals,
        }
    }
}
