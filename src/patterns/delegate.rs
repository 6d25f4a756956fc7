use anyhow::Result;

use crate::catalog::PatternKind;
use crate::models::{CandleWindow, RawSignal};

/// Seam for an external recognition library.
///
/// An implementation exposes one recognition call per formation over the
/// window's parallel OHLC columns and returns one signal per bar: zero when
/// the bar closes no occurrence, otherwise a value in [-100, 100] whose
/// sign is the trade direction. `penetration` is `Some` only for the
/// formations in [`PatternKind::uses_penetration`].
///
/// Failures are opaque to the engine: the recognizer logs them and carries
/// on with an empty signal series, so implementations are free to error on
/// whatever their backend considers fatal.
pub trait RecognitionDelegate: Send + Sync {
    fn recognize(
        &self,
        kind: PatternKind,
        window: &CandleWindow<'_>,
        penetration: Option<f64>,
    ) -> Result<Vec<RawSignal>>;
}
