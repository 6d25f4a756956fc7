use crate::models::{CandleWindow, RawSignal};
use crate::patterns::utils::{FULL_SIGNAL, PARTIAL_SIGNAL};

// Check every bar for a doji: a body that is tiny relative to the bar's
// range. Ratio under 0.1 scores a full signal, under 0.2 a partial one.
pub fn doji_signals(window: &CandleWindow<'_>) -> Vec<RawSignal> {
    (0..window.len())
        .map(|index| {
            let candle = window.candle(index);
            let range = candle.range();

            // A flat bar has no shape to read
            if range == 0.0 {
                return 0;
            }

            let body_to_range = candle.body() / range;
            if body_to_range < 0.1 {
                FULL_SIGNAL
            } else if body_to_range < 0.2 {
                PARTIAL_SIGNAL
            } else {
                0
            }
        })
        .collect()
}

// Check every bar for a hammer: a real body with a lower shadow at least
// twice its size and an upper shadow smaller than it.
pub fn hammer_signals(window: &CandleWindow<'_>) -> Vec<RawSignal> {
    (0..window.len())
        .map(|index| {
            let candle = window.candle(index);
            let body = candle.body();

            if body == 0.0 {
                return 0;
            }

            if candle.lower_shadow() > 2.0 * body && candle.upper_shadow() < body {
                FULL_SIGNAL
            } else {
                0
            }
        })
        .collect()
}
