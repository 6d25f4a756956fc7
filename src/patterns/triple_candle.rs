use crate::models::{CandleWindow, RawSignal};
use crate::patterns::utils::{zero_series, FULL_SIGNAL, PARTIAL_SIGNAL};

// Check for a morning star over each three-bar window: a large bearish
// candle, a small star gapping down, and a large bullish candle gapping up
// to close above the first body's midpoint.
//
// All six conditions score a full signal at the closing bar; four or five
// of them still score a partial signal. The first two bars of the window
// can never close a formation.
pub fn morning_star_signals(window: &CandleWindow<'_>) -> Vec<RawSignal> {
    let mut signals = zero_series(window.len());

    for (index, [first, star, third]) in window.triples() {
        let first_body = first.body();
        let star_body = star.body();
        let third_body = third.body();
        let avg_body = (first_body + star_body + third_body) / 3.0;

        let conditions = [
            // Large bearish setup candle
            first.is_bearish() && first_body > avg_body * 0.7,
            // Small star body
            star_body < first_body * 0.3,
            // Star gaps down below the setup close
            star.high < first.close,
            // Large bullish confirming candle
            third.is_bullish() && third_body > avg_body * 0.7,
            // Confirmation closes above the setup body's midpoint
            third.close > first.midpoint(),
            // Confirmation gaps up over the star
            third.open > star.high,
        ];

        let met = conditions.iter().filter(|met| **met).count();
        signals[index] = if met == conditions.len() {
            FULL_SIGNAL
        } else if met >= 4 {
            PARTIAL_SIGNAL
        } else {
            0
        };
    }

    signals
}
