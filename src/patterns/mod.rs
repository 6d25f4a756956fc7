// Module exports
mod recognizer;
mod single_candle;
mod triple_candle;
mod utils;

pub mod delegate;

// Public exports
pub use delegate::RecognitionDelegate;
pub use recognizer::{DegradeReason, PatternRecognizer, Recognition};
pub use utils::{DEFAULT_PENETRATION, FULL_SIGNAL, PARTIAL_SIGNAL};
