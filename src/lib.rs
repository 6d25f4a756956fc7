// Export all necessary modules
pub mod catalog;
pub mod error;
pub mod models;
pub mod patterns;
pub mod scanner;
pub mod scoring;
pub mod summary;
pub mod utils;

// Re-export the types most callers wire together
pub use catalog::{PatternCatalog, PatternDefinition, PatternKind, SignalDirection};
pub use error::ScanError;
pub use models::{Candle, CandleSeries, CandleWindow, RawSignal, ScanResult};
pub use patterns::{PatternRecognizer, Recognition, RecognitionDelegate};
pub use scanner::{PatternBreakdown, ScanConfig, ScanCoordinator, ScanOutcome};
pub use scoring::{ConfidenceScorer, RecommendationEngine};
pub use summary::{ConfidenceBuckets, ScanSummary, SummaryAggregator};
