// Module exports
mod coordinator;

// Public exports
pub use coordinator::{PatternBreakdown, ScanConfig, ScanCoordinator, ScanOutcome};
