use thiserror::Error;

/// Errors the scanning engine can surface to callers.
///
/// Per-unit problems (delegate failures, thin history, patterns missing
/// from a restricted catalog) are logged and folded into "no result"
/// instead; a scan only fails outright when it was given nothing to do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("no symbols supplied to the scan")]
    EmptyUniverse,

    #[error("no patterns supplied to the scan")]
    EmptyPatternSet,

    #[error("pattern '{0}' is not in the catalog")]
    UnsupportedPattern(String),
}
