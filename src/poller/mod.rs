//! Poll loop module
//!
//! Drives quote fetches, level evaluation and alert delivery on a fixed cadence.

mod manager;
mod metrics;

pub use manager::PollLoop;
pub use metrics::PollMetrics;

/// Per-symbol counts for a cycle whose batch fetch succeeded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    /// Symbols passed to the level tracker
    pub evaluated: usize,
    /// Alerts sent
    pub alerted: usize,
    /// Symbols absent from the batch or without a usable price
    pub missing: usize,
    /// Symbols whose entry could not be decoded
    pub malformed: usize,
}

/// What happened in one poll cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Batch fetched; symbols processed individually
    Processed(CycleSummary),
    /// Batch fetch failed (network, upstream status, decoding)
    FetchFailed,
    /// Quote API rejected the access token
    Unauthorized,
}
