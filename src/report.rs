//! Human readable summaries printed by the command line tool.

use std::time::Duration;

use crate::SearchEstimate;

/// Elapsed time as `seconds:milliseconds:microseconds:nanoseconds`, each
/// field being the whole duration truncated to that unit.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!(
        "Elapsed time: {}:{}:{}:{}",
        elapsed.as_secs(),
        elapsed.as_millis(),
        elapsed.as_micros(),
        elapsed.as_nanos()
    )
}

/// Describe the size of a search space.
pub fn format_estimate(estimate: &SearchEstimate) -> String {
    match estimate.candidates {
        Some(n) => format!("{n} candidates (~2^{:.1})", estimate.log2_candidates),
        None => format!("~2^{:.1} candidates", estimate.log2_candidates),
    }
}
