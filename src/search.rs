//! Progress reporting, cancellation and cost estimates for the decode search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::permute::{candidate_count, log2_candidate_count};
use crate::Descriptor;

/// Snapshot of a running search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchStats {
    /// Candidates whose fingerprint has been computed so far.
    pub examined: u128,
    pub elapsed: Duration,
}

impl SearchStats {
    /// Candidates per second, zero before any time has elapsed.
    pub fn rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.examined as f64 / secs
        } else {
            0.0
        }
    }
}

/// Receives periodic snapshots while the decoder enumerates candidates.
pub trait Progress {
    fn report(&mut self, stats: &SearchStats);

    /// Called once when the search stops, whatever the outcome.
    fn finish(&mut self, _stats: &SearchStats) {}
}

/// Logs every snapshot through `tracing`.
#[derive(Debug, Default)]
pub struct TracingProgress;

impl Progress for TracingProgress {
    fn report(&mut self, stats: &SearchStats) {
        info!(
            examined = %stats.examined,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            rate = stats.rate() as u64,
            "searching"
        );
    }
}

/// Shared flag used to stop a running decode from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Advisory size of the candidate space for a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchEstimate {
    /// Exact `C(total_bits, set_bits)` when it fits in a `u128`.
    pub candidates: Option<u128>,
    pub log2_candidates: f64,
}

impl SearchEstimate {
    /// Whether the space is larger than `threshold` candidates.
    pub fn exceeds(&self, threshold: u128) -> bool {
        match self.candidates {
            Some(n) => n > threshold,
            None => true,
        }
    }
}

/// Estimate how many candidates a worst case decode of `descriptor` visits.
pub fn estimate(descriptor: &Descriptor) -> SearchEstimate {
    SearchEstimate {
        candidates: candidate_count(descriptor.total_bits, descriptor.set_bits),
        log2_candidates: log2_candidate_count(descriptor.total_bits, descriptor.set_bits),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn estimate_small_space() {
        let d = Descriptor::new(16, 8, 0).unwrap();
        let e = estimate(&d);
        assert_eq!(e.candidates, Some(12870));
        assert!(e.exceeds(12869));
        assert!(!e.exceeds(12870));
    }

    #[test]
    fn estimate_huge_space() {
        let d = Descriptor::new(1 << 16, 1 << 15, 0).unwrap();
        let e = estimate(&d);
        assert_eq!(e.candidates, None);
        assert!(e.exceeds(u128::MAX));
        assert!(e.log2_candidates > 65000.0);
    }

    #[test]
    fn rate_without_elapsed_time() {
        let s = SearchStats {
            examined: 10,
            elapsed: Duration::ZERO,
        };
        assert_eq!(s.rate(), 0.0);
    }
}
