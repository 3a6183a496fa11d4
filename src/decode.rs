//! Reconstruct the original bytes from a descriptor by walking every
//! arrangement of its set bits until one matches the stored fingerprint.
//!
//! Cost grows with `C(total_bits, set_bits)`; see [`crate::estimate`].

use std::time::Instant;

use tracing::debug;

use crate::bits::unpack;
use crate::fingerprint::fingerprint;
use crate::permute::{first, next};
use crate::search::{CancelToken, Progress, SearchStats, TracingProgress};
use crate::{Config, Descriptor, SorensenError};

pub struct Decoder {
    config: Config,
    progress: Box<dyn Progress>,
    cancel: Option<CancelToken>,
}

impl Decoder {
    /// A decoder that reports progress through `tracing`.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            progress: Box::new(TracingProgress),
            cancel: None,
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn Progress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Search for the arrangement whose fingerprint matches `descriptor`.
    ///
    /// Returns the full byte stream or an error; nothing partial is ever
    /// produced.
    pub fn decode(&mut self, descriptor: &Descriptor) -> Result<Vec<u8>, SorensenError> {
        self.config.validate()?;
        descriptor.validate()?;

        let start = Instant::now();
        let interval = self.config.progress_interval as u128;
        let mut examined: u128 = 0;
        let mut candidate = first(descriptor.total_bits, descriptor.set_bits)?;
        debug!(
            total_bits = descriptor.total_bits,
            set_bits = descriptor.set_bits,
            "starting search"
        );

        let outcome = loop {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                break Err(SorensenError::Cancelled { examined });
            }
            if let Some(limit) = self.config.candidate_limit {
                if examined >= limit {
                    break Err(SorensenError::LimitExceeded { limit });
                }
            }

            examined += 1;
            if fingerprint(candidate.bits()) == descriptor.fingerprint {
                break Ok(candidate);
            }
            if interval > 0 && examined % interval == 0 {
                self.progress.report(&SearchStats {
                    examined,
                    elapsed: start.elapsed(),
                });
            }

            candidate = match next(candidate) {
                Some(c) => c,
                None => {
                    break Err(SorensenError::NotFound {
                        total_bits: descriptor.total_bits,
                        set_bits: descriptor.set_bits,
                        examined,
                    })
                }
            };
        };

        let stats = SearchStats {
            examined,
            elapsed: start.elapsed(),
        };
        self.progress.finish(&stats);
        debug!(examined = %examined, elapsed_ms = stats.elapsed.as_millis() as u64, ok = outcome.is_ok(), "search finished");

        unpack(&outcome?.into_bits())
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Decode with the default configuration.
pub fn decode(descriptor: &Descriptor) -> Result<Vec<u8>, SorensenError> {
    Decoder::default().decode(descriptor)
}

/// Parse a persisted record and decode it.
pub fn decode_record(record: &[u8]) -> Result<Vec<u8>, SorensenError> {
    decode(&Descriptor::from_bytes(record)?)
}
