use crate::SorensenError;

/// Runtime configuration parameters for the decoder and the command line tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Candidates examined between two progress reports. Zero disables reporting.
    pub progress_interval: u64,
    /// Optional hard budget on the number of candidates examined.
    pub candidate_limit: Option<u128>,
    /// Search-space size above which the CLI asks before decoding.
    pub confirm_above: u128,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            progress_interval: 1 << 20,
            candidate_limit: None,
            confirm_above: 1 << 24,
        }
    }
}

impl Config {
    /// Reject settings that would make every decode fail before it starts.
    pub fn validate(&self) -> Result<(), SorensenError> {
        if self.candidate_limit == Some(0) {
            return Err(SorensenError::Config(
                "candidate limit must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
