use thiserror::Error;

#[derive(Error, Debug)]
pub enum SorensenError {
    /// Propagated I/O error while reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted descriptor is malformed (wrong size or impossible counts).
    #[error("format error: {0}")]
    Format(String),

    /// A bit sequence handed to `unpack` was not byte aligned.
    #[error("bit sequence length {0} is not a multiple of 8")]
    Length(usize),

    /// Every arrangement was visited without a fingerprint match.
    #[error("no arrangement of {set_bits} set bits in {total_bits} bits matches the fingerprint ({examined} candidates examined)")]
    NotFound {
        total_bits: u64,
        set_bits: u64,
        examined: u128,
    },

    /// The search was interrupted through its cancel token.
    #[error("decode cancelled after {examined} candidates")]
    Cancelled { examined: u128 },

    /// The configured candidate budget ran out before a match.
    #[error("candidate limit of {limit} reached without a match")]
    LimitExceeded { limit: u128 },

    /// A candidate of the requested length cannot be held in memory.
    #[error("cannot hold a {total_bits} bit candidate: {reason}")]
    Resource { total_bits: u64, reason: String },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SorensenError>;
