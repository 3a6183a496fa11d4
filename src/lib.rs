//! Fingerprint based bit-count codec.
//!
//! [`encode`] reduces a byte stream to a [`Descriptor`]: its bit count, its
//! set-bit count and a 64-bit fingerprint. [`decode`] rebuilds the stream by
//! enumerating every arrangement of that many set bits in lexicographic order
//! until one has the stored fingerprint. Decoding cost grows with
//! `C(total_bits, set_bits)` and output is not guaranteed to be smaller than
//! input; this is not a general purpose compressor.

pub mod bits;
pub mod config;
pub mod decode;
pub mod descriptor;
pub mod encode;
pub mod error;
pub mod fingerprint;
pub mod io_utils;
pub mod permute;
pub mod report;
pub mod search;

pub use bits::{count_ones, pack, unpack};
pub use config::Config;
pub use decode::{decode, decode_record, Decoder};
pub use descriptor::{Descriptor, DESCRIPTOR_SIZE};
pub use encode::{encode, encode_bytes};
pub use error::{Result, SorensenError};
pub use fingerprint::fingerprint;
pub use permute::{candidate_count, first, next, permutations, Candidate, Permutations};
pub use search::{estimate, CancelToken, Progress, SearchEstimate, SearchStats, TracingProgress};
