use std::io::Read;

use tracing::{debug, enabled, trace, Level};

use crate::bits::{count_ones, pack};
use crate::fingerprint::fingerprint;
use crate::{Descriptor, SorensenError};

/// Summarise `data` as a descriptor. The input bytes are not retained.
pub fn encode_bytes(data: &[u8]) -> Descriptor {
    if enabled!(Level::TRACE) {
        let mut running = 0u64;
        for (offset, &byte) in data.iter().enumerate() {
            running += byte.count_ones() as u64;
            trace!(
                offset,
                bits = %format!("{byte:08b}"),
                current = byte.count_ones(),
                total = running,
                "byte"
            );
        }
    }

    let bits = pack(data);
    let descriptor = Descriptor {
        total_bits: bits.len() as u64,
        set_bits: count_ones(&bits),
        fingerprint: fingerprint(&bits),
    };
    debug!(
        total_bits = descriptor.total_bits,
        set_bits = descriptor.set_bits,
        fingerprint = %format!("{:016x}", descriptor.fingerprint),
        "encoded"
    );
    descriptor
}

/// Read `reader` to exhaustion and summarise its contents.
pub fn encode<R: Read>(mut reader: R) -> Result<Descriptor, SorensenError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(encode_bytes(&data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn empty_input() {
        let d = encode_bytes(&[]);
        assert_eq!(d.total_bits, 0);
        assert_eq!(d.set_bits, 0);
    }

    #[test]
    fn counts_bits() {
        let d = encode_bytes(&[0xFF, 0x0F, 0x00]);
        assert_eq!(d.total_bits, 24);
        assert_eq!(d.set_bits, 12);
        assert!(d.validate().is_ok());
    }

    #[test]
    fn extremes() {
        let zeros = encode_bytes(&[0x00; 5]);
        assert_eq!(zeros.set_bits, 0);
        let ones = encode_bytes(&[0xFF; 5]);
        assert_eq!(ones.set_bits, ones.total_bits);
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn read_failure_is_io_error() {
        assert!(matches!(encode(Broken), Err(SorensenError::Io(_))));
    }

    #[test]
    fn trace_logging_does_not_change_result() {
        let data = [0x00, 0xF0, 0x81];
        let quiet = encode_bytes(&data);
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::TRACE)
            .with_test_writer()
            .finish();
        let traced = tracing::subscriber::with_default(subscriber, || encode_bytes(&data));
        assert_eq!(traced, quiet);
        assert_eq!(traced.set_bits, 6);
    }

    #[test]
    fn reader_and_slice_agree() {
        let data = b"sorensen".to_vec();
        assert_eq!(encode(&data[..]).unwrap(), encode_bytes(&data));
    }
}
