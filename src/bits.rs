//! Conversion between bytes and bit sequences.
//!
//! Bits are emitted least significant first: bit index `8 * n + i` of the
//! sequence holds `(bytes[n] >> i) & 1`.

use crate::SorensenError;

/// Expand `bytes` into one boolean per bit, LSB first within each byte.
pub fn pack(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for i in 0..8 {
            bits.push((byte >> i) & 1 != 0);
        }
    }
    bits
}

/// Collapse a byte aligned bit sequence back into bytes.
pub fn unpack(bits: &[bool]) -> Result<Vec<u8>, SorensenError> {
    if bits.len() % 8 != 0 {
        return Err(SorensenError::Length(bits.len()));
    }
    Ok(bits.chunks_exact(8).map(pack_byte).collect())
}

/// Number of set bits in the sequence.
pub fn count_ones(bits: &[bool]) -> u64 {
    bits.iter().filter(|&&b| b).count() as u64
}

#[inline]
pub(crate) fn pack_byte(chunk: &[bool]) -> u8 {
    chunk
        .iter()
        .enumerate()
        .fold(0u8, |acc, (i, &b)| acc | ((b as u8) << i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn lsb_first_order() {
        let bits = pack(&[0b0000_0101]);
        assert_eq!(
            bits,
            vec![true, false, true, false, false, false, false, false]
        );
    }

    #[test]
    fn unpack_rejects_unaligned() {
        let err = unpack(&[true; 7]).unwrap_err();
        assert!(matches!(err, SorensenError::Length(7)));
    }

    #[test]
    fn empty_input() {
        assert!(pack(&[]).is_empty());
        assert!(unpack(&[]).unwrap().is_empty());
    }

    #[test]
    fn counts_ones() {
        assert_eq!(count_ones(&pack(&[0xFF, 0x01, 0x00])), 9);
    }

    quickcheck! {
        fn prop_unpack_inverts_pack(data: Vec<u8>) -> bool {
            unpack(&pack(&data)).unwrap() == data
        }

        fn prop_popcount_matches(data: Vec<u8>) -> bool {
            let expected: u64 = data.iter().map(|b| b.count_ones() as u64).sum();
            count_ones(&pack(&data)) == expected
        }
    }
}
