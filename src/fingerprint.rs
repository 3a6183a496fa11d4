//! Order sensitive 64-bit fingerprint over a bit sequence.
//!
//! The fingerprint is the first eight bytes (little endian) of
//! `SHA-256(len_le64 || packed)`, where `len_le64` is the bit count as a
//! little-endian `u64` and `packed` is the sequence re-packed LSB first, bit
//! `i` landing in byte `i / 8` at position `i % 8`. A trailing partial byte is
//! zero padded, although encoder and decoder only ever hash byte aligned
//! sequences.
//!
//! The fingerprint is the only check performed during decode. Two different
//! arrangements that collide are indistinguishable and the first one in
//! enumeration order wins.

use crate::bits::pack_byte;
use sha2::{Digest, Sha256};

const CHUNK: usize = 64;

/// Hash the bit sequence.
pub fn fingerprint(bits: &[bool]) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update((bits.len() as u64).to_le_bytes());

    let mut buf = [0u8; CHUNK];
    let mut used = 0usize;
    for chunk in bits.chunks(8) {
        buf[used] = pack_byte(chunk);
        used += 1;
        if used == CHUNK {
            hasher.update(buf);
            used = 0;
        }
    }
    hasher.update(&buf[..used]);

    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::pack;

    /// Same value computed straight from bytes, to pin the packing order.
    fn fingerprint_bytes(bytes: &[u8]) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(((bytes.len() as u64) * 8).to_le_bytes());
        hasher.update(bytes);
        let digest = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(head)
    }

    #[test]
    fn deterministic() {
        let bits = pack(b"abc");
        assert_eq!(fingerprint(&bits), fingerprint(&bits));
    }

    #[test]
    fn matches_byte_shortcut() {
        for data in [&b""[..], b"\x00", b"hello world", &[0xA5; 200][..]] {
            assert_eq!(fingerprint(&pack(data)), fingerprint_bytes(data));
        }
    }

    #[test]
    fn position_sensitive() {
        let a = pack(&[0b0000_0001]);
        let b = pack(&[0b1000_0000]);
        assert_ne!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn length_sensitive() {
        assert_ne!(fingerprint(&[]), fingerprint(&[false; 8]));
        assert_ne!(fingerprint(&[false; 8]), fingerprint(&[false; 16]));
    }
}
