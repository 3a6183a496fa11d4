//! Fixed 24 byte record produced by compression.
//!
//! Layout, native endian, no padding:
//!
//! ```text
//! offset  0  total_bits   u64
//! offset  8  set_bits     u64
//! offset 16  fingerprint  u64
//! ```

use bytemuck::{Pod, Zeroable};
use serde::Serialize;
use std::io::{Read, Write};

use crate::SorensenError;

/// Size of an encoded descriptor in bytes.
pub const DESCRIPTOR_SIZE: usize = std::mem::size_of::<Descriptor>();

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable, Serialize)]
pub struct Descriptor {
    /// Length of the original bit sequence. Always a multiple of 8.
    pub total_bits: u64,
    /// Number of one bits in the original sequence.
    pub set_bits: u64,
    /// Fingerprint of the original sequence.
    pub fingerprint: u64,
}

impl Descriptor {
    /// Build a descriptor, rejecting counts the encoder can never produce.
    pub fn new(total_bits: u64, set_bits: u64, fingerprint: u64) -> Result<Self, SorensenError> {
        let d = Self {
            total_bits,
            set_bits,
            fingerprint,
        };
        d.validate()?;
        Ok(d)
    }

    pub fn validate(&self) -> Result<(), SorensenError> {
        if self.total_bits % 8 != 0 {
            return Err(SorensenError::Format(format!(
                "total bit count {} is not byte aligned",
                self.total_bits
            )));
        }
        if self.set_bits > self.total_bits {
            return Err(SorensenError::Format(format!(
                "set bit count {} exceeds total bit count {}",
                self.set_bits, self.total_bits
            )));
        }
        Ok(())
    }

    /// Number of bytes the decoded output will contain.
    pub fn byte_len(&self) -> u64 {
        self.total_bits / 8
    }

    pub fn to_bytes(&self) -> [u8; DESCRIPTOR_SIZE] {
        let mut out = [0u8; DESCRIPTOR_SIZE];
        out.copy_from_slice(bytemuck::bytes_of(self));
        out
    }

    /// Parse a persisted record. Anything other than exactly
    /// [`DESCRIPTOR_SIZE`] bytes is treated as corruption.
    pub fn from_bytes(data: &[u8]) -> Result<Self, SorensenError> {
        if data.len() != DESCRIPTOR_SIZE {
            return Err(SorensenError::Format(format!(
                "descriptor must be exactly {DESCRIPTOR_SIZE} bytes, found {}",
                data.len()
            )));
        }
        let d: Descriptor = bytemuck::pod_read_unaligned(data);
        d.validate()?;
        Ok(d)
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), SorensenError> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Read a descriptor, consuming the reader to the end so trailing bytes
    /// are detected.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self, SorensenError> {
        let mut buf = Vec::with_capacity(DESCRIPTOR_SIZE);
        reader.read_to_end(&mut buf)?;
        Self::from_bytes(&buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_24_bytes() {
        assert_eq!(DESCRIPTOR_SIZE, 24);
    }

    #[test]
    fn native_endian_layout() {
        let d = Descriptor::new(16, 3, 0x0102_0304_0506_0708).unwrap();
        let raw = d.to_bytes();
        assert_eq!(raw[0..8], 16u64.to_ne_bytes());
        assert_eq!(raw[8..16], 3u64.to_ne_bytes());
        assert_eq!(raw[16..24], 0x0102_0304_0506_0708u64.to_ne_bytes());
        assert_eq!(Descriptor::from_bytes(&raw).unwrap(), d);
    }

    #[test]
    fn truncated_record_rejected() {
        let raw = Descriptor::new(8, 1, 42).unwrap().to_bytes();
        for len in 0..DESCRIPTOR_SIZE {
            assert!(matches!(
                Descriptor::from_bytes(&raw[..len]),
                Err(SorensenError::Format(_))
            ));
        }
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut raw = Descriptor::new(8, 1, 42).unwrap().to_bytes().to_vec();
        raw.push(0);
        assert!(Descriptor::read_from(&raw[..]).is_err());
    }

    #[test]
    fn impossible_counts_rejected() {
        assert!(Descriptor::new(8, 9, 0).is_err());
        assert!(Descriptor::new(7, 0, 0).is_err());
        let mut raw = [0u8; DESCRIPTOR_SIZE];
        raw[0..8].copy_from_slice(&8u64.to_ne_bytes());
        raw[8..16].copy_from_slice(&9u64.to_ne_bytes());
        assert!(matches!(
            Descriptor::from_bytes(&raw),
            Err(SorensenError::Format(_))
        ));
    }
}
