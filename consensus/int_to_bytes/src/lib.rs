//! Little-endian integer/byte conversions used throughout SSZ-adjacent consensus code.
//!
//! Mirrors the `int_to_bytes` / `bytes_to_int` helpers from the phase-0 pseudocode: every
//! multi-byte integer appearing in a domain, seed, or shuffle position is little-endian.

use bytes::{BufMut, BytesMut};

macro_rules! define_int_to_bytes {
    ($name: ident, $type: ty) => {
        /// Encode `int` into exactly `length` little-endian bytes. Panics if the value
        /// doesn't fit.
        pub fn $name(int: $type, length: usize) -> Vec<u8> {
            let type_bytes = std::mem::size_of::<$type>();
            assert!(length <= type_bytes);

            let mut bytes = BytesMut::with_capacity(length);
            bytes.put_uint_le(int as u64, length);
            bytes.into_iter().collect()
        }
    };
}

define_int_to_bytes!(int_to_bytes1, u8);
define_int_to_bytes!(int_to_bytes2, u16);
define_int_to_bytes!(int_to_bytes4, u32);
define_int_to_bytes!(int_to_bytes8, u64);

/// Encode a `u64` into a fixed 32-byte little-endian buffer (zero-padded).
pub fn int_to_bytes32(int: u64) -> Vec<u8> {
    let mut bytes = vec![0; 32];
    bytes[0..8].copy_from_slice(&int.to_le_bytes());
    bytes
}

/// Decode up to 8 little-endian bytes into a `u64`. Panics if `bytes.len() > 8`.
pub fn bytes_to_int(bytes: &[u8]) -> u64 {
    assert!(bytes.len() <= 8);
    let mut buf = [0u8; 8];
    buf[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_to_bytes4_round_trips() {
        assert_eq!(int_to_bytes4(0), vec![0; 4]);
        assert_eq!(int_to_bytes4(1), vec![1, 0, 0, 0]);
        assert_eq!(int_to_bytes4(u32::MAX), vec![255, 255, 255, 255]);
    }

    #[test]
    fn int_to_bytes8_matches_bytes_to_int() {
        for value in [0u64, 1, 42, u32::MAX as u64, u64::MAX] {
            let bytes = int_to_bytes8(value, 8);
            assert_eq!(bytes_to_int(&bytes), value);
        }
    }

    #[test]
    fn int_to_bytes32_zero_pads() {
        let bytes = int_to_bytes32(7);
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[0..8], &7u64.to_le_bytes());
        assert!(bytes[8..].iter().all(|&b| b == 0));
    }
}
