//! The "swap or not" shuffle: a deterministic permutation of `[0, index_count)` driven by a
//! 32-byte seed, used to derive committees and the block proposer from the active validator set.
//!
//! See Naor's "Swap-or-not shuffles" (https://link.springer.com/content/pdf/10.1007%2F978-3-642-32009-5_1.pdf),
//! "generalized domain" construction on page 3.

use ethereum_hashing::hash;
use std::cmp::max;

mod shuffle_list;

pub use shuffle_list::shuffle_list;

/// Upper bound on `index_count`; larger lists would overflow the position encoding used in the
/// round-hash buffer.
pub const MAX_SHUFFLE_LIST_SIZE: usize = 1 << 31;

const SEED_SIZE: usize = 32;
const ROUND_SIZE: usize = 1;
const POSITION_WINDOW_SIZE: usize = 4;
const PIVOT_VIEW_SIZE: usize = SEED_SIZE + ROUND_SIZE;
const TOTAL_SIZE: usize = SEED_SIZE + ROUND_SIZE + POSITION_WINDOW_SIZE;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// `index >= index_count`.
    IndexOutOfBounds,
    /// `index_count > MAX_SHUFFLE_LIST_SIZE` (or zero, which admits no valid index).
    ShuffleListOutOfBounds,
}

/// Shuffles `index` using `seed` and `rounds` rounds of the swap-or-not permutation.
///
/// Set `forwards` to `true` to shuffle, `false` to un-shuffle (run the rounds in reverse).
pub fn compute_shuffled_index(
    index: usize,
    index_count: usize,
    seed: &[u8; 32],
    rounds: u8,
    forwards: bool,
) -> Result<usize, Error> {
    if index >= index_count {
        return Err(Error::IndexOutOfBounds);
    }
    if index_count == 0 || index_count > MAX_SHUFFLE_LIST_SIZE {
        return Err(Error::ShuffleListOutOfBounds);
    }

    let mut index = index;
    let mut buf = [0u8; TOTAL_SIZE];
    buf[..SEED_SIZE].copy_from_slice(seed);

    let round_range: Box<dyn Iterator<Item = u8>> = if forwards {
        Box::new(0..rounds)
    } else {
        Box::new((0..rounds).rev())
    };

    for round in round_range {
        buf[SEED_SIZE] = round;

        let pivot_hash = hash(&buf[..PIVOT_VIEW_SIZE]);
        let pivot = bytes_to_u64(&pivot_hash[..8]) as usize % index_count;

        let flip = (pivot + index_count - index) % index_count;
        let position = max(index, flip);

        buf[PIVOT_VIEW_SIZE..].copy_from_slice(&((position >> 8) as u32).to_le_bytes());
        let source = hash(&buf[..]);

        let byte = source[(position % 256) / 8];
        let bit = (byte >> (position % 8)) & 1;

        if bit == 1 {
            index = flip;
        }
    }

    Ok(index)
}

fn bytes_to_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_index_count_errors() {
        assert_eq!(
            compute_shuffled_index(0, 0, &[0; 32], 90, true),
            Err(Error::ShuffleListOutOfBounds)
        );
    }

    #[test]
    fn out_of_bounds_index_errors() {
        assert_eq!(
            compute_shuffled_index(10, 10, &[0; 32], 90, true),
            Err(Error::IndexOutOfBounds)
        );
    }

    #[test]
    fn zero_rounds_is_identity() {
        for i in 0..16 {
            assert_eq!(
                compute_shuffled_index(i, 16, &[42; 32], 0, true),
                Ok(i)
            );
        }
    }

    #[test]
    fn forwards_then_backwards_is_identity() {
        let seed = [7u8; 32];
        for i in 0..32 {
            let shuffled = compute_shuffled_index(i, 32, &seed, 90, true).unwrap();
            let restored = compute_shuffled_index(shuffled, 32, &seed, 90, false).unwrap();
            assert_eq!(restored, i);
        }
    }

    #[quickcheck_macros::quickcheck]
    fn round_trips_for_arbitrary_seed(seed_byte: u8, list_size: u8) -> bool {
        let list_size = (list_size as usize % 64) + 1;
        let seed = [seed_byte; 32];
        (0..list_size).all(|i| {
            let shuffled = compute_shuffled_index(i, list_size, &seed, 90, true).unwrap();
            compute_shuffled_index(shuffled, list_size, &seed, 90, false).unwrap() == i
        })
    }

    /// A known-answer vector, computed independently from the same pivot/flip/byte construction
    /// this module implements (mainnet `SHUFFLE_ROUND_COUNT` = 90). Round-trip tests alone can't
    /// catch a consistent direction bug (`unshuffle(shuffle(x)) == x` holds regardless of which
    /// way "forwards" actually permutes), which is exactly the kind of mistake that let a caller
    /// pass `forwards = false` expecting the canonical ordering and not notice.
    #[test]
    fn matches_the_canonical_mainnet_shuffle_vector() {
        let seed = [0x42u8; 32];
        let count = 10;
        let rounds = 90;
        let expected = [5usize, 2, 7, 4, 1, 3, 0, 6, 9, 8];

        for (i, &want) in expected.iter().enumerate() {
            assert_eq!(compute_shuffled_index(i, count, &seed, rounds, true).unwrap(), want);
        }

        let positions: Vec<usize> = (0..count).collect();
        let shuffled = shuffle_list(positions, rounds, &seed, true).unwrap();
        assert_eq!(shuffled, expected.to_vec());
    }

    /// Same check at the `SHUFFLE_ROUND_COUNT` used for the minimal preset (10 rounds), with a
    /// different seed and list size, so the vector above isn't the only shape being checked.
    #[test]
    fn matches_the_canonical_minimal_shuffle_vector() {
        let mut seed = [0u8; 32];
        for (i, b) in seed.iter_mut().enumerate() {
            *b = i as u8;
        }
        let count = 8;
        let rounds = 10;
        let expected = [2usize, 7, 3, 0, 5, 1, 4, 6];

        for (i, &want) in expected.iter().enumerate() {
            assert_eq!(compute_shuffled_index(i, count, &seed, rounds, true).unwrap(), want);
        }
    }
}
