use crate::{compute_shuffled_index, Error, MAX_SHUFFLE_LIST_SIZE};

/// Shuffles (or un-shuffles, when `forwards == false`) every position of `input` under one
/// seed/round schedule.
///
/// Built on top of [`compute_shuffled_index`] rather than the windowed swap-pass variant: still
/// `O(rounds * n)`, just without the amortization across the 256-index position window. Good
/// enough while committees are re-derived at most once per epoch per committee; revisit if
/// profiling ever shows this on a hot path.
pub fn shuffle_list(
    input: Vec<usize>,
    rounds: u8,
    seed: &[u8; 32],
    forwards: bool,
) -> Result<Vec<usize>, Error> {
    let list_size = input.len();
    if list_size <= 1 || rounds == 0 {
        return Ok(input);
    }
    if list_size > MAX_SHUFFLE_LIST_SIZE {
        return Err(Error::ShuffleListOutOfBounds);
    }

    (0..list_size)
        .map(|i| compute_shuffled_index(i, list_size, seed, rounds, forwards).map(|j| input[j]))
        .collect()
}

/// Un-shuffle `input`, the inverse of [`shuffle_list`] with `forwards = true`.
pub fn unshuffle_list(input: Vec<usize>, rounds: u8, seed: &[u8; 32]) -> Result<Vec<usize>, Error> {
    shuffle_list(input, rounds, seed, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_is_a_permutation() {
        let input: Vec<usize> = (0..100).collect();
        let shuffled = shuffle_list(input.clone(), 90, &[3; 32], true).unwrap();
        let mut sorted = shuffled.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, input);
        assert_ne!(shuffled, input);
    }

    #[test]
    fn unshuffle_inverts_shuffle() {
        let input: Vec<usize> = (0..50).collect();
        let seed = [9u8; 32];
        let shuffled = shuffle_list(input.clone(), 90, &seed, true).unwrap();
        let restored = unshuffle_list(shuffled, 90, &seed).unwrap();
        assert_eq!(restored, input);
    }

    #[test]
    fn empty_and_singleton_are_identity() {
        assert_eq!(shuffle_list(vec![], 90, &[0; 32], true).unwrap(), Vec::<usize>::new());
        assert_eq!(shuffle_list(vec![5], 90, &[0; 32], true).unwrap(), vec![5]);
    }
}
