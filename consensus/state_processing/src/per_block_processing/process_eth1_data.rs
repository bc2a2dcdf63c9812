use crate::errors::Error;
use safe_arith::SafeArith;
use types::{BeaconState, ChainSpec, Eth1Data, EthSpec};

/// Record the block's eth1 vote and, once more than half of the votes in the whole voting
/// period agree on it, adopt it as `state.eth1_data`. The denominator is the fixed length of
/// the period, not however many votes have landed so far, so a data point can only win in the
/// second half of its period at the earliest.
pub fn process_eth1_data<E: EthSpec>(
    state: &mut BeaconState<E>,
    eth1_data: &Eth1Data,
    spec: &ChainSpec,
) -> Result<(), Error> {
    state
        .eth1_data_votes
        .push(eth1_data.clone())
        .map_err(|_| Error::MaxOperationsExceeded)?;

    let votes_for_this_data = state
        .eth1_data_votes
        .iter()
        .filter(|vote| *vote == eth1_data)
        .count() as u64;

    let slots_per_voting_period = spec.epochs_per_eth1_voting_period.safe_mul(spec.slots_per_epoch)?;

    if votes_for_this_data.safe_mul(2)? > slots_per_voting_period {
        state.eth1_data = eth1_data.clone();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::genesis_state;
    use types::Hash256;

    fn vote(block_hash: u8) -> Eth1Data {
        Eth1Data {
            deposit_root: Hash256::zero(),
            deposit_count: 0,
            block_hash: Hash256::new([block_hash; 32]),
        }
    }

    #[test]
    fn adopts_eth1_data_only_once_majority_of_the_full_period_agrees() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        // `MinimalEthSpec`'s `eth1_data_votes` bound is exactly
        // `epochs_per_eth1_voting_period * slots_per_epoch` (16), so this test's total vote
        // count must stay within that to avoid tripping `MaxOperationsExceeded` itself.
        let slots_per_voting_period = spec.epochs_per_eth1_voting_period * spec.slots_per_epoch;
        assert_eq!(slots_per_voting_period, 16);
        let candidate = vote(1);
        let other = vote(2);

        // A handful of votes for something else first; they don't count towards `candidate`'s
        // majority, and a growing-denominator bug would have made them count against it.
        for _ in 0..7 {
            process_eth1_data(&mut state, &other, &spec).unwrap();
        }

        // Exactly half the fixed period length voting for `candidate` must not be enough yet.
        for _ in 0..slots_per_voting_period / 2 {
            process_eth1_data(&mut state, &candidate, &spec).unwrap();
        }
        assert_eq!(state.eth1_data, Eth1Data::default());

        // One more vote crosses more-than-half of the fixed period length.
        process_eth1_data(&mut state, &candidate, &spec).unwrap();
        assert_eq!(state.eth1_data, candidate);
    }
}
