use crate::errors::Error;
use safe_arith::SafeArith;
use types::{BeaconState, ChainSpec, EthSpec, HistoricalBatch};

/// The housekeeping that runs at the very end of every epoch transition: reset the eth1 vote
/// tally on voting-period boundaries, apply hysteresis to effective balances, roll the
/// slashings and RANDAO ring buffers forward, archive a historical batch when the retained
/// window rolls over, and rotate the attestation pools.
pub fn process_final_updates<E: EthSpec>(
    state: &mut BeaconState<E>,
    spec: &ChainSpec,
) -> Result<(), Error> {
    let current_epoch = state.current_epoch();
    let next_epoch = state.next_epoch()?;

    if next_epoch.as_u64() % spec.epochs_per_eth1_voting_period == 0 {
        state.eth1_data_votes = Default::default();
    }

    process_effective_balance_updates(state, spec)?;

    let slashings_index = (next_epoch.as_u64() % E::epochs_per_slashings_vector() as u64) as usize;
    if let Some(slot) = state.slashings.get_mut(slashings_index) {
        *slot = 0;
    }

    let mix = *state.get_randao_mix(current_epoch)?;
    let mix_index = (next_epoch.as_u64() % E::epochs_per_historical_vector() as u64) as usize;
    if let Some(slot) = state.randao_mixes.get_mut(mix_index) {
        *slot = mix;
    }

    let epochs_per_historical_root = E::slots_per_historical_root() as u64 / E::slots_per_epoch();
    if next_epoch.as_u64() % epochs_per_historical_root == 0 {
        let batch = HistoricalBatch::<E> {
            block_roots: state.block_roots.clone(),
            state_roots: state.state_roots.clone(),
        };
        state
            .historical_roots
            .push(types::tree_hash_root(&batch))
            .map_err(|_| Error::MaxOperationsExceeded)?;
    }

    state.previous_epoch_attestations = std::mem::take(&mut state.current_epoch_attestations);
    state.current_epoch_attestations = Default::default();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::genesis_state;

    #[test]
    fn rotates_current_epoch_attestations_into_previous_and_clears_current() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        let committee = state.get_beacon_committee(types::Slot::new(0), 0, &spec).unwrap();
        let mut aggregation_bits = ssz_types::BitList::with_capacity(committee.len()).unwrap();
        aggregation_bits.set(0, true).unwrap();
        state
            .current_epoch_attestations
            .push(types::PendingAttestation {
                aggregation_bits,
                data: types::AttestationData {
                    slot: types::Slot::new(0),
                    index: 0,
                    beacon_block_root: types::Hash256::zero(),
                    source: types::Checkpoint::default(),
                    target: types::Checkpoint::default(),
                },
                inclusion_delay: 1,
                proposer_index: 0,
            })
            .unwrap();

        process_final_updates(&mut state, &spec).unwrap();

        assert_eq!(state.previous_epoch_attestations.len(), 1);
        assert!(state.current_epoch_attestations.is_empty());
    }

    #[test]
    fn bumps_an_underweight_validator_down_to_its_rounded_balance() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        let drop = spec.effective_balance_increment * 2;
        *state.balances.get_mut(0).unwrap() = spec.max_effective_balance - drop;

        process_final_updates(&mut state, &spec).unwrap();

        let expected = spec.max_effective_balance - drop;
        assert_eq!(state.validators.get(0).unwrap().effective_balance, expected);
    }
}

fn process_effective_balance_updates<E: EthSpec>(
    state: &mut BeaconState<E>,
    spec: &ChainSpec,
) -> Result<(), Error> {
    let hysteresis_increment = spec.effective_balance_increment.safe_div(spec.hysteresis_quotient)?;
    let downward_threshold = hysteresis_increment.safe_mul(spec.hysteresis_downward_multiplier)?;
    let upward_threshold = hysteresis_increment.safe_mul(spec.hysteresis_upward_multiplier)?;

    for index in 0..state.validators.len() {
        let balance = *state.balances.get(index).ok_or(Error::ShuffleBounds)?;
        let effective_balance = state
            .validators
            .get(index)
            .ok_or(types::BeaconStateError::UnknownValidator(index as u64))?
            .effective_balance;

        if balance.saturating_add(downward_threshold) < effective_balance
            || effective_balance.saturating_add(upward_threshold) < balance
        {
            let new_effective = (balance - balance % spec.effective_balance_increment)
                .min(spec.max_effective_balance);
            if let Some(validator) = state.validators.get_mut(index) {
                validator.effective_balance = new_effective;
            }
        }
    }
    Ok(())
}
