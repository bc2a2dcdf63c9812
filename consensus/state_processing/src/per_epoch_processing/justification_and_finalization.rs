use crate::common::get_matching_target_attestations;
use crate::common::get_unslashed_attesting_indices;
use crate::errors::Error;
use ssz_types::BitVector;
use types::{BeaconState, ChainSpec, Checkpoint, EthSpec};

/// Two-thirds-supermajority FFG justification, plus the four finalization rules the phase-0
/// fork-choice relies on to know when a checkpoint can never be reverted.
pub fn process_justification_and_finalization<E: EthSpec>(
    state: &mut BeaconState<E>,
    spec: &ChainSpec,
) -> Result<(), Error> {
    let current_epoch = state.current_epoch();
    if current_epoch.as_u64() <= spec.genesis_epoch.as_u64() + 1 {
        return Ok(());
    }
    let previous_epoch = state.previous_epoch();

    let old_previous_justified_checkpoint = state.previous_justified_checkpoint;
    let old_current_justified_checkpoint = state.current_justified_checkpoint;

    state.previous_justified_checkpoint = state.current_justified_checkpoint;
    shift_justification_bits(state)?;

    let total_active_balance = state.get_total_active_balance(spec)?;

    let previous_target_attestations = get_matching_target_attestations(state, previous_epoch)?;
    let previous_attesting_balance = state.get_total_balance(
        &get_unslashed_attesting_indices(state, &previous_target_attestations, spec)?,
        spec,
    )?;
    if previous_attesting_balance.safe_mul_u128(3)? >= total_active_balance.safe_mul_u128(2)? {
        state.current_justified_checkpoint = Checkpoint {
            epoch: previous_epoch,
            root: *state.get_block_root(previous_epoch)?,
        };
        set_bit(state, 1, true)?;
    }

    let current_target_attestations = get_matching_target_attestations(state, current_epoch)?;
    let current_attesting_balance = state.get_total_balance(
        &get_unslashed_attesting_indices(state, &current_target_attestations, spec)?,
        spec,
    )?;
    if current_attesting_balance.safe_mul_u128(3)? >= total_active_balance.safe_mul_u128(2)? {
        state.current_justified_checkpoint = Checkpoint {
            epoch: current_epoch,
            root: *state.get_block_root(current_epoch)?,
        };
        set_bit(state, 0, true)?;
    }

    let bits = bits_array(&state.justification_bits);

    if bits[1] && bits[2] && bits[3] && old_previous_justified_checkpoint.epoch.safe_add(3)? == current_epoch
    {
        state.finalized_checkpoint = old_previous_justified_checkpoint;
    }
    if bits[1] && bits[2] && old_previous_justified_checkpoint.epoch.safe_add(2)? == current_epoch {
        state.finalized_checkpoint = old_previous_justified_checkpoint;
    }
    if bits[0] && bits[1] && bits[2] && old_current_justified_checkpoint.epoch.safe_add(2)? == current_epoch
    {
        state.finalized_checkpoint = old_current_justified_checkpoint;
    }
    if bits[0] && bits[1] && old_current_justified_checkpoint.epoch.safe_add(1)? == current_epoch {
        state.finalized_checkpoint = old_current_justified_checkpoint;
    }

    Ok(())
}

fn bits_array(bits: &BitVector<ssz_types::typenum::U4>) -> [bool; 4] {
    [
        bits.get(0).unwrap_or(false),
        bits.get(1).unwrap_or(false),
        bits.get(2).unwrap_or(false),
        bits.get(3).unwrap_or(false),
    ]
}

fn set_bit<E: EthSpec>(state: &mut BeaconState<E>, index: usize, value: bool) -> Result<(), Error> {
    state
        .justification_bits
        .set(index, value)
        .map_err(|_| Error::ShuffleBounds)
}

/// Shift the bitfield one slot towards the past (`bits[1:] = bits[:3]`) and zero the newest bit,
/// making room for this epoch's own justification votes.
fn shift_justification_bits<E: EthSpec>(state: &mut BeaconState<E>) -> Result<(), Error> {
    let previous = bits_array(&state.justification_bits);
    set_bit(state, 3, previous[2])?;
    set_bit(state, 2, previous[1])?;
    set_bit(state, 1, previous[0])?;
    set_bit(state, 0, false)?;
    Ok(())
}

/// The 3x/2x supermajority check needs headroom past `u64`; both sides fit comfortably in
/// `u128` since balances are bounded by the validator set size times `MAX_EFFECTIVE_BALANCE`.
trait SafeMulU128 {
    fn safe_mul_u128(self, other: u64) -> Result<u128, Error>;
}

impl SafeMulU128 for u64 {
    fn safe_mul_u128(self, other: u64) -> Result<u128, Error> {
        Ok(self as u128 * other as u128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{genesis_state, E};
    use types::{ChainSpec, Epoch, Hash256, PendingAttestation};

    #[test]
    fn shift_justification_bits_rotates_towards_the_past() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        set_bit(&mut state, 0, true).unwrap();
        set_bit(&mut state, 1, true).unwrap();

        shift_justification_bits(&mut state).unwrap();

        let bits = bits_array(&state.justification_bits);
        assert_eq!(bits, [false, true, true, false]);
    }

    #[test]
    fn skips_before_genesis_plus_two() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        state.slot = Epoch::new(1).start_slot(E::slots_per_epoch());

        let before = state.clone();
        process_justification_and_finalization(&mut state, &spec).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn supermajority_target_attestations_justify_previous_epoch() {
        let spec = ChainSpec::minimal();
        let num_validators = 8;
        let mut state = genesis_state(&spec, num_validators);
        // Land on the third epoch so `current_epoch > GENESIS_EPOCH + 1` and a previous-epoch
        // pool actually exists to inspect.
        state.slot = Epoch::new(2).start_slot(E::slots_per_epoch());
        let previous_epoch = state.previous_epoch();
        let target_root = *state.get_block_root(previous_epoch).unwrap();

        // One fully-attesting `PendingAttestation` per slot of the epoch, so the whole active
        // set (spread across each slot's committee) ends up represented.
        for slot_offset in 0..E::slots_per_epoch() {
            let slot = types::Slot::new(previous_epoch.start_slot(E::slots_per_epoch()).as_u64() + slot_offset);
            let committee_len = state.get_beacon_committee(slot, 0, &spec).unwrap().len();
            let data = types::AttestationData {
                slot,
                index: 0,
                beacon_block_root: Hash256::zero(),
                source: Checkpoint::default(),
                target: Checkpoint {
                    epoch: previous_epoch,
                    root: target_root,
                },
            };
            let mut aggregation_bits = ssz_types::BitList::with_capacity(committee_len).unwrap();
            for i in 0..committee_len {
                aggregation_bits.set(i, true).unwrap();
            }
            state
                .previous_epoch_attestations
                .push(PendingAttestation {
                    aggregation_bits,
                    data,
                    inclusion_delay: 1,
                    proposer_index: 0,
                })
                .unwrap();
        }

        process_justification_and_finalization(&mut state, &spec).unwrap();

        assert_eq!(state.current_justified_checkpoint.epoch, previous_epoch);
        assert!(bits_array(&state.justification_bits)[1]);
    }
}
