use crate::errors::Error;
use crate::per_epoch_processing::process_epoch;
use tracing::{debug, instrument};
use types::{tree_hash_root, BeaconState, ChainSpec, EthSpec, Hash256};

/// Advance `state` from its current slot up to (but not including) `target_slot`, running
/// `process_slot` once per slot crossed and `process_epoch` whenever the new slot starts a new
/// epoch. `target_slot` may equal `state.slot`, in which case this is a no-op.
#[instrument(level = "debug", skip_all)]
pub fn process_slots<E: EthSpec>(
    state: &mut BeaconState<E>,
    target_slot: types::Slot,
    spec: &ChainSpec,
) -> Result<(), Error> {
    if state.slot > target_slot {
        debug!(current = state.slot.as_u64(), target = target_slot.as_u64(), "slot did not progress");
        return Err(Error::NonProgressingSlot {
            block: target_slot.as_u64(),
            latest_header: state.slot.as_u64(),
        });
    }

    while state.slot < target_slot {
        process_slot(state)?;

        let next_slot = state.slot.safe_add(1)?;
        if next_slot.is_epoch_start(spec.slots_per_epoch) {
            process_epoch(state, spec)?;
        }
        state.slot = next_slot;
    }
    Ok(())
}

/// Cache the pre-transition state root into `state_roots`, backfilling it into
/// `latest_block_header.state_root` if the block that created this state left it zeroed, then
/// cache the (now-complete) header's root into `block_roots`.
fn process_slot<E: EthSpec>(state: &mut BeaconState<E>) -> Result<(), Error> {
    let previous_state_root = tree_hash_root(state);
    state.set_state_root(state.slot, previous_state_root)?;

    if state.latest_block_header.state_root == Hash256::zero() {
        state.latest_block_header.state_root = previous_state_root;
    }

    let previous_block_root = tree_hash_root(&state.latest_block_header);
    state.set_block_root(state.slot, previous_block_root)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{genesis_state, E};
    use types::ChainSpec;

    #[test]
    fn advancing_within_an_epoch_fills_roots_and_does_not_touch_justification() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        let before_bits = state.justification_bits;

        process_slots(&mut state, types::Slot::new(3), &spec).unwrap();

        assert_eq!(state.slot, types::Slot::new(3));
        assert_ne!(*state.state_roots.get(0).unwrap(), Hash256::zero());
        assert_ne!(*state.block_roots.get(0).unwrap(), Hash256::zero());
        assert_ne!(state.latest_block_header.state_root, Hash256::zero());
        assert_eq!(state.justification_bits, before_bits);
    }

    #[test]
    fn advancing_past_an_epoch_boundary_runs_epoch_processing() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);

        process_slots(&mut state, types::Slot::new(E::slots_per_epoch() as u64 + 1), &spec).unwrap();

        assert_eq!(state.slot.as_u64(), E::slots_per_epoch() as u64 + 1);
        // `process_epoch` ran at least once: the previous epoch's attestation pool was rotated
        // into the (still-empty) current pool and back out, so this just confirms no panic and
        // that the slot landed past the boundary rather than asserting internal bookkeeping.
    }

    #[test]
    fn rejects_a_target_slot_behind_the_current_one() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        state.slot = types::Slot::new(5);

        let err = process_slots(&mut state, types::Slot::new(4), &spec).unwrap_err();
        assert_eq!(
            err,
            Error::NonProgressingSlot {
                block: 4,
                latest_header: 5,
            }
        );
    }
}
