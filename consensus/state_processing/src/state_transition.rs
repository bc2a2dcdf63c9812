use crate::errors::Error;
use crate::per_block_processing::{process_block, verify_block_signature};
use crate::per_slot_processing::process_slots;
use tracing::{debug, instrument};
use types::{BeaconState, ChainSpec, EthSpec, Hash256, SignedBeaconBlock};

/// The full state transition: advance empty slots up to the block's, verify its outer
/// signature, apply it, then assert the resulting state root matches what the block claims.
/// Consumes and returns `state` by value so a caller can't accidentally keep using a
/// partially-applied state after an error.
#[instrument(level = "debug", skip_all, fields(slot = signed_block.message.slot.as_u64()))]
pub fn state_transition<E: EthSpec>(
    mut state: BeaconState<E>,
    signed_block: &SignedBeaconBlock<E>,
    spec: &ChainSpec,
) -> Result<BeaconState<E>, Error> {
    let block = &signed_block.message;

    process_slots(&mut state, block.slot, spec)?;
    verify_block_signature(&state, block, &signed_block.signature, spec).map_err(|e| {
        debug!(slot = block.slot.as_u64(), error = ?e, "block signature rejected");
        e
    })?;
    process_block(&mut state, block, spec).map_err(|e| {
        debug!(slot = block.slot.as_u64(), error = ?e, "block rejected");
        e
    })?;

    if block.state_root != types::tree_hash_root(&state) {
        debug!(slot = block.slot.as_u64(), "state root mismatch after block processing");
        return Err(Error::BadStateRoot);
    }
    Ok(state)
}

/// The same transition with signature verification and the final state-root assertion elided —
/// what a proposer calls while building a new block, before it knows what root to put in it.
pub fn compute_state_root<E: EthSpec>(
    mut state: BeaconState<E>,
    block: &types::BeaconBlock<E>,
    spec: &ChainSpec,
) -> Result<Hash256, Error> {
    process_slots(&mut state, block.slot, spec)?;
    process_block(&mut state, block, spec)?;
    Ok(types::tree_hash_root(&state))
}
