use crate::errors::Error;
use types::{BeaconBlock, BeaconBlockHeader, BeaconState, ChainSpec, EthSpec, Hash256};

/// Verify `block`'s slot/parent/proposer against `state` and roll `state.latest_block_header`
/// forward to describe it. Does not verify the proposer's signature — callers that need that
/// build a `signature_sets::block_proposal_signature_set` separately.
pub fn process_block_header<E: EthSpec>(
    state: &mut BeaconState<E>,
    block: &BeaconBlock<E>,
    spec: &ChainSpec,
) -> Result<(), Error> {
    if block.slot != state.slot {
        return Err(Error::SlotMismatch {
            block: block.slot.as_u64(),
            state: state.slot.as_u64(),
        });
    }
    if block.slot <= state.latest_block_header.slot {
        return Err(Error::NonProgressingSlot {
            block: block.slot.as_u64(),
            latest_header: state.latest_block_header.slot.as_u64(),
        });
    }

    let expected_proposer = state.get_beacon_proposer_index(spec)?;
    if block.proposer_index != expected_proposer {
        return Err(Error::WrongProposer {
            block: block.proposer_index,
            expected: expected_proposer,
        });
    }

    let expected_parent_root = types::tree_hash_root(&state.latest_block_header);
    if block.parent_root != expected_parent_root {
        return Err(Error::BadParentRoot);
    }

    state.latest_block_header = BeaconBlockHeader {
        slot: block.slot,
        proposer_index: block.proposer_index,
        parent_root: block.parent_root,
        state_root: Hash256::zero(),
        body_root: types::tree_hash_root(&block.body),
    };

    let proposer = state
        .validators
        .get(block.proposer_index as usize)
        .ok_or(types::BeaconStateError::UnknownValidator(
            block.proposer_index,
        ))?;
    if proposer.slashed {
        return Err(Error::ProposerSlashed(block.proposer_index));
    }

    Ok(())
}
