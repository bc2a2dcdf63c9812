mod process_block_header;
mod process_eth1_data;
mod process_operations;
mod process_randao;
pub mod signature_sets;
mod verify_attestation;
mod verify_attester_slashing;
mod verify_deposit;
mod verify_exit;
mod verify_proposer_slashing;

pub use process_block_header::process_block_header;
pub use process_eth1_data::process_eth1_data;
pub use process_operations::process_operations;
pub use process_randao::process_randao;
pub use verify_attestation::verify_attestation;
pub use verify_attester_slashing::verify_attester_slashing;
pub use verify_deposit::verify_deposit_merkle_proof;
pub use verify_exit::verify_voluntary_exit;
pub use verify_proposer_slashing::verify_proposer_slashing;

use crate::errors::Error;
use bls::Signature;
use tracing::instrument;
use types::{BeaconBlock, BeaconState, ChainSpec, EthSpec};

/// The full per-block transition: header, RANDAO, eth1 vote, operations, in that order. Block
/// signature verification is the caller's responsibility (`state_transition::state_transition`
/// verifies it once up front via `verify_block_signature` so `compute_state_root` can skip it).
#[instrument(level = "debug", skip_all, fields(slot = block.slot.as_u64()))]
pub fn process_block<E: EthSpec>(
    state: &mut BeaconState<E>,
    block: &BeaconBlock<E>,
    spec: &ChainSpec,
) -> Result<(), Error> {
    process_block_header(state, block, spec)?;
    process_randao(state, &block.body.randao_reveal, spec)?;
    process_eth1_data(state, &block.body.eth1_data, spec)?;
    process_operations(state, &block.body, spec)?;
    Ok(())
}

/// Verify a block's RANDAO-independent outer signature: the proposer's signature over
/// `BeaconBlockHeader` (slot, proposer_index, parent_root, state_root, body_root).
pub fn verify_block_signature<E: EthSpec>(
    state: &BeaconState<E>,
    block: &BeaconBlock<E>,
    signature: &[u8; bls::SIGNATURE_BYTES_LEN],
    spec: &ChainSpec,
) -> Result<(), Error> {
    let header = types::BeaconBlockHeader {
        slot: block.slot,
        proposer_index: block.proposer_index,
        parent_root: block.parent_root,
        state_root: block.state_root,
        body_root: types::tree_hash_root(&block.body),
    };
    let signature = Signature::deserialize(signature)
        .map_err(|_| Error::SignatureInvalid(crate::errors::SignatureContext::Block))?;
    let set = signature_sets::block_proposal_signature_set(state, &header, &signature, spec)?;
    if set.verify() {
        Ok(())
    } else {
        Err(Error::SignatureInvalid(crate::errors::SignatureContext::Block))
    }
}
