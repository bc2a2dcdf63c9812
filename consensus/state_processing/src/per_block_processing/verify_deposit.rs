use crate::errors::{DepositInvalid, Error};
use types::{BeaconState, ChainSpec, Deposit, EthSpec};

/// Verify `deposit`'s Merkle branch against the running `state.eth1_data.deposit_root` at
/// `state.eth1_deposit_index`. A failed branch check is a hard error — unlike an invalid
/// deposit *signature*, which is simply ignored (see `process_deposit`), a bad Merkle proof
/// means the deposit wasn't actually made against the eth1 chain the state already committed to.
pub fn verify_deposit_merkle_proof<E: EthSpec>(
    state: &BeaconState<E>,
    deposit: &Deposit,
    spec: &ChainSpec,
) -> Result<(), Error> {
    let leaf = types::tree_hash_root(&deposit.data);
    let branch: Vec<[u8; 32]> = deposit.proof.iter().map(|h| *h.as_bytes()).collect();

    let valid = merkle_proof::verify_merkle_proof(
        *leaf.as_bytes(),
        &branch,
        spec.deposit_contract_tree_depth as usize + 1,
        state.eth1_deposit_index as usize,
        *state.eth1_data.deposit_root.as_bytes(),
    );
    if valid {
        Ok(())
    } else {
        Err(Error::DepositInvalid(DepositInvalid::BadMerkleProof))
    }
}
