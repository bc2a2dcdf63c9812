use crate::common::is_valid_indexed_attestation;
use crate::errors::{Error, SlashingInvalid};
use types::{AttesterSlashing, BeaconState, ChainSpec, EthSpec};

/// Both attestations must themselves be valid indexed attestations, and their data must form a
/// slashable pair (double-vote or surround-vote). Returns the sorted intersection of the two
/// attesting-index sets — the *candidates* for slashing. Whether any of them are actually still
/// slashable (not already slashed, not yet withdrawn) is the caller's concern: an intersection
/// that is empty, or that consists entirely of validators nobody can slash anymore, is the same
/// `NoValidatorSlashed` failure from the proposer's point of view, so this function doesn't try
/// to special-case the empty set itself.
pub fn verify_attester_slashing<E: EthSpec>(
    state: &BeaconState<E>,
    slashing: &AttesterSlashing<E>,
    spec: &ChainSpec,
) -> Result<Vec<u64>, Error> {
    let att_1 = &slashing.attestation_1;
    let att_2 = &slashing.attestation_2;

    if !att_1.data.is_slashable_attestation_data(&att_2.data) {
        return Err(Error::SlashingInvalid(SlashingInvalid::NotSlashableData));
    }

    is_valid_indexed_attestation(state, att_1, spec)?;
    is_valid_indexed_attestation(state, att_2, spec)?;

    let indices_2: std::collections::BTreeSet<u64> =
        att_2.attesting_indices.iter().copied().collect();
    let mut slashable: Vec<u64> = att_1
        .attesting_indices
        .iter()
        .copied()
        .filter(|i| indices_2.contains(i))
        .collect();
    slashable.sort_unstable();

    Ok(slashable)
}
