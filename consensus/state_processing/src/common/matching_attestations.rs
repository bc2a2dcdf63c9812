use crate::errors::Error;
use std::collections::BTreeSet;
use types::{BeaconState, ChainSpec, Epoch, EthSpec, PendingAttestation};

/// The previous- or current-epoch attestation pool for `epoch`. Any other epoch is a
/// programmer error — the state only retains two epochs of pending attestations.
pub fn get_matching_source_attestations<'a, E: EthSpec>(
    state: &'a BeaconState<E>,
    epoch: Epoch,
) -> Result<&'a [PendingAttestation<E>], Error> {
    if epoch == state.current_epoch() {
        Ok(&state.current_epoch_attestations)
    } else if epoch == state.previous_epoch() {
        Ok(&state.previous_epoch_attestations)
    } else {
        Err(Error::HistoricalLookup)
    }
}

/// Source-matching attestations whose target also cites the canonical block root at the start
/// of `epoch`.
pub fn get_matching_target_attestations<E: EthSpec>(
    state: &BeaconState<E>,
    epoch: Epoch,
) -> Result<Vec<PendingAttestation<E>>, Error> {
    let target_root = *state.get_block_root(epoch)?;
    Ok(get_matching_source_attestations(state, epoch)?
        .iter()
        .filter(|a| a.data.target.root == target_root)
        .cloned()
        .collect())
}

/// Target-matching attestations whose `beacon_block_root` also matches the canonical block at
/// the attested slot — i.e. attestations that got the head right too.
pub fn get_matching_head_attestations<E: EthSpec>(
    state: &BeaconState<E>,
    epoch: Epoch,
) -> Result<Vec<PendingAttestation<E>>, Error> {
    let mut out = Vec::new();
    for att in get_matching_target_attestations(state, epoch)? {
        if att.data.beacon_block_root == *state.get_block_root_at_slot(att.data.slot)? {
            out.push(att);
        }
    }
    Ok(out)
}

/// The committee members behind `attestations`, minus slashed validators, sorted ascending.
pub fn get_unslashed_attesting_indices<E: EthSpec>(
    state: &BeaconState<E>,
    attestations: &[PendingAttestation<E>],
    spec: &ChainSpec,
) -> Result<Vec<u64>, Error> {
    let mut set = BTreeSet::new();
    for att in attestations {
        let committee = state.get_beacon_committee(att.data.slot, att.data.index, spec)?;
        for (i, &validator_index) in committee.iter().enumerate() {
            if att.aggregation_bits.get(i).unwrap_or(false) {
                set.insert(validator_index);
            }
        }
    }
    set.retain(|&index| {
        state
            .validators
            .get(index as usize)
            .map(|v| !v.slashed)
            .unwrap_or(false)
    });
    Ok(set.into_iter().collect())
}
