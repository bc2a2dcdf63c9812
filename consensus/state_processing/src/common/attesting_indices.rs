use crate::errors::Error;
use std::collections::BTreeSet;
use types::{Attestation, BeaconState, ChainSpec, EthSpec};

/// The set of committee members who set their bit in `attestation.aggregation_bits`.
pub fn get_attesting_indices<E: EthSpec>(
    state: &BeaconState<E>,
    attestation: &Attestation<E>,
    spec: &ChainSpec,
) -> Result<Vec<u64>, Error> {
    let committee =
        state.get_beacon_committee(attestation.data.slot, attestation.data.index, spec)?;
    Ok(committee
        .into_iter()
        .enumerate()
        .filter_map(|(i, index)| {
            attestation
                .aggregation_bits
                .get(i)
                .ok()
                .filter(|&bit| bit)
                .map(|_| index)
        })
        .collect())
}

/// Union of `get_attesting_indices` over every attestation in `atts`, with slashed validators
/// removed, sorted ascending.
pub fn unslashed_attesting_indices<E: EthSpec>(
    state: &BeaconState<E>,
    atts: &[&Attestation<E>],
    spec: &ChainSpec,
) -> Result<Vec<u64>, Error> {
    let mut set = BTreeSet::new();
    for att in atts {
        for index in get_attesting_indices(state, att, spec)? {
            set.insert(index);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::genesis_state;
    use types::{AttestationData, Checkpoint, Hash256};

    #[test]
    fn only_committee_members_with_their_bit_set_are_attesting() {
        let spec = ChainSpec::minimal();
        let state = genesis_state(&spec, 8);
        let committee = state.get_beacon_committee(types::Slot::new(0), 0, &spec).unwrap();

        let mut aggregation_bits =
            ssz_types::BitList::with_capacity(committee.len()).unwrap();
        aggregation_bits.set(0, true).unwrap();

        let attestation = Attestation::<crate::test_utils::E> {
            aggregation_bits,
            data: AttestationData {
                slot: types::Slot::new(0),
                index: 0,
                beacon_block_root: Hash256::zero(),
                source: Checkpoint::default(),
                target: Checkpoint::default(),
            },
            signature: [0u8; bls::SIGNATURE_BYTES_LEN],
        };

        let indices = get_attesting_indices(&state, &attestation, &spec).unwrap();
        assert_eq!(indices, vec![committee[0]]);
    }

    #[test]
    fn unslashed_attesting_indices_drops_slashed_validators_and_dedups() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        let committee = state.get_beacon_committee(types::Slot::new(0), 0, &spec).unwrap();
        state.validators.get_mut(committee[0] as usize).unwrap().slashed = true;

        let mut aggregation_bits =
            ssz_types::BitList::with_capacity(committee.len()).unwrap();
        for i in 0..committee.len() {
            aggregation_bits.set(i, true).unwrap();
        }
        let data = AttestationData {
            slot: types::Slot::new(0),
            index: 0,
            beacon_block_root: Hash256::zero(),
            source: Checkpoint::default(),
            target: Checkpoint::default(),
        };
        let attestation = Attestation::<crate::test_utils::E> {
            aggregation_bits: aggregation_bits.clone(),
            data: data.clone(),
            signature: [0u8; bls::SIGNATURE_BYTES_LEN],
        };
        let same_attestation_twice = [&attestation, &attestation];

        let indices = unslashed_attesting_indices(&state, &same_attestation_twice, &spec).unwrap();
        assert!(!indices.contains(&committee[0]));
        assert_eq!(indices.len(), committee.len() - 1);
    }
}
