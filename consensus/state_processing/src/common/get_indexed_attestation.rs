use crate::errors::{Error, IndexedAttestationInvalid};
use bls::SignatureSet;
use std::borrow::Cow;
use types::{Attestation, BeaconState, EthSpec, IndexedAttestation};

/// Resolve `aggregation_bits` against the attestation's committee into the explicit sorted
/// attester-index list an `IndexedAttestation` carries.
pub fn get_indexed_attestation<E: EthSpec>(
    state: &BeaconState<E>,
    attestation: &Attestation<E>,
    spec: &types::ChainSpec,
) -> Result<IndexedAttestation<E>, Error> {
    let committee =
        state.get_beacon_committee(attestation.data.slot, attestation.data.index, spec)?;

    if attestation.aggregation_bits.len() != committee.len() {
        return Err(Error::AttestationInvalid(
            crate::errors::AttestationInvalid::BadAggregationBitsLength,
        ));
    }

    let mut attesting_indices: Vec<u64> = committee
        .iter()
        .enumerate()
        .filter_map(|(i, &validator_index)| {
            attestation
                .aggregation_bits
                .get(i)
                .ok()
                .filter(|&bit| bit)
                .map(|_| validator_index)
        })
        .collect();
    attesting_indices.sort_unstable();

    Ok(IndexedAttestation::new(
        attesting_indices,
        attestation.data.clone(),
        attestation.signature,
    ))
}

/// `1 <= len(indices) <= MAX_VALIDATORS_PER_COMMITTEE`, strictly ascending, and the aggregate
/// signature verifies over the attestation's signing root.
pub fn is_valid_indexed_attestation<E: EthSpec>(
    state: &BeaconState<E>,
    indexed: &IndexedAttestation<E>,
    spec: &types::ChainSpec,
) -> Result<(), Error> {
    let indices = &indexed.attesting_indices;
    if indices.is_empty() {
        return Err(Error::IndexedAttestationInvalid(
            IndexedAttestationInvalid::EmptyIndices,
        ));
    }
    if indices.len() > E::max_validators_per_committee() {
        return Err(Error::IndexedAttestationInvalid(
            IndexedAttestationInvalid::TooManyIndices,
        ));
    }
    if !indices.windows(2).all(|pair| pair[0] < pair[1]) {
        return Err(Error::IndexedAttestationInvalid(
            IndexedAttestationInvalid::IndicesNotSorted,
        ));
    }

    let domain = state.get_domain(
        types::Domain::BeaconAttester,
        indexed.data.target.epoch,
        spec,
    );
    let signing_root = types::compute_signing_root(&indexed.data, domain);

    let signature = bls::Signature::deserialize(&indexed.signature).map_err(|_| {
        Error::IndexedAttestationInvalid(IndexedAttestationInvalid::BadSignature)
    })?;

    let mut pubkeys = Vec::with_capacity(indices.len());
    for &index in indices.iter() {
        let validator = state
            .validators
            .get(index as usize)
            .ok_or(Error::BeaconStateError(types::BeaconStateError::UnknownValidator(index)))?;
        let pk = validator
            .pubkey()
            .map_err(|_| Error::IndexedAttestationInvalid(IndexedAttestationInvalid::BadSignature))?;
        pubkeys.push(Cow::Owned(pk));
    }

    let set = SignatureSet::multiple(&signature, pubkeys, *signing_root.as_bytes());
    if set.verify() {
        Ok(())
    } else {
        Err(Error::IndexedAttestationInvalid(
            IndexedAttestationInvalid::BadSignature,
        ))
    }
}
