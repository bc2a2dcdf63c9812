use crate::{AttestationData, EthSpec, Slot};
use bls::SIGNATURE_BYTES_LEN;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::BitList;
use tree_hash_derive::TreeHash;

/// A committee vote as broadcast on the wire: one bit per committee seat, aggregated into a
/// single BLS signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
#[serde(bound = "E: EthSpec")]
pub struct Attestation<E: EthSpec> {
    pub aggregation_bits: BitList<E::MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub signature: [u8; SIGNATURE_BYTES_LEN],
}

/// The same vote, with `aggregation_bits` resolved into the explicit sorted list of attesting
/// validator indices. This is what signature verification and slashing checks operate on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
#[serde(bound = "E: EthSpec")]
pub struct IndexedAttestation<E: EthSpec> {
    pub attesting_indices: ssz_types::VariableList<u64, E::MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub signature: [u8; SIGNATURE_BYTES_LEN],
}

impl<E: EthSpec> IndexedAttestation<E> {
    pub fn new(
        attesting_indices: Vec<u64>,
        data: AttestationData,
        signature: [u8; SIGNATURE_BYTES_LEN],
    ) -> Self {
        Self {
            attesting_indices: attesting_indices.into(),
            data,
            signature,
        }
    }
}

/// The stored-in-state form of an attestation: no signature (already verified at inclusion
/// time), but carrying the bookkeeping needed for rewards — how late it was included, and who
/// gets the proposer reward for including it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
#[serde(bound = "E: EthSpec")]
pub struct PendingAttestation<E: EthSpec> {
    pub aggregation_bits: BitList<E::MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub inclusion_delay: u64,
    pub proposer_index: u64,
}

impl<E: EthSpec> PendingAttestation<E> {
    pub fn slot(&self) -> Slot {
        self.data.slot
    }
}
