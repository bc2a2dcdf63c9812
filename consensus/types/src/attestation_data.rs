use crate::{Checkpoint, Hash256, Slot};
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

/// What a committee member is actually voting for: a head block, and a source/target
/// checkpoint pair for the FFG vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct AttestationData {
    pub slot: Slot,
    pub index: u64,
    pub beacon_block_root: Hash256,
    pub source: Checkpoint,
    pub target: Checkpoint,
}

impl AttestationData {
    /// Double-vote or surround-vote: the two conditions under which an attester may be
    /// slashed for casting both attestations. The surround check is deliberately symmetric —
    /// checking only `self` surrounding `other` would miss the case where the arguments are
    /// passed in the opposite order.
    pub fn is_slashable_attestation_data(&self, other: &AttestationData) -> bool {
        let double_vote = self != other && self.target.epoch == other.target.epoch;
        let surrounds = |a: &AttestationData, b: &AttestationData| {
            a.source.epoch < b.source.epoch && b.target.epoch < a.target.epoch
        };
        double_vote || surrounds(self, other) || surrounds(other, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(source: u64, target: u64, root: u8) -> AttestationData {
        AttestationData {
            slot: Slot::new(target * 32),
            index: 0,
            beacon_block_root: Hash256::new([root; 32]),
            source: crate::Checkpoint {
                epoch: crate::Epoch::new(source),
                root: Hash256::zero(),
            },
            target: crate::Checkpoint {
                epoch: crate::Epoch::new(target),
                root: Hash256::zero(),
            },
        }
    }

    #[test]
    fn double_vote_detected() {
        let a = data(1, 5, 1);
        let b = data(2, 5, 2);
        assert!(a.is_slashable_attestation_data(&b));
        assert!(b.is_slashable_attestation_data(&a));
    }

    #[test]
    fn surround_vote_detected_both_directions() {
        let inner = data(3, 4, 1);
        let outer = data(2, 5, 1);
        assert!(outer.is_slashable_attestation_data(&inner));
        assert!(inner.is_slashable_attestation_data(&outer));
    }

    #[test]
    fn disjoint_votes_are_not_slashable() {
        let a = data(1, 2, 1);
        let b = data(3, 4, 1);
        assert!(!a.is_slashable_attestation_data(&b));
    }

    #[test]
    fn identical_data_is_not_slashable() {
        let a = data(1, 2, 7);
        assert!(!a.is_slashable_attestation_data(&a.clone()));
    }
}
