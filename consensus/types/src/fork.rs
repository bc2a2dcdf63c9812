use crate::Hash256;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

/// The chain's current and previous fork versions, carried in state so `get_domain` can pick
/// the right one for an object's epoch. This core only ever activates the genesis fork, but the
/// field exists so a caller that does model fork upgrades has somewhere to record them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Fork {
    pub previous_version: [u8; 4],
    pub current_version: [u8; 4],
    pub epoch: crate::Epoch,
}

impl Fork {
    pub fn genesis(genesis_fork_version: [u8; 4]) -> Self {
        Fork {
            previous_version: genesis_fork_version,
            current_version: genesis_fork_version,
            epoch: crate::Epoch::new(0),
        }
    }

    /// The fork version in effect at `epoch`: `current_version` once `epoch >= self.epoch`,
    /// `previous_version` before that.
    pub fn get_fork_version(&self, epoch: crate::Epoch) -> [u8; 4] {
        if epoch.as_u64() < self.epoch.as_u64() {
            self.previous_version
        } else {
            self.current_version
        }
    }
}

/// The object hashed to derive a signature domain: a fork version paired with the
/// genesis validators root, so a domain can never be replayed across chains with different
/// genesis states even if they happen to share a fork version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TreeHash)]
pub struct ForkData {
    pub current_version: [u8; 4],
    pub genesis_validators_root: Hash256,
}

/// The object actually signed over: an application object's root, paired with the domain that
/// separates it from every other signature purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TreeHash)]
pub struct SigningData {
    pub object_root: Hash256,
    pub domain: Hash256,
}
