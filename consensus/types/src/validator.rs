use crate::{ChainSpec, Epoch};
use bls::{PublicKey, PUBLIC_KEY_BYTES_LEN};
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

/// A single validator's consensus-relevant record. Everything reachable from the deposit
/// contract and the validator's own signing key lives here; nothing about a validator's
/// identity or history lives anywhere else in state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Validator {
    pub pubkey: [u8; PUBLIC_KEY_BYTES_LEN],
    pub withdrawal_credentials: crate::Hash256,
    pub effective_balance: u64,
    pub slashed: bool,
    pub activation_eligibility_epoch: Epoch,
    pub activation_epoch: Epoch,
    pub exit_epoch: Epoch,
    pub withdrawable_epoch: Epoch,
}

impl Validator {
    pub fn is_active_at(&self, epoch: Epoch) -> bool {
        self.activation_epoch.as_u64() <= epoch.as_u64() && epoch.as_u64() < self.exit_epoch.as_u64()
    }

    pub fn is_exited_at(&self, epoch: Epoch) -> bool {
        self.exit_epoch.as_u64() <= epoch.as_u64()
    }

    pub fn is_eligible_for_activation_queue(&self, spec: &ChainSpec) -> bool {
        self.activation_eligibility_epoch == spec.far_future_epoch
            && self.effective_balance == spec.max_effective_balance
    }

    pub fn is_eligible_for_activation(&self, finalized_epoch: Epoch, spec: &ChainSpec) -> bool {
        self.activation_eligibility_epoch.as_u64() <= finalized_epoch.as_u64()
            && self.activation_epoch == spec.far_future_epoch
    }

    /// "Slashable" per the proposer/attester slashing operations: active and not already
    /// slashed (exit status is irrelevant; a recently-exited validator is still slashable until
    /// `withdrawable_epoch`).
    pub fn is_slashable_at(&self, epoch: Epoch) -> bool {
        !self.slashed
            && self.activation_epoch.as_u64() <= epoch.as_u64()
            && epoch.as_u64() < self.withdrawable_epoch.as_u64()
    }

    pub fn is_exiting(&self, spec: &ChainSpec) -> bool {
        self.exit_epoch != spec.far_future_epoch
    }

    pub fn pubkey(&self) -> Result<PublicKey, bls::Error> {
        PublicKey::deserialize(&self.pubkey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain_spec::ChainSpec;

    fn validator(activation: u64, exit: u64) -> Validator {
        Validator {
            pubkey: [0; 48],
            withdrawal_credentials: crate::Hash256::zero(),
            effective_balance: 32_000_000_000,
            slashed: false,
            activation_eligibility_epoch: Epoch::new(0),
            activation_epoch: Epoch::new(activation),
            exit_epoch: Epoch::new(exit),
            withdrawable_epoch: Epoch::new(exit + 256),
        }
    }

    #[test]
    fn active_window_is_half_open() {
        let v = validator(1, 10);
        assert!(!v.is_active_at(Epoch::new(0)));
        assert!(v.is_active_at(Epoch::new(1)));
        assert!(v.is_active_at(Epoch::new(9)));
        assert!(!v.is_active_at(Epoch::new(10)));
    }

    #[test]
    fn far_future_eligibility_gate() {
        let spec = ChainSpec::mainnet();
        let mut v = validator(1, 10);
        assert!(!v.is_eligible_for_activation_queue(&spec));
        v.activation_eligibility_epoch = spec.far_future_epoch;
        v.effective_balance = spec.max_effective_balance;
        assert!(v.is_eligible_for_activation_queue(&spec));
    }
}
