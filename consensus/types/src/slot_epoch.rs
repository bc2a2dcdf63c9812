//! `Slot` and `Epoch` are both thin wrappers around `u64`; keeping them distinct types prevents
//! the classic bug of passing a slot where an epoch (or vice versa) was expected.

use crate::chain_spec::ChainSpec;
use safe_arith::{ArithError, SafeArith};
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use std::fmt;
use std::ops::{Add, Sub};
use tree_hash_derive::TreeHash;

macro_rules! newtype_u64 {
    ($name: ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            Encode,
            Decode,
            TreeHash,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(n: u64) -> Self {
                Self(n)
            }

            pub const fn as_u64(&self) -> u64 {
                self.0
            }

            pub fn as_usize(&self) -> usize {
                self.0 as usize
            }

            pub fn safe_add(&self, other: u64) -> Result<Self, ArithError> {
                self.0.safe_add(other).map(Self)
            }

            pub fn safe_sub(&self, other: u64) -> Result<Self, ArithError> {
                self.0.safe_sub(other).map(Self)
            }

            pub fn safe_rem(&self, other: u64) -> Result<u64, ArithError> {
                self.0.safe_rem(other)
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n)
            }
        }

        impl From<$name> for u64 {
            fn from(n: $name) -> Self {
                n.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Add<u64> for $name {
            type Output = Self;
            fn add(self, rhs: u64) -> Self {
                Self(self.0 + rhs)
            }
        }

        impl Sub<u64> for $name {
            type Output = Self;
            fn sub(self, rhs: u64) -> Self {
                Self(self.0 - rhs)
            }
        }
    };
}

newtype_u64!(Slot);
newtype_u64!(Epoch);

impl Slot {
    /// Epoch containing this slot: `slot / slots_per_epoch`. The spec's suspected-bug note
    /// warns against confusing this with `slot & slots_per_epoch` — always divide.
    pub fn epoch(&self, slots_per_epoch: u64) -> Epoch {
        Epoch::new(self.0 / slots_per_epoch)
    }

    pub fn is_epoch_start(&self, slots_per_epoch: u64) -> bool {
        self.0 % slots_per_epoch == 0
    }
}

impl Epoch {
    pub fn start_slot(&self, slots_per_epoch: u64) -> Slot {
        Slot::new(self.0 * slots_per_epoch)
    }

    pub fn end_slot(&self, slots_per_epoch: u64) -> Slot {
        Slot::new((self.0 + 1) * slots_per_epoch - 1)
    }

    pub fn saturating_sub(&self, other: Epoch) -> Epoch {
        Epoch::new(self.0.saturating_sub(other.0))
    }

    /// `FAR_FUTURE_EPOCH`: the sentinel used for "never" in validator lifecycle fields.
    pub fn far_future(spec: &ChainSpec) -> Epoch {
        spec.far_future_epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_conversion_uses_modulo() {
        assert_eq!(Slot::new(63).epoch(32), Epoch::new(1));
        assert_eq!(Slot::new(64).epoch(32), Epoch::new(2));
        assert!(Slot::new(64).is_epoch_start(32));
        assert!(!Slot::new(63).is_epoch_start(32));
    }

    #[test]
    fn epoch_start_and_end_slot() {
        assert_eq!(Epoch::new(2).start_slot(32), Slot::new(64));
        assert_eq!(Epoch::new(2).end_slot(32), Slot::new(95));
    }
}
