use crate::Hash256;
use bls::{PUBLIC_KEY_BYTES_LEN, SIGNATURE_BYTES_LEN};
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::typenum::U33;
use ssz_types::FixedVector;
use tree_hash_derive::TreeHash;

/// What a validator's deposit signature actually covers — `DepositData` minus the signature
/// itself, since a signature can't authenticate its own bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TreeHash)]
pub struct DepositMessage {
    pub pubkey: [u8; PUBLIC_KEY_BYTES_LEN],
    pub withdrawal_credentials: Hash256,
    pub amount: u64,
}

/// The deposit-contract log entry for one validator's deposit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct DepositData {
    pub pubkey: [u8; PUBLIC_KEY_BYTES_LEN],
    pub withdrawal_credentials: Hash256,
    pub amount: u64,
    pub signature: [u8; SIGNATURE_BYTES_LEN],
}

impl DepositData {
    pub fn as_deposit_message(&self) -> DepositMessage {
        DepositMessage {
            pubkey: self.pubkey,
            withdrawal_credentials: self.withdrawal_credentials,
            amount: self.amount,
        }
    }
}

/// A deposit as it appears in a block body: the contract-log data plus a Merkle branch proving
/// its inclusion in the deposit tree at `state.eth1_deposit_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Deposit {
    pub proof: FixedVector<Hash256, U33>,
    pub data: DepositData,
}
