use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use std::fmt;
use tree_hash_derive::TreeHash;

/// A 32-byte SSZ hash-tree-root or SHA-256 digest. Every domain record's root, every
/// checkpoint's block root, and the RANDAO mix all share this type.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    Encode, Decode, TreeHash,
)]
#[serde(transparent)]
pub struct Hash256([u8; 32]);

impl Hash256 {
    pub const fn zero() -> Self {
        Self([0; 32])
    }

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; 32]
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// SHA-256, the only hash function the core cryptography façade exposes.
pub fn hash(bytes: &[u8]) -> Hash256 {
    let digest = ethereum_hashing::hash(bytes);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Hash256::new(out)
}

/// XOR two 32-byte digests, used to mix a RANDAO reveal into the running per-epoch mix.
pub fn xor(a: Hash256, b: Hash256) -> Hash256 {
    let mut out = [0u8; 32];
    for i in 0..32 {
        out[i] = a.0[i] ^ b.0[i];
    }
    Hash256::new(out)
}

/// `hash_tree_root(object)`, copied out of whatever `tree_hash`'s own digest type happens to be
/// into our own `Hash256`.
pub fn tree_hash_root<T: tree_hash::TreeHash>(object: &T) -> Hash256 {
    let root = object.tree_hash_root();
    let bytes: &[u8] = root.as_ref();
    let mut out = [0u8; 32];
    out.copy_from_slice(bytes);
    Hash256::new(out)
}
