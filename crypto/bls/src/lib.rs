//! BLS12-381 signature façade used by the state-transition function.
//!
//! Only the operations the state transition actually needs are exposed: single-message verify
//! (RANDAO reveals, exits, block/header signatures) and fast-aggregate verify (one message,
//! many pubkeys — attestations). Key generation and serialization follow the `min_pk` BLS
//! signature scheme (48-byte pubkeys, 96-byte signatures) used on mainnet.

mod signature_set;

pub use signature_set::SignatureSet;

use blst::min_pk as blst_core;
use blst::BLST_ERROR;
use std::fmt;

pub const PUBLIC_KEY_BYTES_LEN: usize = 48;
pub const SIGNATURE_BYTES_LEN: usize = 96;
pub const SECRET_KEY_BYTES_LEN: usize = 32;

/// Domain separation tag for the `min_pk` ciphersuite, proof-of-possession variant.
const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    InvalidPublicKey,
    InvalidSecretKey,
    InvalidSignature,
    SignatureVerificationFailed,
    EmptyAggregate,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for Error {}

fn map_blst_err(err: BLST_ERROR) -> Result<(), Error> {
    if err == BLST_ERROR::BLST_SUCCESS {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

/// A 48-byte compressed public key, kept in both parsed and raw form.
#[derive(Clone)]
pub struct PublicKey {
    raw: blst_core::PublicKey,
    bytes: [u8; PUBLIC_KEY_BYTES_LEN],
}

impl PublicKey {
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != PUBLIC_KEY_BYTES_LEN {
            return Err(Error::InvalidPublicKey);
        }
        let raw = blst_core::PublicKey::from_bytes(bytes).map_err(|_| Error::InvalidPublicKey)?;
        let mut buf = [0u8; PUBLIC_KEY_BYTES_LEN];
        buf.copy_from_slice(bytes);
        Ok(Self { raw, bytes: buf })
    }

    pub fn serialize(&self) -> [u8; PUBLIC_KEY_BYTES_LEN] {
        self.bytes
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}
impl Eq for PublicKey {}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.bytes))
    }
}

/// A BLS secret scalar. Never implements `Debug`/`Display` with its bytes exposed.
pub struct SecretKey(blst_core::SecretKey);

impl SecretKey {
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != SECRET_KEY_BYTES_LEN {
            return Err(Error::InvalidSecretKey);
        }
        blst_core::SecretKey::from_bytes(bytes)
            .map(SecretKey)
            .map_err(|_| Error::InvalidSecretKey)
    }

    /// Derive a secret key from key material via `key_gen` (IKM must be at least 32 bytes).
    /// Unlike `deserialize`, any IKM of sufficient length yields a valid scalar — there's no
    /// encoding to get wrong, which makes this the convenient entry point for tests and for
    /// minting deterministic fixture validators.
    pub fn key_gen(ikm: &[u8]) -> Result<Self, Error> {
        blst_core::SecretKey::key_gen(ikm, &[])
            .map(SecretKey)
            .map_err(|_| Error::InvalidSecretKey)
    }

    pub fn public_key(&self) -> PublicKey {
        let raw = self.0.sk_to_pk();
        let bytes = raw.compress();
        let mut buf = [0u8; PUBLIC_KEY_BYTES_LEN];
        buf.copy_from_slice(&bytes);
        PublicKey { raw, bytes: buf }
    }

    pub fn sign(&self, msg: &[u8]) -> Signature {
        let raw = self.0.sign(msg, DST, &[]);
        let bytes = raw.compress();
        let mut buf = [0u8; SIGNATURE_BYTES_LEN];
        buf.copy_from_slice(&bytes);
        Signature { raw, bytes: buf }
    }
}

/// A 96-byte compressed G2 signature.
#[derive(Clone)]
pub struct Signature {
    raw: blst_core::Signature,
    bytes: [u8; SIGNATURE_BYTES_LEN],
}

impl Signature {
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != SIGNATURE_BYTES_LEN {
            return Err(Error::InvalidSignature);
        }
        let raw =
            blst_core::Signature::from_bytes(bytes).map_err(|_| Error::InvalidSignature)?;
        let mut buf = [0u8; SIGNATURE_BYTES_LEN];
        buf.copy_from_slice(bytes);
        Ok(Self { raw, bytes: buf })
    }

    pub fn serialize(&self) -> [u8; SIGNATURE_BYTES_LEN] {
        self.bytes
    }

    /// Verify a single-pubkey, single-message signature.
    #[must_use]
    pub fn verify(&self, pubkey: &PublicKey, msg: &[u8]) -> bool {
        self.raw.verify(true, msg, DST, &[], &pubkey.raw, true) == BLST_ERROR::BLST_SUCCESS
    }

    /// Verify this signature as the aggregate of every `pubkeys` member, all over the same
    /// `msg` (fast-aggregate-verify, used for committee attestations).
    #[must_use]
    pub fn fast_aggregate_verify(&self, pubkeys: &[&PublicKey], msg: &[u8]) -> bool {
        if pubkeys.is_empty() {
            return false;
        }
        let refs: Vec<&blst_core::PublicKey> = pubkeys.iter().map(|pk| &pk.raw).collect();
        self.raw.fast_aggregate_verify(true, msg, DST, &refs) == BLST_ERROR::BLST_SUCCESS
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}
impl Eq for Signature {}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(self.bytes))
    }
}

/// An aggregated signature, built up from individual member signatures (attester slashings
/// combine two independently-aggregated `IndexedAttestation` signatures).
pub struct AggregateSignature(blst_core::AggregateSignature);

impl AggregateSignature {
    pub fn from_signatures(sigs: &[&Signature]) -> Result<Self, Error> {
        let (first, rest) = sigs.split_first().ok_or(Error::EmptyAggregate)?;
        let mut agg = blst_core::AggregateSignature::from_signature(&first.raw);
        for sig in rest {
            agg.add_signature(&sig.raw, true)
                .map_err(|_| Error::InvalidSignature)?;
        }
        Ok(Self(agg))
    }

    pub fn to_signature(&self) -> Signature {
        let raw = self.0.to_signature();
        let bytes_vec = raw.compress();
        let mut bytes = [0u8; SIGNATURE_BYTES_LEN];
        bytes.copy_from_slice(&bytes_vec);
        Signature { raw, bytes }
    }
}

/// Convenience pairing of a secret key and its derived public key, as produced at
/// validator-client key-generation time (out of scope here, but commonly needed by callers and
/// by tests that need to mint a validator + matching signatures).
pub struct Keypair {
    pub sk: SecretKey,
    pub pk: PublicKey,
}

impl Keypair {
    pub fn from_secret(sk: SecretKey) -> Self {
        let pk = sk.public_key();
        Self { sk, pk }
    }
}

/// Verify a `(aggregate signature, many pubkeys, single message)` triple — the shape the spec's
/// `bls_fast_aggregate_verify` interface describes.
pub fn fast_aggregate_verify(pubkeys: &[&PublicKey], msg: &[u8], signature: &Signature) -> bool {
    signature.fast_aggregate_verify(pubkeys, msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypair_from_ikm(seed: u8) -> Keypair {
        let ikm = [seed; 32];
        let sk = SecretKey::key_gen(&ikm).expect("valid ikm");
        Keypair::from_secret(sk)
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let kp = keypair_from_ikm(1);
        let msg = b"attestation root";
        let sig = kp.sk.sign(msg);
        assert!(sig.verify(&kp.pk, msg));
        assert!(!sig.verify(&kp.pk, b"different message"));
    }

    #[test]
    fn fast_aggregate_verify_over_committee() {
        let kps: Vec<Keypair> = (0..5).map(keypair_from_ikm).collect();
        let msg = b"shared signing root";
        let sigs: Vec<Signature> = kps.iter().map(|kp| kp.sk.sign(msg)).collect();
        let sig_refs: Vec<&Signature> = sigs.iter().collect();
        let agg = AggregateSignature::from_signatures(&sig_refs).unwrap().to_signature();

        let pubkeys: Vec<&PublicKey> = kps.iter().map(|kp| &kp.pk).collect();
        assert!(fast_aggregate_verify(&pubkeys, msg, &agg));

        let wrong_msg = fast_aggregate_verify(&pubkeys, b"wrong", &agg);
        assert!(!wrong_msg);
    }
}
