use crate::{PublicKey, Signature};
use std::borrow::Cow;

/// A deferred `(signature, pubkeys, message)` triple.
///
/// Building a set up front and verifying it later (possibly batched with other sets) lets
/// callers separate "construct every signature check a block implies" from "actually run them",
/// which is what lets `compute_state_root` reuse all of `process_block`'s bookkeeping with
/// verification elided.
pub struct SignatureSet<'a> {
    signature: Cow<'a, Signature>,
    pubkeys: Vec<Cow<'a, PublicKey>>,
    message: [u8; 32],
}

impl<'a> SignatureSet<'a> {
    pub fn single(signature: &'a Signature, pubkey: Cow<'a, PublicKey>, message: [u8; 32]) -> Self {
        Self {
            signature: Cow::Borrowed(signature),
            pubkeys: vec![pubkey],
            message,
        }
    }

    pub fn multiple(
        signature: &'a Signature,
        pubkeys: Vec<Cow<'a, PublicKey>>,
        message: [u8; 32],
    ) -> Self {
        Self {
            signature: Cow::Borrowed(signature),
            pubkeys,
            message,
        }
    }

    #[must_use]
    pub fn verify(&self) -> bool {
        let refs: Vec<&PublicKey> = self.pubkeys.iter().map(|pk| pk.as_ref()).collect();
        self.signature.fast_aggregate_verify(&refs, &self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SecretKey;
    use blst::min_pk as blst_core;

    fn secret(seed: u8) -> SecretKey {
        let ikm = [seed; 32];
        SecretKey::deserialize(&blst_core::SecretKey::key_gen(&ikm, &[]).unwrap().to_bytes())
            .unwrap()
    }

    #[test]
    fn single_set_verifies() {
        let sk = secret(3);
        let pk = sk.public_key();
        let msg = [9u8; 32];
        let sig = sk.sign(&msg);
        let set = SignatureSet::single(&sig, Cow::Owned(pk), msg);
        assert!(set.verify());
    }
}
