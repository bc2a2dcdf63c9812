use crate::fork::{ForkData, SigningData};
use crate::hash256::{tree_hash_root, Hash256};
use tree_hash::TreeHash;

/// `domain_type || first-28-bytes(hash_tree_root(ForkData))`.
///
/// Every signature domain in the system is derived this way; only the 4-byte `domain_type`
/// differs between e.g. a RANDAO reveal and a block proposal.
pub fn compute_domain(
    domain_type: [u8; 4],
    fork_version: [u8; 4],
    genesis_validators_root: Hash256,
) -> Hash256 {
    let fork_data = ForkData {
        current_version: fork_version,
        genesis_validators_root,
    };
    let fork_data_root = tree_hash_root(&fork_data);
    let fork_data_root_bytes = fork_data_root.as_bytes();

    let mut domain = [0u8; 32];
    domain[0..4].copy_from_slice(&domain_type);
    domain[4..32].copy_from_slice(&fork_data_root_bytes[0..28]);
    Hash256::new(domain)
}

/// `hash_tree_root(SigningData { object_root, domain })`, the actual message that gets signed.
pub fn compute_signing_root<T: TreeHash>(object: &T, domain: Hash256) -> Hash256 {
    let signing_data = SigningData {
        object_root: tree_hash_root(object),
        domain,
    };
    tree_hash_root(&signing_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_mixes_type_and_fork() {
        let d1 = compute_domain([1, 0, 0, 0], [0; 4], Hash256::zero());
        let d2 = compute_domain([2, 0, 0, 0], [0; 4], Hash256::zero());
        assert_ne!(d1, d2);
        assert_eq!(&d1.as_bytes()[0..4], &[1, 0, 0, 0]);
    }

    #[test]
    fn domain_is_sensitive_to_genesis_root() {
        let d1 = compute_domain([1, 0, 0, 0], [0; 4], Hash256::zero());
        let d2 = compute_domain([1, 0, 0, 0], [0; 4], Hash256::new([9; 32]));
        assert_ne!(d1, d2);
    }
}
