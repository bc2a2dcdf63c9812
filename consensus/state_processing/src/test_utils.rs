//! Fixture construction shared by this crate's own unit tests. Not part of the public API:
//! genesis construction proper (seeding from the deposit contract) lives outside this core
//! entirely, but tests still need *some* well-formed starting state to drive `process_slots`
//! and `process_epoch` against.

use bls::{Keypair, SecretKey};
use ssz_types::{BitVector, FixedVector, VariableList};
use types::{
    BeaconBlockHeader, BeaconState, ChainSpec, Checkpoint, Eth1Data, EthSpec, Fork, Hash256,
    MinimalEthSpec, Validator,
};

pub type E = MinimalEthSpec;

/// A deterministic keypair for fixture validator `i` — same `i` always yields the same keys, so
/// tests that need to re-derive a pubkey don't have to thread keypairs through return values.
pub fn fixture_keypair(i: u64) -> Keypair {
    let mut ikm = [0u8; 32];
    ikm[0..8].copy_from_slice(&i.to_le_bytes());
    ikm[31] = 0xAA;
    let sk = SecretKey::key_gen(&ikm).expect("fixture ikm is long enough to derive a key");
    Keypair::from_secret(sk)
}

/// `num_validators` validators, all active since genesis with max effective balance, zero
/// `slot`, empty history, and empty attestation pools. Callers mutate the returned state to set
/// up whatever scenario they're testing (push attestations, advance the slot, slash someone).
pub fn genesis_state(spec: &ChainSpec, num_validators: u64) -> BeaconState<E> {
    let validators: Vec<Validator> = (0..num_validators)
        .map(|i| Validator {
            pubkey: fixture_keypair(i).pk.serialize(),
            withdrawal_credentials: Hash256::zero(),
            effective_balance: spec.max_effective_balance,
            slashed: false,
            activation_eligibility_epoch: spec.genesis_epoch,
            activation_epoch: spec.genesis_epoch,
            exit_epoch: spec.far_future_epoch,
            withdrawable_epoch: spec.far_future_epoch,
        })
        .collect();
    let balances = vec![spec.max_effective_balance; num_validators as usize];

    BeaconState::<E> {
        genesis_time: 0,
        genesis_validators_root: Hash256::zero(),
        slot: types::Slot::new(0),
        fork: Fork::genesis(spec.genesis_fork_version),

        latest_block_header: BeaconBlockHeader::default(),
        block_roots: FixedVector::new(vec![Hash256::zero(); E::slots_per_historical_root()])
            .expect("fixed-length vector sized to the type parameter"),
        state_roots: FixedVector::new(vec![Hash256::zero(); E::slots_per_historical_root()])
            .expect("fixed-length vector sized to the type parameter"),
        historical_roots: VariableList::default(),

        eth1_data: Eth1Data::default(),
        eth1_data_votes: VariableList::default(),
        eth1_deposit_index: 0,

        validators: VariableList::new(validators)
            .expect("validator count within ValidatorRegistryLimit"),
        balances: VariableList::new(balances).expect("balance count within ValidatorRegistryLimit"),

        randao_mixes: FixedVector::new(vec![Hash256::zero(); E::epochs_per_historical_vector()])
            .expect("fixed-length vector sized to the type parameter"),

        slashings: FixedVector::new(vec![0u64; E::epochs_per_slashings_vector()])
            .expect("fixed-length vector sized to the type parameter"),

        previous_epoch_attestations: VariableList::default(),
        current_epoch_attestations: VariableList::default(),

        justification_bits: BitVector::new(),
        previous_justified_checkpoint: Checkpoint::default(),
        current_justified_checkpoint: Checkpoint::default(),
        finalized_checkpoint: Checkpoint::default(),
    }
}
