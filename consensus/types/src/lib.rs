//! The phase-0 domain model: value types for every consensus record, plus the flat
//! `BeaconState` and the accessor methods (`get_seed`, `get_beacon_committee`,
//! `get_beacon_proposer_index`, ...) that derive committees, proposers, and signature domains
//! from it. No processing logic lives here — that's `state_processing`.

mod attestation;
mod attestation_data;
mod attester_slashing;
mod beacon_block;
mod beacon_block_header;
mod beacon_state;
mod chain_spec;
mod checkpoint;
mod deposit;
mod domain;
mod eth1_data;
mod eth_spec;
mod fork;
mod hash256;
mod historical_batch;
mod proposer_slashing;
mod signing_root;
mod slot_epoch;
mod validator;
mod voluntary_exit;

pub use attestation::{Attestation, IndexedAttestation, PendingAttestation};
pub use attestation_data::AttestationData;
pub use attester_slashing::AttesterSlashing;
pub use beacon_block::{BeaconBlock, BeaconBlockBody, SignedBeaconBlock};
pub use beacon_block_header::{BeaconBlockHeader, SignedBeaconBlockHeader};
pub use beacon_state::{BeaconState, Error as BeaconStateError};
pub use chain_spec::ChainSpec;
pub use checkpoint::Checkpoint;
pub use deposit::{Deposit, DepositData, DepositMessage};
pub use domain::Domain;
pub use eth1_data::Eth1Data;
pub use eth_spec::{EthSpec, MainnetEthSpec, MinimalEthSpec};
pub use fork::{Fork, ForkData, SigningData};
pub use hash256::{hash, tree_hash_root, xor, Hash256};
pub use historical_batch::HistoricalBatch;
pub use proposer_slashing::ProposerSlashing;
pub use signing_root::{compute_domain, compute_signing_root};
pub use slot_epoch::{Epoch, Slot};
pub use validator::Validator;
pub use voluntary_exit::{SignedVoluntaryExit, VoluntaryExit};

pub use ssz_types;
