use crate::domain::Domain;
use crate::{Epoch, Hash256};

/// Every constant the phase-0 state transition consults, gathered into one immutable value
/// passed through the whole call rather than read from globals. Mainnet values below; a
/// consumer wiring up a devnet would build a different `ChainSpec` the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSpec {
    // Misc
    pub max_committees_per_slot: u64,
    pub target_committee_size: u64,
    pub max_validators_per_committee: u64,
    pub shuffle_round_count: u8,
    pub min_genesis_active_validator_count: u64,
    pub hysteresis_quotient: u64,
    pub hysteresis_downward_multiplier: u64,
    pub hysteresis_upward_multiplier: u64,

    // Gwei values
    pub min_deposit_amount: u64,
    pub max_effective_balance: u64,
    pub ejection_balance: u64,
    pub effective_balance_increment: u64,

    // Time parameters
    pub min_attestation_inclusion_delay: u64,
    pub slots_per_epoch: u64,
    pub min_seed_lookahead: u64,
    pub max_seed_lookahead: u64,
    pub epochs_per_eth1_voting_period: u64,
    pub slots_per_historical_root: u64,
    pub min_validator_withdrawability_delay: u64,
    pub shard_committee_period: u64,
    pub min_epochs_to_inactivity_penalty: u64,

    // State list lengths
    pub epochs_per_historical_vector: u64,
    pub epochs_per_slashings_vector: u64,

    // Rewards and penalties
    pub base_reward_factor: u64,
    pub base_rewards_per_epoch: u64,
    pub whistleblower_reward_quotient: u64,
    pub proposer_reward_quotient: u64,
    pub inactivity_penalty_quotient: u64,
    pub min_slashing_penalty_quotient: u64,
    pub proportional_slashing_multiplier: u64,

    // Max operations per block
    pub max_proposer_slashings: u64,
    pub max_attester_slashings: u64,
    pub max_attestations: u64,
    pub max_deposits: u64,
    pub max_voluntary_exits: u64,

    // Validator churn
    pub min_per_epoch_churn_limit: u64,
    pub churn_limit_quotient: u64,

    // Deposit contract
    pub deposit_contract_tree_depth: u64,

    // Domain types
    pub domain_beacon_proposer: [u8; 4],
    pub domain_beacon_attester: [u8; 4],
    pub domain_randao: [u8; 4],
    pub domain_deposit: [u8; 4],
    pub domain_voluntary_exit: [u8; 4],
    pub domain_selection_proof: [u8; 4],
    pub domain_aggregate_and_proof: [u8; 4],

    // Genesis
    pub genesis_fork_version: [u8; 4],
    pub genesis_epoch: Epoch,
    pub far_future_epoch: Epoch,
}

impl ChainSpec {
    /// The raw 4-byte tag for a [`Domain`], before fork-version/genesis-root mixing.
    pub fn get_domain_constant(&self, domain: Domain) -> [u8; 4] {
        match domain {
            Domain::BeaconProposer => self.domain_beacon_proposer,
            Domain::BeaconAttester => self.domain_beacon_attester,
            Domain::Randao => self.domain_randao,
            Domain::Deposit => self.domain_deposit,
            Domain::VoluntaryExit => self.domain_voluntary_exit,
            Domain::SelectionProof => self.domain_selection_proof,
            Domain::AggregateAndProof => self.domain_aggregate_and_proof,
        }
    }

    /// Deposits are verified against a domain mixing the zero fork version and zero genesis
    /// validators root, regardless of the chain's actual fork — new validators must be
    /// onboardable before the chain they're joining has even forked once.
    pub fn deposit_domain(&self) -> Hash256 {
        crate::signing_root::compute_domain(
            self.domain_deposit,
            [0u8; 4],
            Hash256::zero(),
        )
    }

    pub fn mainnet() -> Self {
        ChainSpec {
            max_committees_per_slot: 64,
            target_committee_size: 128,
            max_validators_per_committee: 2048,
            shuffle_round_count: 90,
            min_genesis_active_validator_count: 16_384,
            hysteresis_quotient: 4,
            hysteresis_downward_multiplier: 1,
            hysteresis_upward_multiplier: 5,

            min_deposit_amount: 1_000_000_000,
            max_effective_balance: 32_000_000_000,
            ejection_balance: 16_000_000_000,
            effective_balance_increment: 1_000_000_000,

            min_attestation_inclusion_delay: 1,
            slots_per_epoch: 32,
            min_seed_lookahead: 1,
            max_seed_lookahead: 4,
            epochs_per_eth1_voting_period: 64,
            slots_per_historical_root: 8_192,
            min_validator_withdrawability_delay: 256,
            shard_committee_period: 256,
            min_epochs_to_inactivity_penalty: 4,

            epochs_per_historical_vector: 65_536,
            epochs_per_slashings_vector: 8_192,

            base_reward_factor: 64,
            base_rewards_per_epoch: 4,
            whistleblower_reward_quotient: 512,
            proposer_reward_quotient: 8,
            inactivity_penalty_quotient: 1 << 26,
            min_slashing_penalty_quotient: 128,
            proportional_slashing_multiplier: 1,

            max_proposer_slashings: 16,
            max_attester_slashings: 2,
            max_attestations: 128,
            max_deposits: 16,
            max_voluntary_exits: 16,

            min_per_epoch_churn_limit: 4,
            churn_limit_quotient: 65_536,

            deposit_contract_tree_depth: 32,

            domain_beacon_proposer: [0x00, 0x00, 0x00, 0x00],
            domain_beacon_attester: [0x01, 0x00, 0x00, 0x00],
            domain_randao: [0x02, 0x00, 0x00, 0x00],
            domain_deposit: [0x03, 0x00, 0x00, 0x00],
            domain_voluntary_exit: [0x04, 0x00, 0x00, 0x00],
            domain_selection_proof: [0x05, 0x00, 0x00, 0x00],
            domain_aggregate_and_proof: [0x06, 0x00, 0x00, 0x00],

            genesis_fork_version: [0x00, 0x00, 0x00, 0x00],
            genesis_epoch: Epoch::new(0),
            far_future_epoch: Epoch::new(u64::MAX),
        }
    }
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl ChainSpec {
    /// A minimal spec with small committee/epoch sizes, matching `MinimalEthSpec`'s
    /// collection bounds. Handy for tests and local devnets that want to exercise a full epoch
    /// transition without minting thousands of validators.
    pub fn minimal() -> ChainSpec {
        let mut spec = ChainSpec::mainnet();
        spec.slots_per_epoch = 8;
        spec.target_committee_size = 4;
        spec.shuffle_round_count = 10;
        spec.epochs_per_historical_vector = 64;
        spec.epochs_per_slashings_vector = 64;
        spec.slots_per_historical_root = 64;
        spec.shard_committee_period = 16;
        spec.min_validator_withdrawability_delay = 16;
        // Matches `MinimalEthSpec::SlotsPerEth1VotingPeriod` (16 = 2 epochs * 8 slots), so the
        // `eth1_data_votes` list never needs more capacity than the type-level SSZ bound allows.
        spec.epochs_per_eth1_voting_period = 2;
        spec
    }
}
