use ssz_types::typenum::{U128, U16, U16777216, U2, U2048, U32, U4096, U65536, U8192};
use ssz_types::typenum::{U1099511627776, Unsigned};
use std::fmt::Debug;

/// Compile-time chain configuration: every `MAX_*` / `*_LIMIT` / `*_PER_*` constant that sizes a
/// fixed-length or list-bounded field, expressed as `typenum` unsigned integers so `ssz_types`
/// can enforce bounds and merkleization depth at the type level. `ChainSpec` carries the
/// run-time-tunable economics and timing constants instead; together they describe one chain.
pub trait EthSpec: 'static + Default + Sync + Send + Clone + Debug + PartialEq + Eq {
    type SlotsPerEpoch: Unsigned + Clone + Sync + Send + Debug + PartialEq + Eq;
    type SlotsPerEth1VotingPeriod: Unsigned + Clone + Sync + Send + Debug + PartialEq + Eq;
    type SlotsPerHistoricalRoot: Unsigned + Clone + Sync + Send + Debug + PartialEq + Eq;
    type EpochsPerHistoricalVector: Unsigned + Clone + Sync + Send + Debug + PartialEq + Eq;
    type EpochsPerSlashingsVector: Unsigned + Clone + Sync + Send + Debug + PartialEq + Eq;
    type MaxValidatorsPerCommittee: Unsigned + Clone + Sync + Send + Debug + PartialEq + Eq;
    type HistoricalRootsLimit: Unsigned + Clone + Sync + Send + Debug + PartialEq + Eq;
    type ValidatorRegistryLimit: Unsigned + Clone + Sync + Send + Debug + PartialEq + Eq;
    type MaxPendingAttestations: Unsigned + Clone + Sync + Send + Debug + PartialEq + Eq;
    type MaxProposerSlashings: Unsigned + Clone + Sync + Send + Debug + PartialEq + Eq;
    type MaxAttesterSlashings: Unsigned + Clone + Sync + Send + Debug + PartialEq + Eq;
    type MaxAttestations: Unsigned + Clone + Sync + Send + Debug + PartialEq + Eq;
    type MaxDeposits: Unsigned + Clone + Sync + Send + Debug + PartialEq + Eq;
    type MaxVoluntaryExits: Unsigned + Clone + Sync + Send + Debug + PartialEq + Eq;

    fn slots_per_epoch() -> u64 {
        Self::SlotsPerEpoch::to_u64()
    }

    fn slots_per_eth1_voting_period() -> u64 {
        Self::SlotsPerEth1VotingPeriod::to_u64()
    }

    fn slots_per_historical_root() -> usize {
        Self::SlotsPerHistoricalRoot::to_usize()
    }

    fn epochs_per_historical_vector() -> usize {
        Self::EpochsPerHistoricalVector::to_usize()
    }

    fn epochs_per_slashings_vector() -> usize {
        Self::EpochsPerSlashingsVector::to_usize()
    }

    fn max_validators_per_committee() -> usize {
        Self::MaxValidatorsPerCommittee::to_usize()
    }
}

/// Mainnet preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MainnetEthSpec;

impl EthSpec for MainnetEthSpec {
    type SlotsPerEpoch = U32;
    type SlotsPerEth1VotingPeriod = U2048;
    type SlotsPerHistoricalRoot = U8192;
    type EpochsPerHistoricalVector = U65536;
    type EpochsPerSlashingsVector = U8192;
    type MaxValidatorsPerCommittee = U2048;
    type HistoricalRootsLimit = U16777216;
    type ValidatorRegistryLimit = U1099511627776;
    type MaxPendingAttestations = U4096;
    type MaxProposerSlashings = U16;
    type MaxAttesterSlashings = U2;
    type MaxAttestations = U128;
    type MaxDeposits = U16;
    type MaxVoluntaryExits = U16;
}

/// A shrunk preset for tests: small enough to mint a few dozen validators and drive several
/// epoch transitions without the mainnet-scale ring buffers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinimalEthSpec;

impl EthSpec for MinimalEthSpec {
    type SlotsPerEpoch = ssz_types::typenum::U8;
    type SlotsPerEth1VotingPeriod = ssz_types::typenum::U16;
    type SlotsPerHistoricalRoot = ssz_types::typenum::U64;
    type EpochsPerHistoricalVector = ssz_types::typenum::U64;
    type EpochsPerSlashingsVector = ssz_types::typenum::U64;
    type MaxValidatorsPerCommittee = U2048;
    type HistoricalRootsLimit = U16777216;
    type ValidatorRegistryLimit = U1099511627776;
    type MaxPendingAttestations = U4096;
    type MaxProposerSlashings = U16;
    type MaxAttesterSlashings = U2;
    type MaxAttestations = U128;
    type MaxDeposits = U16;
    type MaxVoluntaryExits = U16;
}
