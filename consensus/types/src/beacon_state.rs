use crate::{
    BeaconBlockHeader, ChainSpec, Checkpoint, Domain, Epoch, Eth1Data, EthSpec, Fork, Hash256,
    PendingAttestation, Slot, Validator,
};
use safe_arith::{ArithError, SafeArith};
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::typenum::U4;
use ssz_types::{BitVector, FixedVector, VariableList};
use swap_or_not_shuffle::compute_shuffled_index;
use tree_hash_derive::TreeHash;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    SlotOutOfBounds,
    EpochOutOfBounds,
    ShuffleBounds,
    ArithError(ArithError),
    UnknownValidator(u64),
    InsufficientValidators,
}

impl From<ArithError> for Error {
    fn from(e: ArithError) -> Self {
        Error::ArithError(e)
    }
}

impl From<swap_or_not_shuffle::Error> for Error {
    fn from(_: swap_or_not_shuffle::Error) -> Self {
        Error::ShuffleBounds
    }
}

/// The flat consensus state. Every field here is consensus-critical: its `hash_tree_root` is
/// what every honest node must agree on bit-for-bit after processing the same block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
#[serde(bound = "E: EthSpec")]
pub struct BeaconState<E: EthSpec> {
    // Versioning
    pub genesis_time: u64,
    pub genesis_validators_root: Hash256,
    pub slot: Slot,
    pub fork: Fork,

    // History
    pub latest_block_header: BeaconBlockHeader,
    pub block_roots: FixedVector<Hash256, E::SlotsPerHistoricalRoot>,
    pub state_roots: FixedVector<Hash256, E::SlotsPerHistoricalRoot>,
    pub historical_roots: VariableList<Hash256, E::HistoricalRootsLimit>,

    // Eth1
    pub eth1_data: Eth1Data,
    pub eth1_data_votes: VariableList<Eth1Data, E::SlotsPerEth1VotingPeriod>,
    pub eth1_deposit_index: u64,

    // Registry
    pub validators: VariableList<Validator, E::ValidatorRegistryLimit>,
    pub balances: VariableList<u64, E::ValidatorRegistryLimit>,

    // Randomness
    pub randao_mixes: FixedVector<Hash256, E::EpochsPerHistoricalVector>,

    // Slashings
    pub slashings: FixedVector<u64, E::EpochsPerSlashingsVector>,

    // Attestations
    pub previous_epoch_attestations: VariableList<PendingAttestation<E>, E::MaxPendingAttestations>,
    pub current_epoch_attestations: VariableList<PendingAttestation<E>, E::MaxPendingAttestations>,

    // Finality
    pub justification_bits: BitVector<U4>,
    pub previous_justified_checkpoint: Checkpoint,
    pub current_justified_checkpoint: Checkpoint,
    pub finalized_checkpoint: Checkpoint,
}

impl<E: EthSpec> BeaconState<E> {
    pub fn current_epoch(&self) -> Epoch {
        self.slot.epoch(E::slots_per_epoch())
    }

    pub fn previous_epoch(&self) -> Epoch {
        let current = self.current_epoch();
        if current.as_u64() == 0 {
            current
        } else {
            current.saturating_sub(Epoch::new(1))
        }
    }

    pub fn next_epoch(&self) -> Result<Epoch, Error> {
        Ok(self.current_epoch().safe_add(1)?)
    }

    /// Bound the lookup to the retained window: `[slot.saturating_sub(SLOTS_PER_HISTORICAL_ROOT), slot]`.
    pub fn get_block_root_at_slot(&self, slot: Slot) -> Result<&Hash256, Error> {
        let root_length = E::slots_per_historical_root() as u64;
        if slot.as_u64() >= self.slot.as_u64() || self.slot.as_u64() > slot.as_u64() + root_length
        {
            return Err(Error::SlotOutOfBounds);
        }
        let i = (slot.as_u64() % root_length) as usize;
        self.block_roots.get(i).ok_or(Error::SlotOutOfBounds)
    }

    pub fn get_block_root(&self, epoch: Epoch) -> Result<&Hash256, Error> {
        self.get_block_root_at_slot(epoch.start_slot(E::slots_per_epoch()))
    }

    pub fn set_block_root(&mut self, slot: Slot, root: Hash256) -> Result<(), Error> {
        let root_length = E::slots_per_historical_root();
        let i = slot.as_usize() % root_length;
        *self.block_roots.get_mut(i).ok_or(Error::SlotOutOfBounds)? = root;
        Ok(())
    }

    pub fn set_state_root(&mut self, slot: Slot, root: Hash256) -> Result<(), Error> {
        let root_length = E::slots_per_historical_root();
        let i = slot.as_usize() % root_length;
        *self.state_roots.get_mut(i).ok_or(Error::SlotOutOfBounds)? = root;
        Ok(())
    }

    pub fn get_randao_mix(&self, epoch: Epoch) -> Result<&Hash256, Error> {
        let len = E::epochs_per_historical_vector();
        let i = (epoch.as_u64() % len as u64) as usize;
        self.randao_mixes.get(i).ok_or(Error::EpochOutOfBounds)
    }

    pub fn set_randao_mix(&mut self, epoch: Epoch, mix: Hash256) -> Result<(), Error> {
        let len = E::epochs_per_historical_vector();
        let i = (epoch.as_u64() % len as u64) as usize;
        *self
            .randao_mixes
            .get_mut(i)
            .ok_or(Error::EpochOutOfBounds)? = mix;
        Ok(())
    }

    pub fn get_active_validator_indices(&self, epoch: Epoch) -> Vec<u64> {
        self.validators
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_active_at(epoch))
            .map(|(i, _)| i as u64)
            .collect()
    }

    /// `max(EFFECTIVE_BALANCE_INCREMENT, sum(effective_balance))` — never zero, so it's always
    /// safe to divide by.
    pub fn get_total_balance(&self, indices: &[u64], spec: &ChainSpec) -> Result<u64, Error> {
        let mut total = 0u64;
        for &i in indices {
            let balance = self
                .validators
                .get(i as usize)
                .ok_or(Error::UnknownValidator(i))?
                .effective_balance;
            total = total.safe_add(balance)?;
        }
        Ok(total.max(spec.effective_balance_increment))
    }

    pub fn get_total_active_balance(&self, spec: &ChainSpec) -> Result<u64, Error> {
        let indices = self.get_active_validator_indices(self.current_epoch());
        self.get_total_balance(&indices, spec)
    }

    /// `hash(domain_type || little-endian(epoch) || randao_mix)`, where the mix is taken from
    /// `MIN_SEED_LOOKAHEAD` epochs before the *end* of the historical-vector window containing
    /// `epoch` — i.e. far enough in the past that it can't be influenced by the very validators
    /// whose committee it's about to seed.
    pub fn get_seed(&self, epoch: Epoch, domain_type: [u8; 4], spec: &ChainSpec) -> Result<Hash256, Error> {
        let lookahead_epoch = Epoch::new(
            epoch
                .as_u64()
                .safe_add(E::epochs_per_historical_vector() as u64)?
                .safe_sub(spec.min_seed_lookahead)?
                .safe_sub(1)?,
        );
        let mix = self.get_randao_mix(lookahead_epoch)?;

        let mut preimage = Vec::with_capacity(4 + 8 + 32);
        preimage.extend_from_slice(&domain_type);
        preimage.extend_from_slice(&int_to_bytes::int_to_bytes8(epoch.as_u64(), 8));
        preimage.extend_from_slice(mix.as_slice());
        Ok(crate::hash256::hash(&preimage))
    }

    pub fn get_committee_count_per_slot(&self, epoch: Epoch, spec: &ChainSpec) -> u64 {
        let active_count = self.get_active_validator_indices(epoch).len() as u64;
        (active_count / E::slots_per_epoch() / spec.target_committee_size)
            .clamp(1, spec.max_committees_per_slot)
    }

    /// `shuffle_list(indices, seed)[start..end]` with `start = len*index/count`,
    /// `end = len*(index+1)/count` — integer division truncates. Forward shuffle, matching
    /// `get_beacon_proposer_index`'s own direction.
    fn compute_committee(
        indices: &[u64],
        seed: Hash256,
        index: u64,
        count: u64,
        spec: &ChainSpec,
    ) -> Result<Vec<u64>, Error> {
        let len = indices.len();
        let start = (len as u64 * index / count) as usize;
        let end = (len as u64 * (index + 1) / count) as usize;

        let positions: Vec<usize> = (0..len).collect();
        let mut seed_bytes = [0u8; 32];
        seed_bytes.copy_from_slice(seed.as_slice());
        let shuffled = swap_or_not_shuffle::shuffle_list(
            positions,
            spec.shuffle_round_count,
            &seed_bytes,
            true,
        )?;

        Ok(shuffled[start..end].iter().map(|&i| indices[i]).collect())
    }

    pub fn get_beacon_committee(
        &self,
        slot: Slot,
        committee_index: u64,
        spec: &ChainSpec,
    ) -> Result<Vec<u64>, Error> {
        let epoch = slot.epoch(E::slots_per_epoch());
        let committees_per_slot = self.get_committee_count_per_slot(epoch, spec);
        let indices = self.get_active_validator_indices(epoch);
        let seed = self.get_seed(epoch, spec.domain_beacon_attester, spec)?;

        let slot_offset = slot.as_u64() % E::slots_per_epoch();
        Self::compute_committee(
            &indices,
            seed,
            slot_offset * committees_per_slot + committee_index,
            committees_per_slot * E::slots_per_epoch(),
            spec,
        )
    }

    /// Rejection-sample the next proposer: walk candidates in shuffled order, accepting the
    /// first whose effective balance clears a random per-candidate threshold. Unbounded in
    /// principle; terminates in O(1) expected steps because `MAX_EFFECTIVE_BALANCE` candidates
    /// are accepted with probability proportional to stake.
    pub fn get_beacon_proposer_index(&self, spec: &ChainSpec) -> Result<u64, Error> {
        let epoch = self.current_epoch();
        let base_seed = self.get_seed(epoch, spec.domain_beacon_proposer, spec)?;

        let mut preimage = Vec::with_capacity(32 + 8);
        preimage.extend_from_slice(base_seed.as_slice());
        preimage.extend_from_slice(&int_to_bytes::int_to_bytes8(self.slot.as_u64(), 8));
        let seed = crate::hash256::hash(&preimage);
        let mut seed_bytes = [0u8; 32];
        seed_bytes.copy_from_slice(seed.as_slice());

        let indices = self.get_active_validator_indices(epoch);
        if indices.is_empty() {
            return Err(Error::InsufficientValidators);
        }
        let total = indices.len();

        let mut i: u64 = 0;
        loop {
            let shuffled_i =
                compute_shuffled_index((i % total as u64) as usize, total, &seed_bytes, spec.shuffle_round_count, true)?;
            let candidate_index = indices[shuffled_i];

            let mut random_preimage = Vec::with_capacity(32 + 8);
            random_preimage.extend_from_slice(&seed_bytes);
            random_preimage.extend_from_slice(&int_to_bytes::int_to_bytes8(i / 32, 8));
            let random_byte =
                crate::hash256::hash(&random_preimage).as_slice()[(i % 32) as usize];

            let effective_balance = self
                .validators
                .get(candidate_index as usize)
                .ok_or(Error::UnknownValidator(candidate_index))?
                .effective_balance;

            if effective_balance * 255 >= spec.max_effective_balance * random_byte as u64 {
                return Ok(candidate_index);
            }
            i += 1;
        }
    }

    pub fn get_domain(&self, domain: Domain, epoch: Epoch, spec: &ChainSpec) -> Hash256 {
        let fork_version = self.fork.get_fork_version(epoch);
        crate::signing_root::compute_domain(
            spec.get_domain_constant(domain),
            fork_version,
            self.genesis_validators_root,
        )
    }
}
