use crate::{EthSpec, Hash256};
use ssz_derive::{Decode, Encode};
use ssz_types::FixedVector;
use tree_hash_derive::TreeHash;

/// What `historical_roots` actually accumulates roots of: a snapshot of one
/// `slots_per_historical_root`-sized window of the block/state root ring buffers, taken right
/// before they wrap around and start overwriting themselves.
#[derive(Debug, Clone, PartialEq, Encode, Decode, TreeHash)]
pub struct HistoricalBatch<E: EthSpec> {
    pub block_roots: FixedVector<Hash256, E::SlotsPerHistoricalRoot>,
    pub state_roots: FixedVector<Hash256, E::SlotsPerHistoricalRoot>,
}
