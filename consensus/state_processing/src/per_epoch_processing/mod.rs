mod final_updates;
mod justification_and_finalization;
mod registry_updates;
mod rewards_and_penalties;
mod slashings;

pub use final_updates::process_final_updates;
pub use justification_and_finalization::process_justification_and_finalization;
pub use registry_updates::process_registry_updates;
pub use rewards_and_penalties::process_rewards_and_penalties;
pub use slashings::process_slashings;

use crate::errors::Error;
use tracing::instrument;
use types::{BeaconState, ChainSpec, EthSpec};

/// The five-stage epoch transition, run once for every slot that starts a new epoch: finality
/// bookkeeping, then rewards/penalties, then registry churn, then the slashings sweep, then the
/// ring-buffer/pool housekeeping that prepares state for the epoch about to begin.
#[instrument(level = "debug", skip_all, fields(epoch = state.current_epoch().as_u64()))]
pub fn process_epoch<E: EthSpec>(state: &mut BeaconState<E>, spec: &ChainSpec) -> Result<(), Error> {
    process_justification_and_finalization(state, spec)?;
    process_rewards_and_penalties(state, spec)?;
    process_registry_updates(state, spec)?;
    process_slashings(state, spec)?;
    process_final_updates(state, spec)?;
    Ok(())
}
