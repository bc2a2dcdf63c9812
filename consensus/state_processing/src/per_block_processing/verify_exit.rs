use crate::errors::{Error, ExitInvalid};
use types::{BeaconState, ChainSpec, EthSpec, VoluntaryExit};

/// The validator must be active, not already exiting, past its minimum active-duration
/// requirement, and the exit's stated epoch must already have arrived. Signature verification
/// happens separately via `signature_sets::exit_signature_set`.
pub fn verify_voluntary_exit<E: EthSpec>(
    state: &BeaconState<E>,
    exit: &VoluntaryExit,
    spec: &ChainSpec,
) -> Result<(), Error> {
    let validator = state
        .validators
        .get(exit.validator_index as usize)
        .ok_or(types::BeaconStateError::UnknownValidator(
            exit.validator_index,
        ))?;

    let current_epoch = state.current_epoch();
    if !validator.is_active_at(current_epoch) {
        return Err(Error::ExitInvalid(ExitInvalid::NotActive));
    }
    if validator.is_exiting(spec) {
        return Err(Error::ExitInvalid(ExitInvalid::AlreadyExiting));
    }
    if current_epoch < exit.epoch {
        return Err(Error::ExitInvalid(ExitInvalid::TooEarly));
    }
    let eligible_epoch = validator
        .activation_epoch
        .safe_add(spec.shard_committee_period)?;
    if current_epoch.as_u64() < eligible_epoch.as_u64() {
        return Err(Error::ExitInvalid(ExitInvalid::NotLongEnoughActive));
    }

    Ok(())
}
