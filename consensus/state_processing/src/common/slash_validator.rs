use crate::common::initiate_validator_exit::initiate_validator_exit;
use crate::errors::Error;
use safe_arith::SafeArith;
use types::{BeaconState, ChainSpec, Epoch, EthSpec};

/// The slashing primitive shared by `process_proposer_slashing` and
/// `process_attester_slashing`: exit the validator, mark it slashed, extend its withdrawable
/// epoch, record the penalty into the current slashings-vector slot (for the per-epoch sweep),
/// and immediately dock `effective_balance / MIN_SLASHING_PENALTY_QUOTIENT`. The remainder of
/// the eventual slashing penalty is socialized via `process_slashings` at epoch boundaries.
pub fn slash_validator<E: EthSpec>(
    state: &mut BeaconState<E>,
    slashed_index: u64,
    whistleblower_index: Option<u64>,
    spec: &ChainSpec,
) -> Result<(), Error> {
    let current_epoch = state.current_epoch();
    initiate_validator_exit(state, slashed_index, spec)?;

    let validator = state
        .validators
        .get_mut(slashed_index as usize)
        .ok_or(types::BeaconStateError::UnknownValidator(slashed_index))?;
    validator.slashed = true;
    validator.withdrawable_epoch = Epoch::new(
        validator
            .withdrawable_epoch
            .as_u64()
            .max(current_epoch.as_u64().safe_add(E::epochs_per_slashings_vector() as u64)?),
    );
    let effective_balance = validator.effective_balance;

    let slashings_index =
        (current_epoch.as_u64() % E::epochs_per_slashings_vector() as u64) as usize;
    let slot = state
        .slashings
        .get_mut(slashings_index)
        .ok_or(Error::HistoricalLookup)?;
    *slot = slot.safe_add(effective_balance)?;

    decrease_balance(
        state,
        slashed_index,
        effective_balance.safe_div(spec.min_slashing_penalty_quotient)?,
    )?;

    let proposer_index = state.get_beacon_proposer_index(spec)?;
    let whistleblower_index = whistleblower_index.unwrap_or(proposer_index);
    let whistleblower_reward = effective_balance.safe_div(spec.whistleblower_reward_quotient)?;
    let proposer_reward = whistleblower_reward.safe_div(spec.proposer_reward_quotient)?;

    increase_balance(state, proposer_index, proposer_reward)?;
    increase_balance(
        state,
        whistleblower_index,
        whistleblower_reward.safe_sub(proposer_reward)?,
    )?;
    Ok(())
}

pub fn increase_balance<E: EthSpec>(
    state: &mut BeaconState<E>,
    index: u64,
    delta: u64,
) -> Result<(), Error> {
    let balance = state
        .balances
        .get_mut(index as usize)
        .ok_or(types::BeaconStateError::UnknownValidator(index))?;
    *balance = balance.safe_add(delta)?;
    Ok(())
}

/// Saturating at zero: a penalty larger than the remaining balance empties the account rather
/// than underflowing or erroring.
pub fn decrease_balance<E: EthSpec>(
    state: &mut BeaconState<E>,
    index: u64,
    delta: u64,
) -> Result<(), Error> {
    let balance = state
        .balances
        .get_mut(index as usize)
        .ok_or(types::BeaconStateError::UnknownValidator(index))?;
    *balance = balance.saturating_sub(delta);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{genesis_state, E};

    #[test]
    fn slashing_marks_exits_penalizes_and_rewards_the_default_whistleblower() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        let proposer_index = state.get_beacon_proposer_index(&spec).unwrap();
        let slashed_index = (0..8u64).find(|&i| i != proposer_index).unwrap();

        let balance_before = *state.balances.get(slashed_index as usize).unwrap();
        let proposer_balance_before = *state.balances.get(proposer_index as usize).unwrap();

        slash_validator(&mut state, slashed_index, None, &spec).unwrap();

        let validator = state.validators.get(slashed_index as usize).unwrap();
        assert!(validator.slashed);
        assert_eq!(
            validator.withdrawable_epoch.as_u64(),
            E::epochs_per_slashings_vector() as u64
        );

        let penalty = spec.max_effective_balance / spec.min_slashing_penalty_quotient;
        assert_eq!(
            *state.balances.get(slashed_index as usize).unwrap(),
            balance_before - penalty
        );

        // No explicit whistleblower was named, so the proposer collects the whole reward.
        let whistleblower_reward = spec.max_effective_balance / spec.whistleblower_reward_quotient;
        assert_eq!(
            *state.balances.get(proposer_index as usize).unwrap(),
            proposer_balance_before + whistleblower_reward
        );

        assert_eq!(*state.slashings.get(0).unwrap(), spec.max_effective_balance);
    }
}
