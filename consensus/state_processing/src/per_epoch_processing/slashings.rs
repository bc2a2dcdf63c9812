use crate::common::decrease_balance;
use crate::errors::Error;
use safe_arith::SafeArith;
use types::{BeaconState, ChainSpec, EthSpec};

/// The per-epoch half of slashing punishment: `slash_validator` already docked
/// `effective_balance / MIN_SLASHING_PENALTY_QUOTIENT` immediately, but the full penalty scales
/// with how much of the total stake was slashed in the same window, which isn't known until
/// every slashing in that window has landed — hence this sweep, run once per epoch, halfway
/// through each slashed validator's `EPOCHS_PER_SLASHINGS_VECTOR`-long withdrawal delay.
pub fn process_slashings<E: EthSpec>(
    state: &mut BeaconState<E>,
    spec: &ChainSpec,
) -> Result<(), Error> {
    let epoch = state.current_epoch();
    let total_balance = state.get_total_active_balance(spec)?;

    let total_slashings: u64 = state.slashings.iter().try_fold(0u64, |acc, &s| acc.safe_add(s))?;
    let adjusted_total_slashing_balance = total_slashings
        .safe_mul(spec.proportional_slashing_multiplier)?
        .min(total_balance);

    let increment = spec.effective_balance_increment;
    let halfway = E::epochs_per_slashings_vector() as u64 / 2;

    for index in 0..state.validators.len() as u64 {
        let validator = state
            .validators
            .get(index as usize)
            .ok_or(types::BeaconStateError::UnknownValidator(index))?
            .clone();
        if validator.slashed && epoch.as_u64().safe_add(halfway)? == validator.withdrawable_epoch.as_u64()
        {
            let penalty_numerator = validator
                .effective_balance
                .safe_div(increment)?
                .safe_mul(adjusted_total_slashing_balance)?;
            let penalty = penalty_numerator
                .safe_div(total_balance)?
                .safe_mul(increment)?;
            decrease_balance(state, index, penalty)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{genesis_state, E};

    #[test]
    fn applies_the_proportional_penalty_exactly_at_the_halfway_withdrawal_epoch() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        let halfway = E::epochs_per_slashings_vector() as u64 / 2;
        state.slot = types::Epoch::new(halfway).start_slot(E::slots_per_epoch());

        let validator = state.validators.get_mut(0).unwrap();
        validator.slashed = true;
        validator.withdrawable_epoch = types::Epoch::new(halfway * 2);
        *state.slashings.get_mut(0).unwrap() = spec.max_effective_balance;

        let balance_before = *state.balances.get(0).unwrap();
        process_slashings(&mut state, &spec).unwrap();

        assert!(*state.balances.get(0).unwrap() < balance_before);
    }

    #[test]
    fn leaves_a_slashed_validator_untouched_outside_its_halfway_epoch() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        let validator = state.validators.get_mut(0).unwrap();
        validator.slashed = true;
        validator.withdrawable_epoch = types::Epoch::new(E::epochs_per_slashings_vector() as u64 * 2);
        *state.slashings.get_mut(0).unwrap() = spec.max_effective_balance;

        let balance_before = *state.balances.get(0).unwrap();
        process_slashings(&mut state, &spec).unwrap();

        assert_eq!(*state.balances.get(0).unwrap(), balance_before);
    }
}
