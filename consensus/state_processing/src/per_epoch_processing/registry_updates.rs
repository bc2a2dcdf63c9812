use crate::common::{get_validator_churn_limit, initiate_validator_exit};
use crate::errors::Error;
use safe_arith::SafeArith;
use types::{BeaconState, ChainSpec, Epoch, EthSpec};

fn compute_activation_exit_epoch(epoch: Epoch, spec: &ChainSpec) -> Result<Epoch, Error> {
    Ok(epoch.safe_add(1)?.safe_add(spec.max_seed_lookahead)?)
}

/// Queue newly-eligible validators for activation, eject anyone who dropped below
/// `EJECTION_BALANCE`, then admit as many of the queue as the churn limit allows — ties broken
/// by `(activation_eligibility_epoch, index)` so the queue is a stable FIFO rather than an
/// artifact of iteration order.
pub fn process_registry_updates<E: EthSpec>(
    state: &mut BeaconState<E>,
    spec: &ChainSpec,
) -> Result<(), Error> {
    let current_epoch = state.current_epoch();

    for index in 0..state.validators.len() as u64 {
        let validator = state
            .validators
            .get(index as usize)
            .ok_or(types::BeaconStateError::UnknownValidator(index))?
            .clone();

        if validator.is_eligible_for_activation_queue(spec) {
            state
                .validators
                .get_mut(index as usize)
                .ok_or(types::BeaconStateError::UnknownValidator(index))?
                .activation_eligibility_epoch = current_epoch.safe_add(1)?;
        }

        if validator.is_active_at(current_epoch) && validator.effective_balance <= spec.ejection_balance
        {
            initiate_validator_exit(state, index, spec)?;
        }
    }

    let finalized_epoch = state.finalized_checkpoint.epoch;
    let mut activation_queue: Vec<u64> = (0..state.validators.len() as u64)
        .filter(|&index| {
            state
                .validators
                .get(index as usize)
                .map(|v| v.is_eligible_for_activation(finalized_epoch, spec))
                .unwrap_or(false)
        })
        .collect();
    activation_queue.sort_by_key(|&index| {
        (
            state
                .validators
                .get(index as usize)
                .map(|v| v.activation_eligibility_epoch.as_u64())
                .unwrap_or(u64::MAX),
            index,
        )
    });

    let churn_limit = get_validator_churn_limit(state, spec) as usize;
    let activation_exit_epoch = compute_activation_exit_epoch(current_epoch, spec)?;
    for &index in activation_queue.iter().take(churn_limit) {
        if let Some(validator) = state.validators.get_mut(index as usize) {
            validator.activation_epoch = activation_exit_epoch;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::genesis_state;

    #[test]
    fn ejects_a_validator_whose_balance_dropped_to_the_ejection_threshold() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        state.validators.get_mut(0).unwrap().effective_balance = spec.ejection_balance;

        process_registry_updates(&mut state, &spec).unwrap();

        assert!(state.validators.get(0).unwrap().is_exiting(&spec));
    }

    #[test]
    fn queues_eligibility_but_waits_for_finalization_before_activating() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        let mut fresh = state.validators.get(0).unwrap().clone();
        fresh.activation_eligibility_epoch = spec.far_future_epoch;
        fresh.activation_epoch = spec.far_future_epoch;
        fresh.exit_epoch = spec.far_future_epoch;
        state.validators.push(fresh).unwrap();
        state.balances.push(spec.max_effective_balance).unwrap();
        let new_index = state.validators.len() - 1;

        process_registry_updates(&mut state, &spec).unwrap();

        let validator = state.validators.get(new_index).unwrap();
        assert_eq!(validator.activation_eligibility_epoch, state.current_epoch().safe_add(1).unwrap());
        // `finalized_checkpoint` hasn't caught up to that eligibility epoch yet, so admission
        // into the active set doesn't happen in this same call.
        assert_eq!(validator.activation_epoch, spec.far_future_epoch);
    }
}
