use crate::errors::Error;
use types::{BeaconState, ChainSpec, Epoch, EthSpec};

/// How many validators may enter the activation or exit queue in one epoch: a floor of
/// `MIN_PER_EPOCH_CHURN_LIMIT`, scaling up with the active set so a large validator set isn't
/// bottlenecked by a constant.
pub fn get_validator_churn_limit<E: EthSpec>(
    state: &BeaconState<E>,
    spec: &ChainSpec,
) -> u64 {
    let active_count = state.get_active_validator_indices(state.current_epoch()).len() as u64;
    (active_count / spec.churn_limit_quotient).max(spec.min_per_epoch_churn_limit)
}

/// Queue `index` for exit, picking the earliest exit epoch whose queue isn't already full. A
/// no-op if the validator is already exiting — called unconditionally by both
/// `process_registry_updates` (ejection) and the exit/slashing operation handlers.
pub fn initiate_validator_exit<E: EthSpec>(
    state: &mut BeaconState<E>,
    index: u64,
    spec: &ChainSpec,
) -> Result<(), Error> {
    if state
        .validators
        .get(index as usize)
        .ok_or(types::BeaconStateError::UnknownValidator(index))?
        .is_exiting(spec)
    {
        return Ok(());
    }

    let delayed_epoch = Epoch::new(
        state
            .current_epoch()
            .as_u64()
            .saturating_add(spec.max_seed_lookahead)
            .saturating_add(1),
    );
    let mut exit_queue_epoch = state
        .validators
        .iter()
        .filter(|v| v.exit_epoch != spec.far_future_epoch)
        .map(|v| v.exit_epoch)
        .fold(delayed_epoch, |max_epoch, e| {
            if e.as_u64() > max_epoch.as_u64() {
                e
            } else {
                max_epoch
            }
        });

    let exit_queue_churn = state
        .validators
        .iter()
        .filter(|v| v.exit_epoch == exit_queue_epoch)
        .count() as u64;

    if exit_queue_churn >= get_validator_churn_limit(state, spec) {
        exit_queue_epoch = exit_queue_epoch.safe_add(1)?;
    }

    let validator = state
        .validators
        .get_mut(index as usize)
        .ok_or(types::BeaconStateError::UnknownValidator(index))?;
    validator.exit_epoch = exit_queue_epoch;
    validator.withdrawable_epoch =
        exit_queue_epoch.safe_add(spec.min_validator_withdrawability_delay)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::genesis_state;

    #[test]
    fn queues_at_the_earliest_non_full_exit_epoch() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);

        initiate_validator_exit(&mut state, 0, &spec).unwrap();
        let exit_epoch = state.validators.get(0).unwrap().exit_epoch;
        assert_eq!(
            exit_epoch.as_u64(),
            state.current_epoch().as_u64() + spec.max_seed_lookahead + 1
        );
        assert_eq!(
            state.validators.get(0).unwrap().withdrawable_epoch,
            exit_epoch.safe_add(spec.min_validator_withdrawability_delay).unwrap()
        );
    }

    #[test]
    fn is_a_no_op_for_an_already_exiting_validator() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        initiate_validator_exit(&mut state, 0, &spec).unwrap();
        let after_first = state.validators.get(0).unwrap().clone();

        initiate_validator_exit(&mut state, 0, &spec).unwrap();
        assert_eq!(*state.validators.get(0).unwrap(), after_first);
    }

    #[test]
    fn pushes_to_the_next_epoch_once_the_churn_limit_is_reached() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        let churn_limit = get_validator_churn_limit(&state, &spec);

        for i in 0..churn_limit {
            initiate_validator_exit(&mut state, i, &spec).unwrap();
        }
        let filled_epoch = state.validators.get(0).unwrap().exit_epoch;

        initiate_validator_exit(&mut state, churn_limit, &spec).unwrap();
        let overflow_epoch = state.validators.get(churn_limit as usize).unwrap().exit_epoch;

        assert_eq!(overflow_epoch.as_u64(), filled_epoch.as_u64() + 1);
    }
}
