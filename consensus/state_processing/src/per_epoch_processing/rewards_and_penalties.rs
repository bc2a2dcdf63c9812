use crate::common::{
    decrease_balance, get_matching_head_attestations, get_matching_source_attestations,
    get_matching_target_attestations, get_unslashed_attesting_indices, increase_balance,
};
use crate::errors::Error;
use safe_arith::SafeArith;
use types::{BeaconState, ChainSpec, EthSpec, PendingAttestation};

fn integer_sqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

fn base_reward<E: EthSpec>(
    state: &BeaconState<E>,
    index: u64,
    total_active_balance: u64,
    spec: &ChainSpec,
) -> Result<u64, Error> {
    let effective_balance = state
        .validators
        .get(index as usize)
        .ok_or(types::BeaconStateError::UnknownValidator(index))?
        .effective_balance;
    let sqrt_total = integer_sqrt(total_active_balance).max(1);
    Ok(effective_balance
        .safe_mul(spec.base_reward_factor)?
        .safe_div(sqrt_total)?
        .safe_div(spec.base_rewards_per_epoch)?)
}

fn proposer_reward<E: EthSpec>(
    state: &BeaconState<E>,
    index: u64,
    total_active_balance: u64,
    spec: &ChainSpec,
) -> Result<u64, Error> {
    Ok(base_reward(state, index, total_active_balance, spec)?
        .safe_div(spec.proposer_reward_quotient)?)
}

fn finality_delay<E: EthSpec>(state: &BeaconState<E>) -> u64 {
    state
        .previous_epoch()
        .as_u64()
        .saturating_sub(state.finalized_checkpoint.epoch.as_u64())
}

fn is_in_inactivity_leak<E: EthSpec>(state: &BeaconState<E>, spec: &ChainSpec) -> bool {
    finality_delay(state) > spec.min_epochs_to_inactivity_penalty
}

/// Active in the previous epoch, or slashed-but-not-yet-withdrawable: the set rewards and
/// penalties are computed over, distinct from the active set (a slashed validator keeps
/// accruing inactivity penalties until it can finally withdraw).
fn eligible_validator_indices<E: EthSpec>(state: &BeaconState<E>) -> Vec<u64> {
    let previous_epoch = state.previous_epoch();
    state
        .validators
        .iter()
        .enumerate()
        .filter(|(_, v)| {
            v.is_active_at(previous_epoch)
                || (v.slashed && previous_epoch.as_u64() + 1 < v.withdrawable_epoch.as_u64())
        })
        .map(|(i, _)| i as u64)
        .collect()
}

/// Shared shape of the source/target/head reward components: full base reward to attesters
/// while finality is fresh, scaled down proportionally to attesting balance once it isn't; a
/// flat base-reward penalty to everyone eligible who didn't attest correctly.
fn attestation_component_deltas<E: EthSpec>(
    state: &BeaconState<E>,
    attestations: &[PendingAttestation<E>],
    total_active_balance: u64,
    spec: &ChainSpec,
) -> Result<(Vec<u64>, Vec<u64>), Error> {
    let n = state.validators.len();
    let mut rewards = vec![0u64; n];
    let mut penalties = vec![0u64; n];

    let attesting_indices = get_unslashed_attesting_indices(state, attestations, spec)?;
    let attesting_balance = state.get_total_balance(&attesting_indices, spec)?;
    let attesting_set: std::collections::BTreeSet<u64> = attesting_indices.into_iter().collect();
    let increment = spec.effective_balance_increment;
    let leaking = is_in_inactivity_leak(state, spec);

    for index in eligible_validator_indices(state) {
        let reward = base_reward(state, index, total_active_balance, spec)?;
        if attesting_set.contains(&index) {
            if leaking {
                rewards[index as usize] = rewards[index as usize].safe_add(reward)?;
            } else {
                let numerator = reward.safe_mul(attesting_balance.safe_div(increment)?)?;
                let denominator = total_active_balance.safe_div(increment)?;
                rewards[index as usize] =
                    rewards[index as usize].safe_add(numerator.safe_div(denominator)?)?;
            }
        } else {
            penalties[index as usize] = penalties[index as usize].safe_add(reward)?;
        }
    }
    Ok((rewards, penalties))
}

fn inclusion_delay_rewards<E: EthSpec>(
    state: &BeaconState<E>,
    source_attestations: &[PendingAttestation<E>],
    total_active_balance: u64,
    spec: &ChainSpec,
) -> Result<Vec<u64>, Error> {
    let n = state.validators.len();
    let mut rewards = vec![0u64; n];

    let attesting_indices = get_unslashed_attesting_indices(state, source_attestations, spec)?;
    for index in attesting_indices {
        let earliest = source_attestations
            .iter()
            .filter(|a| attestation_includes(state, a, index, spec))
            .min_by_key(|a| a.inclusion_delay)
            .ok_or(Error::HistoricalLookup)?;

        let reward = base_reward(state, index, total_active_balance, spec)?;
        let proposer_cut = proposer_reward(state, index, total_active_balance, spec)?;
        rewards[earliest.proposer_index as usize] =
            rewards[earliest.proposer_index as usize].safe_add(proposer_cut)?;

        let max_attester_reward = reward.safe_sub(proposer_cut)?;
        rewards[index as usize] = rewards[index as usize]
            .safe_add(max_attester_reward.safe_div(earliest.inclusion_delay)?)?;
    }
    Ok(rewards)
}

fn attestation_includes<E: EthSpec>(
    state: &BeaconState<E>,
    attestation: &PendingAttestation<E>,
    index: u64,
    spec: &ChainSpec,
) -> bool {
    state
        .get_beacon_committee(attestation.data.slot, attestation.data.index, spec)
        .map(|committee| {
            committee.iter().enumerate().any(|(i, &v)| {
                v == index && attestation.aggregation_bits.get(i).unwrap_or(false)
            })
        })
        .unwrap_or(false)
}

fn inactivity_penalties<E: EthSpec>(
    state: &BeaconState<E>,
    total_active_balance: u64,
    spec: &ChainSpec,
) -> Result<Vec<u64>, Error> {
    let n = state.validators.len();
    let mut penalties = vec![0u64; n];
    if !is_in_inactivity_leak(state, spec) {
        return Ok(penalties);
    }

    let target_attestations = get_matching_target_attestations(state, state.previous_epoch())?;
    let matching_target_indices: std::collections::BTreeSet<u64> =
        get_unslashed_attesting_indices(state, &target_attestations, spec)?
            .into_iter()
            .collect();
    let delay = finality_delay(state);

    for index in eligible_validator_indices(state) {
        let reward = base_reward(state, index, total_active_balance, spec)?;
        let cut = proposer_reward(state, index, total_active_balance, spec)?;
        let base_penalty = reward
            .safe_mul(spec.base_rewards_per_epoch)?
            .safe_sub(cut)?;
        penalties[index as usize] = penalties[index as usize].safe_add(base_penalty)?;

        if !matching_target_indices.contains(&index) {
            let effective_balance = state
                .validators
                .get(index as usize)
                .ok_or(types::BeaconStateError::UnknownValidator(index))?
                .effective_balance;
            let leak_penalty = effective_balance
                .safe_mul(delay)?
                .safe_div(spec.inactivity_penalty_quotient)?;
            penalties[index as usize] = penalties[index as usize].safe_add(leak_penalty)?;
        }
    }
    Ok(penalties)
}

/// The four attestation-driven reward components (source, target, head, inclusion delay) plus
/// the inactivity-leak penalty, summed per validator.
fn attestation_deltas<E: EthSpec>(
    state: &BeaconState<E>,
    spec: &ChainSpec,
) -> Result<(Vec<u64>, Vec<u64>), Error> {
    let total_active_balance = state.get_total_active_balance(spec)?;
    let previous_epoch = state.previous_epoch();

    let source_attestations = get_matching_source_attestations(state, previous_epoch)?.to_vec();
    let target_attestations = get_matching_target_attestations(state, previous_epoch)?;
    let head_attestations = get_matching_head_attestations(state, previous_epoch)?;

    let (source_rewards, source_penalties) =
        attestation_component_deltas(state, &source_attestations, total_active_balance, spec)?;
    let (target_rewards, target_penalties) =
        attestation_component_deltas(state, &target_attestations, total_active_balance, spec)?;
    let (head_rewards, head_penalties) =
        attestation_component_deltas(state, &head_attestations, total_active_balance, spec)?;
    let delay_rewards =
        inclusion_delay_rewards(state, &source_attestations, total_active_balance, spec)?;
    let leak_penalties = inactivity_penalties(state, total_active_balance, spec)?;

    let n = state.validators.len();
    let mut rewards = vec![0u64; n];
    let mut penalties = vec![0u64; n];
    for i in 0..n {
        rewards[i] = source_rewards[i]
            .safe_add(target_rewards[i])?
            .safe_add(head_rewards[i])?
            .safe_add(delay_rewards[i])?;
        penalties[i] = source_penalties[i]
            .safe_add(target_penalties[i])?
            .safe_add(head_penalties[i])?
            .safe_add(leak_penalties[i])?;
    }
    Ok((rewards, penalties))
}

pub fn process_rewards_and_penalties<E: EthSpec>(
    state: &mut BeaconState<E>,
    spec: &ChainSpec,
) -> Result<(), Error> {
    if state.current_epoch() == spec.genesis_epoch {
        return Ok(());
    }
    let (rewards, penalties) = attestation_deltas(state, spec)?;
    for index in 0..state.validators.len() as u64 {
        increase_balance(state, index, rewards[index as usize])?;
        decrease_balance(state, index, penalties[index as usize])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{genesis_state, E};
    use types::{AttestationData, Checkpoint};

    #[test]
    fn integer_sqrt_matches_known_values() {
        assert_eq!(integer_sqrt(0), 0);
        assert_eq!(integer_sqrt(1), 1);
        assert_eq!(integer_sqrt(3), 1);
        assert_eq!(integer_sqrt(4), 2);
        assert_eq!(integer_sqrt(99), 9);
        assert_eq!(integer_sqrt(10_000), 100);
    }

    #[test]
    fn no_op_in_the_genesis_epoch() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        let before = state.clone();

        process_rewards_and_penalties(&mut state, &spec).unwrap();

        assert_eq!(state, before);
    }

    #[test]
    fn full_participation_rewards_without_penalizing_anyone() {
        let spec = ChainSpec::minimal();
        let mut state = genesis_state(&spec, 8);
        state.slot = types::Epoch::new(2).start_slot(E::slots_per_epoch());
        let previous_epoch = state.previous_epoch();
        let target_root = *state.get_block_root(previous_epoch).unwrap();

        for slot_offset in 0..E::slots_per_epoch() {
            let slot = types::Slot::new(previous_epoch.start_slot(E::slots_per_epoch()).as_u64() + slot_offset);
            let committee_len = state.get_beacon_committee(slot, 0, &spec).unwrap().len();
            let mut aggregation_bits = ssz_types::BitList::with_capacity(committee_len).unwrap();
            for i in 0..committee_len {
                aggregation_bits.set(i, true).unwrap();
            }
            state
                .previous_epoch_attestations
                .push(PendingAttestation {
                    aggregation_bits,
                    data: AttestationData {
                        slot,
                        index: 0,
                        beacon_block_root: target_root,
                        source: Checkpoint::default(),
                        target: Checkpoint {
                            epoch: previous_epoch,
                            root: target_root,
                        },
                    },
                    inclusion_delay: 1,
                    proposer_index: 0,
                })
                .unwrap();
        }

        let balances_before = state.balances.clone();
        process_rewards_and_penalties(&mut state, &spec).unwrap();

        for i in 0..8usize {
            assert!(
                *state.balances.get(i).unwrap() >= *balances_before.get(i).unwrap(),
                "validator {i} should not be penalized under full participation",
            );
        }
        assert!(
            state.balances.iter().zip(balances_before.iter()).any(|(after, before)| after > before),
            "at least one validator should have been rewarded",
        );
    }
}
