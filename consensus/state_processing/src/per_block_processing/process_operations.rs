use crate::common::{
    get_indexed_attestation, increase_balance, initiate_validator_exit, is_valid_indexed_attestation,
    slash_validator,
};
use crate::errors::{DepositInvalid, Error};
use crate::per_block_processing::signature_sets::exit_signature_set;
use crate::per_block_processing::verify_attestation::verify_attestation;
use crate::per_block_processing::verify_attester_slashing::verify_attester_slashing;
use crate::per_block_processing::verify_deposit::verify_deposit_merkle_proof;
use crate::per_block_processing::verify_exit::verify_voluntary_exit;
use crate::per_block_processing::verify_proposer_slashing::verify_proposer_slashing;
use bls::Signature;
use safe_arith::SafeArith;
use types::{BeaconBlockBody, BeaconState, ChainSpec, EthSpec, Validator};

/// Run every operation list in a block body in the fixed order the state machine requires:
/// proposer slashings, attester slashings, attestations, deposits, voluntary exits. Each list
/// is independent — a later list's checks never depend on an earlier list beyond the state
/// mutations the earlier list already applied.
pub fn process_operations<E: EthSpec>(
    state: &mut BeaconState<E>,
    body: &BeaconBlockBody<E>,
    spec: &ChainSpec,
) -> Result<(), Error> {
    let expected_deposits = (spec.max_deposits)
        .min(state.eth1_data.deposit_count.saturating_sub(state.eth1_deposit_index));
    if body.deposits.len() as u64 != expected_deposits {
        return Err(Error::DepositInvalid(DepositInvalid::CountMismatch));
    }

    for slashing in body.proposer_slashings.iter() {
        process_proposer_slashing(state, slashing, spec)?;
    }
    for slashing in body.attester_slashings.iter() {
        process_attester_slashing(state, slashing, spec)?;
    }
    for attestation in body.attestations.iter() {
        process_attestation(state, attestation, spec)?;
    }
    for deposit in body.deposits.iter() {
        process_deposit(state, deposit, spec)?;
    }
    for exit in body.voluntary_exits.iter() {
        process_voluntary_exit(state, exit, spec)?;
    }
    Ok(())
}

fn process_proposer_slashing<E: EthSpec>(
    state: &mut BeaconState<E>,
    slashing: &types::ProposerSlashing,
    spec: &ChainSpec,
) -> Result<(), Error> {
    verify_proposer_slashing(state, slashing, spec)?;
    slash_validator(
        state,
        slashing.signed_header_1.message.proposer_index,
        None,
        spec,
    )?;
    Ok(())
}

fn process_attester_slashing<E: EthSpec>(
    state: &mut BeaconState<E>,
    slashing: &types::AttesterSlashing<E>,
    spec: &ChainSpec,
) -> Result<(), Error> {
    let slashable_indices = verify_attester_slashing(state, slashing, spec)?;
    let mut slashed_any = false;
    for index in slashable_indices {
        let validator = state
            .validators
            .get(index as usize)
            .ok_or(types::BeaconStateError::UnknownValidator(index))?;
        if validator.is_slashable_at(state.current_epoch()) {
            slash_validator(state, index, None, spec)?;
            slashed_any = true;
        }
    }
    if !slashed_any {
        return Err(Error::SlashingInvalid(
            crate::errors::SlashingInvalid::NoValidatorSlashed,
        ));
    }
    Ok(())
}

fn process_attestation<E: EthSpec>(
    state: &mut BeaconState<E>,
    attestation: &types::Attestation<E>,
    spec: &ChainSpec,
) -> Result<(), Error> {
    verify_attestation(state, attestation, spec)?;
    let indexed = get_indexed_attestation(state, attestation, spec)?;
    is_valid_indexed_attestation(state, &indexed, spec)?;

    let proposer_index = state.get_beacon_proposer_index(spec)?;
    let pending = types::PendingAttestation {
        aggregation_bits: attestation.aggregation_bits.clone(),
        data: attestation.data.clone(),
        inclusion_delay: state.slot.as_u64().safe_sub(attestation.data.slot.as_u64())?,
        proposer_index,
    };

    if attestation.data.target.epoch == state.current_epoch() {
        state
            .current_epoch_attestations
            .push(pending)
            .map_err(|_| Error::MaxOperationsExceeded)?;
    } else {
        state
            .previous_epoch_attestations
            .push(pending)
            .map_err(|_| Error::MaxOperationsExceeded)?;
    }
    Ok(())
}

/// New pubkeys get a silent pass on a bad deposit signature (they simply aren't activated);
/// a pubkey that already has a validator record just has its balance topped up, no signature
/// check at all, since it was already verified when that validator was first created.
fn process_deposit<E: EthSpec>(
    state: &mut BeaconState<E>,
    deposit: &types::Deposit,
    spec: &ChainSpec,
) -> Result<(), Error> {
    verify_deposit_merkle_proof(state, deposit, spec)?;
    state.eth1_deposit_index = state.eth1_deposit_index.safe_add(1)?;

    let pubkey = deposit.data.pubkey;
    let amount = deposit.data.amount;

    let existing_index = state
        .validators
        .iter()
        .position(|v| v.pubkey == pubkey);

    match existing_index {
        Some(index) => {
            increase_balance(state, index as u64, amount)?;
        }
        None => {
            if !is_valid_deposit_signature(deposit, spec) {
                return Ok(());
            }
            let validator = Validator {
                pubkey,
                withdrawal_credentials: deposit.data.withdrawal_credentials,
                effective_balance: 0,
                slashed: false,
                activation_eligibility_epoch: spec.far_future_epoch,
                activation_epoch: spec.far_future_epoch,
                exit_epoch: spec.far_future_epoch,
                withdrawable_epoch: spec.far_future_epoch,
            };
            state
                .validators
                .push(validator)
                .map_err(|_| Error::MaxOperationsExceeded)?;
            state
                .balances
                .push(0)
                .map_err(|_| Error::MaxOperationsExceeded)?;
            let index = state.validators.len() - 1;
            increase_balance(state, index as u64, amount)?;

            let balance = state.balances.get(index).copied().unwrap_or(0);
            let effective_balance = balance
                .saturating_sub(balance % spec.effective_balance_increment)
                .min(spec.max_effective_balance);
            if let Some(validator) = state.validators.get_mut(index) {
                validator.effective_balance = effective_balance;
            }
        }
    }
    Ok(())
}

fn is_valid_deposit_signature(deposit: &types::Deposit, spec: &ChainSpec) -> bool {
    let pubkey = match bls::PublicKey::deserialize(&deposit.data.pubkey) {
        Ok(pk) => pk,
        Err(_) => return false,
    };
    let signature = match Signature::deserialize(&deposit.data.signature) {
        Ok(sig) => sig,
        Err(_) => return false,
    };
    let domain = spec.deposit_domain();
    let signing_root = types::compute_signing_root(&deposit.data.as_deposit_message(), domain);
    signature.verify(&pubkey, signing_root.as_bytes())
}

fn process_voluntary_exit<E: EthSpec>(
    state: &mut BeaconState<E>,
    exit: &types::SignedVoluntaryExit,
    spec: &ChainSpec,
) -> Result<(), Error> {
    verify_voluntary_exit(state, &exit.message, spec)?;

    let signature = Signature::deserialize(&exit.signature)
        .map_err(|_| Error::SignatureInvalid(crate::errors::SignatureContext::VoluntaryExit))?;
    let set = exit_signature_set(state, &exit.message, &signature, spec)?;
    if !set.verify() {
        return Err(Error::SignatureInvalid(
            crate::errors::SignatureContext::VoluntaryExit,
        ));
    }

    initiate_validator_exit(state, exit.message.validator_index, spec)?;
    Ok(())
}
