use crate::errors::{AttestationInvalid, Error};
use types::{Attestation, BeaconState, ChainSpec, EthSpec};

/// The non-signature checks on a wire attestation: committee index in range, target epoch
/// matches the slot's epoch and is one of the two retained epochs, inclusion delay satisfied,
/// and the source checkpoint matches the state's corresponding justified checkpoint. Signature
/// validity is checked separately via `get_indexed_attestation` + `is_valid_indexed_attestation`.
pub fn verify_attestation<E: EthSpec>(
    state: &BeaconState<E>,
    attestation: &Attestation<E>,
    spec: &ChainSpec,
) -> Result<(), Error> {
    let data = &attestation.data;
    let slot_epoch = data.slot.epoch(E::slots_per_epoch());

    if data.target.epoch != state.current_epoch() && data.target.epoch != state.previous_epoch() {
        return Err(Error::AttestationInvalid(
            AttestationInvalid::TargetEpochNotInRange,
        ));
    }
    if data.target.epoch != slot_epoch {
        return Err(Error::AttestationInvalid(
            AttestationInvalid::TargetEpochMismatchesSlotEpoch,
        ));
    }

    let min_slot = data
        .slot
        .safe_add(spec.min_attestation_inclusion_delay)?;
    let max_slot = data.slot.safe_add(E::slots_per_epoch())?;
    if state.slot < min_slot || state.slot > max_slot {
        return Err(Error::AttestationInvalid(
            AttestationInvalid::InclusionDelayOutOfRange,
        ));
    }

    if data.index >= state.get_committee_count_per_slot(slot_epoch, spec) {
        return Err(Error::AttestationInvalid(
            AttestationInvalid::BadCommitteeIndex,
        ));
    }

    let expected_source = if data.target.epoch == state.current_epoch() {
        state.current_justified_checkpoint
    } else {
        state.previous_justified_checkpoint
    };
    if data.source != expected_source {
        return Err(Error::AttestationInvalid(AttestationInvalid::SourceMismatch));
    }

    Ok(())
}
