use crate::errors::{Error, SignatureContext, SlashingInvalid};
use bls::Signature;
use types::{BeaconState, ChainSpec, Domain, EthSpec, ProposerSlashing};

/// Two signed headers for the same slot and proposer, with different bodies, both validly
/// signed: proof the proposer equivocated.
pub fn verify_proposer_slashing<E: EthSpec>(
    state: &BeaconState<E>,
    slashing: &ProposerSlashing,
    spec: &ChainSpec,
) -> Result<(), Error> {
    let header_1 = &slashing.signed_header_1.message;
    let header_2 = &slashing.signed_header_2.message;

    if header_1.slot != header_2.slot {
        return Err(Error::SlashingInvalid(SlashingInvalid::HeaderSlotMismatch));
    }
    if header_1.proposer_index != header_2.proposer_index {
        return Err(Error::SlashingInvalid(
            SlashingInvalid::HeaderProposerMismatch,
        ));
    }
    if header_1 == header_2 {
        return Err(Error::SlashingInvalid(SlashingInvalid::HeadersEqual));
    }

    let proposer = state
        .validators
        .get(header_1.proposer_index as usize)
        .ok_or(types::BeaconStateError::UnknownValidator(
            header_1.proposer_index,
        ))?;
    if !proposer.is_slashable_at(state.current_epoch()) {
        return Err(Error::SlashingInvalid(SlashingInvalid::ProposerNotSlashable));
    }

    let pubkey = proposer
        .pubkey()
        .map_err(|_| Error::SignatureInvalid(SignatureContext::ProposerSlashingHeader1))?;
    let epoch = header_1.slot.epoch(E::slots_per_epoch());
    let domain = state.get_domain(Domain::BeaconProposer, epoch, spec);

    for (signed_header, context) in [
        (
            &slashing.signed_header_1,
            SignatureContext::ProposerSlashingHeader1,
        ),
        (
            &slashing.signed_header_2,
            SignatureContext::ProposerSlashingHeader2,
        ),
    ] {
        let signature = Signature::deserialize(&signed_header.signature)
            .map_err(|_| Error::SignatureInvalid(context))?;
        let signing_root = types::compute_signing_root(&signed_header.message, domain);
        if !signature.verify(&pubkey, signing_root.as_bytes()) {
            return Err(Error::SignatureInvalid(context));
        }
    }

    Ok(())
}
