//! Every BLS check a block implies, built as deferred `SignatureSet`s rather than verified
//! inline. `process_block` verifies them as it goes; `compute_state_root` reuses the same
//! bookkeeping functions with verification skipped by construction (it never calls these).

use crate::errors::{Error, SignatureContext};
use bls::{Signature, SignatureSet};
use std::borrow::Cow;
use types::{BeaconBlockHeader, BeaconState, ChainSpec, Domain, EthSpec};

pub fn block_proposal_signature_set<'a, E: EthSpec>(
    state: &'a BeaconState<E>,
    header: &'a BeaconBlockHeader,
    signature: &'a Signature,
    spec: &ChainSpec,
) -> Result<SignatureSet<'a>, Error> {
    let proposer = state
        .validators
        .get(header.proposer_index as usize)
        .ok_or(types::BeaconStateError::UnknownValidator(
            header.proposer_index,
        ))?;
    let pubkey = proposer
        .pubkey()
        .map_err(|_| Error::SignatureInvalid(SignatureContext::Block))?;

    let domain = state.get_domain(Domain::BeaconProposer, state.current_epoch(), spec);
    let signing_root = types::compute_signing_root(header, domain);

    Ok(SignatureSet::single(
        signature,
        Cow::Owned(pubkey),
        *signing_root.as_bytes(),
    ))
}

pub fn randao_signature_set<'a, E: EthSpec>(
    state: &'a BeaconState<E>,
    proposer_index: u64,
    signature: &'a Signature,
    spec: &ChainSpec,
) -> Result<SignatureSet<'a>, Error> {
    let proposer = state
        .validators
        .get(proposer_index as usize)
        .ok_or(types::BeaconStateError::UnknownValidator(proposer_index))?;
    let pubkey = proposer
        .pubkey()
        .map_err(|_| Error::SignatureInvalid(SignatureContext::Randao))?;

    let epoch = state.current_epoch();
    let domain = state.get_domain(Domain::Randao, epoch, spec);
    let signing_root = types::compute_signing_root(&epoch, domain);

    Ok(SignatureSet::single(
        signature,
        Cow::Owned(pubkey),
        *signing_root.as_bytes(),
    ))
}

pub fn exit_signature_set<'a, E: EthSpec>(
    state: &'a BeaconState<E>,
    exit: &'a types::VoluntaryExit,
    signature: &'a Signature,
    spec: &ChainSpec,
) -> Result<SignatureSet<'a>, Error> {
    let validator = state
        .validators
        .get(exit.validator_index as usize)
        .ok_or(types::BeaconStateError::UnknownValidator(
            exit.validator_index,
        ))?;
    let pubkey = validator
        .pubkey()
        .map_err(|_| Error::SignatureInvalid(SignatureContext::VoluntaryExit))?;

    let domain = state.get_domain(Domain::VoluntaryExit, exit.epoch, spec);
    let signing_root = types::compute_signing_root(exit, domain);

    Ok(SignatureSet::single(
        signature,
        Cow::Owned(pubkey),
        *signing_root.as_bytes(),
    ))
}
