use crate::errors::{Error, SignatureContext};
use crate::per_block_processing::signature_sets::randao_signature_set;
use bls::Signature;
use types::{BeaconState, ChainSpec, EthSpec};

/// Verify the proposer's RANDAO reveal and mix it into `state.randao_mixes` for the current
/// epoch.
pub fn process_randao<E: EthSpec>(
    state: &mut BeaconState<E>,
    randao_reveal: &[u8; bls::SIGNATURE_BYTES_LEN],
    spec: &ChainSpec,
) -> Result<(), Error> {
    let proposer_index = state.get_beacon_proposer_index(spec)?;
    let signature = Signature::deserialize(randao_reveal)
        .map_err(|_| Error::SignatureInvalid(SignatureContext::Randao))?;

    let set = randao_signature_set(state, proposer_index, &signature, spec)?;
    if !set.verify() {
        return Err(Error::SignatureInvalid(SignatureContext::Randao));
    }

    let epoch = state.current_epoch();
    let mix = types::xor(*state.get_randao_mix(epoch)?, types::hash(randao_reveal));
    state.set_randao_mix(epoch, mix)?;
    Ok(())
}
