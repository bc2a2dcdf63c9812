/// 4-byte domain-type tags used to separate signatures by purpose before they're mixed with the
/// fork version and genesis validators root into a full 32-byte domain (see `ChainSpec::get_domain`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    BeaconProposer,
    BeaconAttester,
    Randao,
    Deposit,
    VoluntaryExit,
    SelectionProof,
    AggregateAndProof,
}
