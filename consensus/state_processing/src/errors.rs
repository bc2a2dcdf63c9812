use safe_arith::ArithError;
use types::BeaconStateError;

/// Every way a call into this crate can fail. Flat rather than per-module (`AttestationInvalid`
/// nests its own detail enum instead of state_processing growing one `Error` type per
/// sub-module) because the phase-0 surface is small enough that one taxonomy stays readable;
/// the detail enums below are what the spec's error taxonomy actually asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SlotMismatch { block: u64, state: u64 },
    NonProgressingSlot { block: u64, latest_header: u64 },
    WrongProposer { block: u64, expected: u64 },
    ProposerSlashed(u64),
    BadParentRoot,
    BadStateRoot,
    SignatureInvalid(SignatureContext),
    AttestationInvalid(AttestationInvalid),
    IndexedAttestationInvalid(IndexedAttestationInvalid),
    SlashingInvalid(SlashingInvalid),
    DepositInvalid(DepositInvalid),
    ExitInvalid(ExitInvalid),
    Eth1DataMismatch,
    HistoricalLookup,
    ShuffleBounds,
    ArithmeticOverflow,
    BeaconStateError(BeaconStateError),
    MaxOperationsExceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureContext {
    Block,
    Randao,
    Attestation,
    VoluntaryExit,
    ProposerSlashingHeader1,
    ProposerSlashingHeader2,
    DepositNewValidator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttestationInvalid {
    BadCommitteeIndex,
    BadAggregationBitsLength,
    TargetEpochNotInRange,
    TargetEpochMismatchesSlotEpoch,
    InclusionDelayOutOfRange,
    SourceMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexedAttestationInvalid {
    EmptyIndices,
    TooManyIndices,
    IndicesNotSorted,
    BadSignature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashingInvalid {
    NotSlashableData,
    NoValidatorSlashed,
    HeadersEqual,
    HeaderSlotMismatch,
    HeaderProposerMismatch,
    ProposerNotSlashable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositInvalid {
    BadMerkleProof,
    CountMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitInvalid {
    NotActive,
    AlreadyExiting,
    TooEarly,
    NotLongEnoughActive,
}

impl From<BeaconStateError> for Error {
    fn from(e: BeaconStateError) -> Self {
        Error::BeaconStateError(e)
    }
}

impl From<ArithError> for Error {
    fn from(_: ArithError) -> Self {
        Error::ArithmeticOverflow
    }
}

impl From<swap_or_not_shuffle::Error> for Error {
    fn from(_: swap_or_not_shuffle::Error) -> Self {
        Error::ShuffleBounds
    }
}
