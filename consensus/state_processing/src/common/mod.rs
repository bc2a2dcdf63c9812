pub mod attesting_indices;
pub mod get_indexed_attestation;
pub mod initiate_validator_exit;
pub mod matching_attestations;
pub mod slash_validator;

pub use attesting_indices::{get_attesting_indices, unslashed_attesting_indices};
pub use get_indexed_attestation::{get_indexed_attestation, is_valid_indexed_attestation};
pub use initiate_validator_exit::{get_validator_churn_limit, initiate_validator_exit};
pub use matching_attestations::{
    get_matching_head_attestations, get_matching_source_attestations,
    get_matching_target_attestations, get_unslashed_attesting_indices,
};
pub use slash_validator::{decrease_balance, increase_balance, slash_validator};
