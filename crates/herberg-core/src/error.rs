use thiserror::Error;

use crate::entity::EntityKind;

/// Umbrella error for directory operations. Variants map one-to-one onto the
/// HTTP layer's status classes: validation -> client input error, conflict ->
/// conflict, store not-found -> missing resource, store I/O -> server failure.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Conflict: {0}")]
    Conflict(#[from] ConflictError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Missing or empty field: {0}")]
    EmptyField(&'static str),

    #[error("Invalid latitude {0}: must be between -90 and 90")]
    InvalidLatitude(f64),

    #[error("Invalid longitude {0}: must be between -180 and 180")]
    InvalidLongitude(f64),

    #[error("Invalid rating {0}: must be an integer between 1 and 5")]
    InvalidRating(i64),

    #[error("Invalid {0}: must not be negative, got {1}")]
    NegativeCount(&'static str, i64),

    #[error("Invalid price_per_night {0}: must be a non-negative number")]
    InvalidPrice(f64),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Unknown country code: {0}")]
    UnknownCountry(String),

    #[error("{kind} not found: {id}")]
    UnknownReference { kind: EntityKind, id: String },

    #[error("User {user_id} hosts place {place_id} and cannot review it")]
    SelfReview { user_id: String, place_id: String },
}

#[derive(Error, Debug, PartialEq)]
pub enum ConflictError {
    #[error("A user with email {0} already exists")]
    DuplicateEmail(String),

    #[error("A city named {name} already exists in {country_code}")]
    DuplicateCity { name: String, country_code: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("{0} record has no id field")]
    MissingId(EntityKind),

    #[error("Data file is corrupt: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
