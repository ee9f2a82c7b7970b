//! Herberg Core - Domain models, storage trait, and validation.
//!
//! This crate contains the core domain logic for the Herberg property-listing
//! directory. It has no dependencies on other Herberg crates.

pub mod directory;
pub mod entity;
pub mod error;
pub mod models;
pub mod store;
pub mod validation;

// Re-exports for convenience
pub use directory::Directory;
pub use entity::{Entity, EntityKind};
pub use error::{ConflictError, CoreError, StoreError, ValidationError};
pub use models::{
    Amenity, AmenityPatch, City, CityPatch, Country, NewAmenity, NewCity, NewPlace, NewReview,
    NewUser, Place, PlacePatch, Review, ReviewPatch, User, UserPatch,
};
pub use store::{record_id, DataStore, Record};
pub use validation::Validator;

#[cfg(any(test, feature = "test-utils"))]
pub use store::memory::InMemoryStore;
