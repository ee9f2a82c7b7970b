use crate::entity::EntityKind;
use crate::error::{ConflictError, CoreError, ValidationError};
use crate::models::{Amenity, City, Country, Place, Review, User};
use crate::store::{record_id, DataStore};

/// Validation and relationship checks, run against the proposed final state
/// of a record before it reaches the store. Holds the immutable seeded
/// country set; never mutates the store. All checks are read-only and
/// idempotent, so running a validator twice against an unchanged store yields
/// the same verdict.
pub struct Validator {
    countries: Vec<Country>,
}

impl Validator {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn country(&self, code: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.code == code)
    }

    pub fn validate_city(&self, city: &City, store: &dyn DataStore) -> Result<(), CoreError> {
        require_non_empty("name", &city.name)?;
        if self.country(&city.country_code).is_none() {
            return Err(ValidationError::UnknownCountry(city.country_code.clone()).into());
        }

        // Same name in the same country is a conflict; skip the record under
        // update so renaming a city onto its own name is allowed.
        let duplicate = store.list(EntityKind::City)?.iter().any(|r| {
            record_id(r) != Some(&city.id)
                && r.get("name").and_then(|v| v.as_str()) == Some(city.name.as_str())
                && r.get("country_code").and_then(|v| v.as_str())
                    == Some(city.country_code.as_str())
        });
        if duplicate {
            return Err(ConflictError::DuplicateCity {
                name: city.name.clone(),
                country_code: city.country_code.clone(),
            }
            .into());
        }

        Ok(())
    }

    pub fn validate_amenity(&self, amenity: &Amenity) -> Result<(), CoreError> {
        require_non_empty("name", &amenity.name)?;
        Ok(())
    }

    pub fn validate_user(&self, user: &User, store: &dyn DataStore) -> Result<(), CoreError> {
        require_non_empty("first_name", &user.first_name)?;
        require_non_empty("last_name", &user.last_name)?;
        require_non_empty("password", &user.password)?;
        if !is_valid_email(&user.email) {
            return Err(ValidationError::InvalidEmail(user.email.clone()).into());
        }

        // Email uniqueness is re-checked on every write, not stored.
        let taken = store.list(EntityKind::User)?.iter().any(|r| {
            record_id(r) != Some(&user.id)
                && r.get("email").and_then(|v| v.as_str()) == Some(user.email.as_str())
        });
        if taken {
            return Err(ConflictError::DuplicateEmail(user.email.clone()).into());
        }

        Ok(())
    }

    pub fn validate_place(&self, place: &Place, store: &dyn DataStore) -> Result<(), CoreError> {
        require_non_empty("name", &place.name)?;
        require_non_empty("description", &place.description)?;

        if place.latitude.is_nan() || !(-90.0..=90.0).contains(&place.latitude) {
            return Err(ValidationError::InvalidLatitude(place.latitude).into());
        }
        if place.longitude.is_nan() || !(-180.0..=180.0).contains(&place.longitude) {
            return Err(ValidationError::InvalidLongitude(place.longitude).into());
        }
        if !place.price_per_night.is_finite() || place.price_per_night < 0.0 {
            return Err(ValidationError::InvalidPrice(place.price_per_night).into());
        }
        for (field, value) in [
            ("max_guests", place.max_guests),
            ("number_of_rooms", place.number_of_rooms),
            ("number_of_bathrooms", place.number_of_bathrooms),
        ] {
            if value < 0 {
                return Err(ValidationError::NegativeCount(field, value).into());
            }
        }

        require_exists(store, EntityKind::City, &place.city_id)?;
        require_exists(store, EntityKind::User, &place.host_id)?;
        for amenity_id in &place.amenity_ids {
            require_exists(store, EntityKind::Amenity, amenity_id)?;
        }

        Ok(())
    }

    pub fn validate_review(&self, review: &Review, store: &dyn DataStore) -> Result<(), CoreError> {
        if !(1..=5).contains(&review.rating) {
            return Err(ValidationError::InvalidRating(review.rating).into());
        }
        require_non_empty("comment", &review.comment)?;

        let place = require_exists(store, EntityKind::Place, &review.place_id)?;
        require_exists(store, EntityKind::User, &review.user_id)?;

        if place.get("host_id").and_then(|v| v.as_str()) == Some(review.user_id.as_str()) {
            return Err(ValidationError::SelfReview {
                user_id: review.user_id.clone(),
                place_id: review.place_id.clone(),
            }
            .into());
        }

        Ok(())
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

fn require_exists(
    store: &dyn DataStore,
    kind: EntityKind,
    id: &str,
) -> Result<crate::store::Record, CoreError> {
    match store.get(kind, id)? {
        Some(record) => Ok(record),
        None => Err(ValidationError::UnknownReference {
            kind,
            id: id.to_string(),
        }
        .into()),
    }
}

/// Structural email check: local-part@domain with a dotted TLD-like suffix.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.chars().any(char::is_whitespace) || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    if host.is_empty() || host.starts_with('.') || host.ends_with('.') {
        return false;
    }
    tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}
