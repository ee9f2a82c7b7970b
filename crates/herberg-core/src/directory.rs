use std::sync::Mutex;

use crate::entity::{Entity, EntityKind};
use crate::error::{CoreError, StoreError};
use crate::models::{
    Amenity, AmenityPatch, City, CityPatch, Country, NewAmenity, NewCity, NewPlace, NewReview,
    NewUser, Place, PlacePatch, Review, ReviewPatch, User, UserPatch,
};
use crate::store::DataStore;
use crate::validation::Validator;

/// The model layer: id generation, validate-then-write, and referential
/// lookups over a [`DataStore`].
///
/// Validation reads the store and the subsequent write mutates it, so each
/// mutating operation runs as one critical section behind `write_gate`;
/// otherwise a concurrent write could invalidate a verdict between the read
/// and the write. Read paths skip validation and the gate entirely.
///
/// Deletes do not cascade and are not blocked by live dependents: deleting a
/// city or user leaves dependent places and reviews pointing at a missing id.
pub struct Directory<S> {
    store: S,
    validator: Validator,
    write_gate: Mutex<()>,
}

impl<S: DataStore> Directory<S> {
    pub fn new(store: S, countries: Vec<Country>) -> Self {
        Self {
            store,
            validator: Validator::new(countries),
            write_gate: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn fetch<E: Entity>(&self, id: &str) -> Result<E, CoreError> {
        match self.store.get(E::KIND, id)? {
            Some(record) => Ok(E::from_record(&record)?),
            None => Err(StoreError::NotFound {
                kind: E::KIND,
                id: id.to_string(),
            }
            .into()),
        }
    }

    fn list_all<E: Entity>(&self) -> Result<Vec<E>, CoreError> {
        self.store
            .list(E::KIND)?
            .iter()
            .map(|r| Ok(E::from_record(r)?))
            .collect()
    }

    // Countries: seed data, read-only.

    pub fn countries(&self) -> &[Country] {
        self.validator.countries()
    }

    pub fn country(&self, code: &str) -> Result<Country, CoreError> {
        self.validator
            .country(code)
            .cloned()
            .ok_or_else(|| {
                StoreError::NotFound {
                    kind: EntityKind::Country,
                    id: code.to_string(),
                }
                .into()
            })
    }

    pub fn cities_in(&self, code: &str) -> Result<Vec<City>, CoreError> {
        self.country(code)?;
        let mut cities: Vec<City> = self.list_all()?;
        cities.retain(|c| c.country_code == code);
        Ok(cities)
    }

    // Cities

    pub fn create_city(&self, new: NewCity) -> Result<City, CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        let city = City::new(new.name, new.country_code);
        self.validator.validate_city(&city, &self.store)?;
        self.store.save(City::KIND, city.to_record()?)?;
        Ok(city)
    }

    pub fn city(&self, id: &str) -> Result<City, CoreError> {
        self.fetch(id)
    }

    pub fn cities(&self) -> Result<Vec<City>, CoreError> {
        self.list_all()
    }

    pub fn update_city(&self, id: &str, patch: CityPatch) -> Result<City, CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        let mut city: City = self.fetch(id)?;
        city.apply(patch);
        city.touch();
        self.validator.validate_city(&city, &self.store)?;
        self.store.update(City::KIND, city.to_record()?)?;
        Ok(city)
    }

    pub fn delete_city(&self, id: &str) -> Result<(), CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        Ok(self.store.delete(EntityKind::City, id)?)
    }

    // Amenities

    pub fn create_amenity(&self, new: NewAmenity) -> Result<Amenity, CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        let amenity = Amenity::new(new.name, new.description);
        self.validator.validate_amenity(&amenity)?;
        self.store.save(Amenity::KIND, amenity.to_record()?)?;
        Ok(amenity)
    }

    pub fn amenity(&self, id: &str) -> Result<Amenity, CoreError> {
        self.fetch(id)
    }

    pub fn amenities(&self) -> Result<Vec<Amenity>, CoreError> {
        self.list_all()
    }

    pub fn update_amenity(&self, id: &str, patch: AmenityPatch) -> Result<Amenity, CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        let mut amenity: Amenity = self.fetch(id)?;
        amenity.apply(patch);
        amenity.touch();
        self.validator.validate_amenity(&amenity)?;
        self.store.update(Amenity::KIND, amenity.to_record()?)?;
        Ok(amenity)
    }

    pub fn delete_amenity(&self, id: &str) -> Result<(), CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        Ok(self.store.delete(EntityKind::Amenity, id)?)
    }

    // Users

    pub fn create_user(&self, new: NewUser) -> Result<User, CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        let user = User::new(new.email, new.password, new.first_name, new.last_name);
        self.validator.validate_user(&user, &self.store)?;
        self.store.save(User::KIND, user.to_record()?)?;
        Ok(user)
    }

    pub fn user(&self, id: &str) -> Result<User, CoreError> {
        self.fetch(id)
    }

    pub fn users(&self) -> Result<Vec<User>, CoreError> {
        self.list_all()
    }

    pub fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        let mut user: User = self.fetch(id)?;
        user.apply(patch);
        user.touch();
        self.validator.validate_user(&user, &self.store)?;
        self.store.update(User::KIND, user.to_record()?)?;
        Ok(user)
    }

    pub fn delete_user(&self, id: &str) -> Result<(), CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        Ok(self.store.delete(EntityKind::User, id)?)
    }

    // Places

    pub fn create_place(&self, new: NewPlace) -> Result<Place, CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        let place = Place::new(new);
        self.validator.validate_place(&place, &self.store)?;
        self.store.save(Place::KIND, place.to_record()?)?;
        Ok(place)
    }

    pub fn place(&self, id: &str) -> Result<Place, CoreError> {
        self.fetch(id)
    }

    pub fn places(&self) -> Result<Vec<Place>, CoreError> {
        self.list_all()
    }

    pub fn update_place(&self, id: &str, patch: PlacePatch) -> Result<Place, CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        let mut place: Place = self.fetch(id)?;
        place.apply(patch);
        place.touch();
        self.validator.validate_place(&place, &self.store)?;
        self.store.update(Place::KIND, place.to_record()?)?;
        Ok(place)
    }

    pub fn delete_place(&self, id: &str) -> Result<(), CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        Ok(self.store.delete(EntityKind::Place, id)?)
    }

    // Reviews (created against a place, as in the public API)

    pub fn create_review(&self, place_id: &str, new: NewReview) -> Result<Review, CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        let review = Review::new(place_id.to_string(), new.user_id, new.rating, new.comment);
        self.validator.validate_review(&review, &self.store)?;
        self.store.save(Review::KIND, review.to_record()?)?;
        Ok(review)
    }

    pub fn review(&self, id: &str) -> Result<Review, CoreError> {
        self.fetch(id)
    }

    pub fn reviews_for_place(&self, place_id: &str) -> Result<Vec<Review>, CoreError> {
        let mut reviews: Vec<Review> = self.list_all()?;
        reviews.retain(|r| r.place_id == place_id);
        Ok(reviews)
    }

    pub fn reviews_by_user(&self, user_id: &str) -> Result<Vec<Review>, CoreError> {
        let mut reviews: Vec<Review> = self.list_all()?;
        reviews.retain(|r| r.user_id == user_id);
        Ok(reviews)
    }

    pub fn update_review(&self, id: &str, patch: ReviewPatch) -> Result<Review, CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        let mut review: Review = self.fetch(id)?;
        review.apply(patch);
        review.touch();
        self.validator.validate_review(&review, &self.store)?;
        self.store.update(Review::KIND, review.to_record()?)?;
        Ok(review)
    }

    pub fn delete_review(&self, id: &str) -> Result<(), CoreError> {
        let _gate = self.write_gate.lock().unwrap();
        Ok(self.store.delete(EntityKind::Review, id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::store::memory::InMemoryStore;

    fn seed_countries() -> Vec<Country> {
        vec![
            Country::new("United States", "US"),
            Country::new("Canada", "CA"),
            Country::new("Mexico", "MX"),
        ]
    }

    fn make_directory() -> Directory<InMemoryStore> {
        Directory::new(InMemoryStore::new(), seed_countries())
    }

    #[test]
    fn test_city_lifecycle() {
        let dir = make_directory();

        let city = dir
            .create_city(NewCity {
                name: "Austin".to_string(),
                country_code: "US".to_string(),
            })
            .unwrap();
        assert!(!city.id.is_empty());
        assert_eq!(city.created_at, city.updated_at);

        let updated = dir
            .update_city(
                &city.id,
                CityPatch {
                    name: Some("Austin, TX".to_string()),
                    country_code: None,
                },
            )
            .unwrap();
        assert_eq!(updated.id, city.id);
        assert_eq!(updated.name, "Austin, TX");
        assert_eq!(updated.created_at, city.created_at);
        assert!(updated.updated_at > updated.created_at);

        dir.delete_city(&city.id).unwrap();
        assert!(dir
            .store()
            .get(EntityKind::City, &city.id)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_rejected_create_leaves_store_untouched() {
        let dir = make_directory();

        let err = dir
            .create_city(NewCity {
                name: "Oslo".to_string(),
                country_code: "NO".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(dir.cities().unwrap().is_empty());
    }

    #[test]
    fn test_update_missing_city_is_not_found() {
        let dir = make_directory();
        let err = dir.update_city("missing", CityPatch::default()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Store(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_twice() {
        let dir = make_directory();
        let amenity = dir
            .create_amenity(NewAmenity {
                name: "Wifi".to_string(),
                description: String::new(),
            })
            .unwrap();

        dir.delete_amenity(&amenity.id).unwrap();
        let err = dir.delete_amenity(&amenity.id).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Store(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_cities_in_country() {
        let dir = make_directory();
        dir.create_city(NewCity {
            name: "Austin".to_string(),
            country_code: "US".to_string(),
        })
        .unwrap();
        dir.create_city(NewCity {
            name: "Toronto".to_string(),
            country_code: "CA".to_string(),
        })
        .unwrap();

        let us = dir.cities_in("US").unwrap();
        assert_eq!(us.len(), 1);
        assert_eq!(us[0].name, "Austin");

        let err = dir.cities_in("NO").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Store(StoreError::NotFound {
                kind: EntityKind::Country,
                ..
            })
        ));
    }

    #[test]
    fn test_review_flow() {
        let dir = make_directory();
        let city = dir
            .create_city(NewCity {
                name: "Austin".to_string(),
                country_code: "US".to_string(),
            })
            .unwrap();
        let host = dir
            .create_user(NewUser {
                email: "host@example.com".to_string(),
                password: "secret".to_string(),
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
            })
            .unwrap();
        let guest = dir
            .create_user(NewUser {
                email: "guest@example.com".to_string(),
                password: "secret".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
            })
            .unwrap();
        let place = dir
            .create_place(NewPlace {
                name: "Cabin".to_string(),
                description: "A quiet cabin".to_string(),
                city_id: city.id.clone(),
                host_id: host.id.clone(),
                latitude: 30.27,
                longitude: -97.74,
                price_per_night: 120.0,
                max_guests: 4,
                number_of_rooms: 2,
                number_of_bathrooms: 1,
                amenity_ids: Vec::new(),
            })
            .unwrap();

        // Host cannot review their own place
        let err = dir
            .create_review(
                &place.id,
                NewReview {
                    user_id: host.id.clone(),
                    rating: 5,
                    comment: "Perfect".to_string(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let review = dir
            .create_review(
                &place.id,
                NewReview {
                    user_id: guest.id.clone(),
                    rating: 5,
                    comment: "Perfect".to_string(),
                },
            )
            .unwrap();

        assert_eq!(dir.reviews_for_place(&place.id).unwrap().len(), 1);
        assert_eq!(dir.reviews_by_user(&guest.id).unwrap()[0].id, review.id);
        assert!(dir.reviews_by_user(&host.id).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_creates_both_land() {
        let dir = Arc::new(make_directory());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let dir = dir.clone();
                std::thread::spawn(move || {
                    dir.create_amenity(NewAmenity {
                        name: format!("Amenity {i}"),
                        description: String::new(),
                    })
                    .unwrap()
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(dir.amenities().unwrap().len(), 8);
    }
}
