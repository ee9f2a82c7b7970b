use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{Entity, EntityKind};

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A seeded country. Countries are fixed configuration established at process
/// start, readable but never written through the API, so they carry no id or
/// timestamps and never enter the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub code: String,
}

impl Country {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub country_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl City {
    pub fn new(name: String, country_code: String) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            name,
            country_code,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: CityPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(country_code) = patch.country_code {
            self.country_code = country_code;
        }
    }
}

impl Entity for City {
    const KIND: EntityKind = EntityKind::City;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Amenity {
    pub fn new(name: String, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            name,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: AmenityPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

impl Entity for Amenity {
    const KIND: EntityKind = EntityKind::Amenity;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, password: String, first_name: String, last_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            email,
            password,
            first_name,
            last_name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(password) = patch.password {
            self.password = password;
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub description: String,
    pub city_id: String,
    pub host_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price_per_night: f64,
    pub max_guests: i64,
    pub number_of_rooms: i64,
    pub number_of_bathrooms: i64,
    pub amenity_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Place {
    pub fn new(new: NewPlace) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            name: new.name,
            description: new.description,
            city_id: new.city_id,
            host_id: new.host_id,
            latitude: new.latitude,
            longitude: new.longitude,
            price_per_night: new.price_per_night,
            max_guests: new.max_guests,
            number_of_rooms: new.number_of_rooms,
            number_of_bathrooms: new.number_of_bathrooms,
            amenity_ids: dedup_preserving_order(new.amenity_ids),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: PlacePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(city_id) = patch.city_id {
            self.city_id = city_id;
        }
        if let Some(host_id) = patch.host_id {
            self.host_id = host_id;
        }
        if let Some(latitude) = patch.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = patch.longitude {
            self.longitude = longitude;
        }
        if let Some(price_per_night) = patch.price_per_night {
            self.price_per_night = price_per_night;
        }
        if let Some(max_guests) = patch.max_guests {
            self.max_guests = max_guests;
        }
        if let Some(number_of_rooms) = patch.number_of_rooms {
            self.number_of_rooms = number_of_rooms;
        }
        if let Some(number_of_bathrooms) = patch.number_of_bathrooms {
            self.number_of_bathrooms = number_of_bathrooms;
        }
        if let Some(amenity_ids) = patch.amenity_ids {
            self.amenity_ids = dedup_preserving_order(amenity_ids);
        }
    }
}

impl Entity for Place {
    const KIND: EntityKind = EntityKind::Place;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub place_id: String,
    pub user_id: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(place_id: String, user_id: String, rating: i64, comment: String) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            place_id,
            user_id,
            rating,
            comment,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: ReviewPatch) {
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(comment) = patch.comment {
            self.comment = comment;
        }
    }
}

impl Entity for Review {
    const KIND: EntityKind = EntityKind::Review;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Amenity ids form a set; keep the first occurrence of each.
fn dedup_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

// Create payloads and partial-update patches. Patches only change the fields
// they carry; everything else is left as stored.

#[derive(Debug, Clone, Deserialize)]
pub struct NewCity {
    pub name: String,
    pub country_code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityPatch {
    pub name: Option<String>,
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAmenity {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmenityPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlace {
    pub name: String,
    pub description: String,
    pub city_id: String,
    pub host_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price_per_night: f64,
    pub max_guests: i64,
    pub number_of_rooms: i64,
    pub number_of_bathrooms: i64,
    #[serde(default)]
    pub amenity_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlacePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub city_id: Option<String>,
    pub host_id: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_per_night: Option<f64>,
    pub max_guests: Option<i64>,
    pub number_of_rooms: Option<i64>,
    pub number_of_bathrooms: Option<i64>,
    pub amenity_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    pub user_id: String,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewPatch {
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_city_timestamps() {
        let city = City::new("Austin".to_string(), "US".to_string());
        assert_eq!(city.created_at, city.updated_at);
        assert!(!city.id.is_empty());
    }

    #[test]
    fn test_touch_refreshes_updated_at_only() {
        let mut city = City::new("Austin".to_string(), "US".to_string());
        let created = city.created_at;
        city.touch();
        assert_eq!(city.created_at, created);
        assert!(city.updated_at > created);
    }

    #[test]
    fn test_apply_partial_patch() {
        let mut city = City::new("Austin".to_string(), "US".to_string());
        city.apply(CityPatch {
            name: Some("Dallas".to_string()),
            country_code: None,
        });
        assert_eq!(city.name, "Dallas");
        assert_eq!(city.country_code, "US");
    }

    #[test]
    fn test_place_amenity_ids_deduplicated() {
        let place = Place::new(NewPlace {
            name: "Cabin".to_string(),
            description: "A cabin".to_string(),
            city_id: "c1".to_string(),
            host_id: "u1".to_string(),
            latitude: 30.27,
            longitude: -97.74,
            price_per_night: 120.0,
            max_guests: 4,
            number_of_rooms: 2,
            number_of_bathrooms: 1,
            amenity_ids: vec!["a1".to_string(), "a2".to_string(), "a1".to_string()],
        });
        assert_eq!(place.amenity_ids, vec!["a1".to_string(), "a2".to_string()]);
    }

    #[test]
    fn test_distinct_ids() {
        let a = Amenity::new("Wifi".to_string(), String::new());
        let b = Amenity::new("Wifi".to_string(), String::new());
        assert_ne!(a.id, b.id);
    }
}
