use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::store::Record;

/// The entity-type namespace. Ids are unique within a kind, not across kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Country,
    City,
    Amenity,
    User,
    Place,
    Review,
}

impl EntityKind {
    /// The type name used as the key in the persisted file.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Country => "Country",
            EntityKind::City => "City",
            EntityKind::Amenity => "Amenity",
            EntityKind::User => "User",
            EntityKind::Place => "Place",
            EntityKind::Review => "Review",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed, identified record that can round-trip through the schema-agnostic
/// store. The store itself only ever sees flat field maps; this trait is the
/// boundary where fields get interpreted.
pub trait Entity: Serialize + DeserializeOwned {
    const KIND: EntityKind;

    fn id(&self) -> &str;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;

    /// Refresh `updated_at`. Called on every mutation.
    fn touch(&mut self);

    fn to_record(&self) -> Result<Record, StoreError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Corrupt(format!(
                "{} serialized to non-object value: {}",
                Self::KIND,
                other
            ))),
        }
    }

    fn from_record(record: &Record) -> Result<Self, StoreError> {
        Ok(serde_json::from_value(Value::Object(record.clone()))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::City;

    #[test]
    fn test_kind_as_str() {
        assert_eq!(EntityKind::City.as_str(), "City");
        assert_eq!(EntityKind::Review.to_string(), "Review");
    }

    #[test]
    fn test_record_round_trip() {
        let city = City::new("Austin".to_string(), "US".to_string());
        let record = city.to_record().unwrap();

        assert_eq!(record["name"], "Austin");
        assert_eq!(record["country_code"], "US");
        assert_eq!(record["id"].as_str().unwrap(), city.id());

        let back = City::from_record(&record).unwrap();
        assert_eq!(back, city);
    }

    #[test]
    fn test_from_record_missing_fields() {
        let record = Record::new();
        assert!(City::from_record(&record).is_err());
    }
}
