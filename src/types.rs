//! Place record types

use serde::{Deserialize, Serialize};

/// A persisted place. The `id` is assigned by the store on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Place {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub description: String,
}

/// Place fields without an id, as accepted by `PlaceStore::create`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewPlace {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub description: String,
}

impl NewPlace {
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            description: description.into(),
        }
    }

    /// Attach an id, producing the full record.
    pub fn with_id(self, id: i64) -> Place {
        Place {
            id,
            name: self.name,
            latitude: self.latitude,
            longitude: self.longitude,
            description: self.description,
        }
    }
}

impl Place {
    /// The record's fields without its id.
    pub fn fields(&self) -> NewPlace {
        NewPlace {
            name: self.name.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            description: self.description.clone(),
        }
    }
}

impl From<Place> for NewPlace {
    fn from(place: Place) -> Self {
        Self {
            name: place.name,
            latitude: place.latitude,
            longitude: place.longitude,
            description: place.description,
        }
    }
}

/// Parse a coordinate from free text; `None` when it is not a number.
pub fn parse_coordinate(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}
