//! Record store for places
//!
//! `PlaceStore` is the persistence contract shared by the exporter, the importer
//! and the HTTP layer. Two backends implement it:
//! - `SqlitePlaceStore`: sqlx SQLite pool (the production backend)
//! - `MemoryPlaceStore`: in-process map, used for tests and throwaway runs
//!
//! Reads treat a missing id as `None`; writes against a missing id fail with
//! `PlaceError::NotFound`.

mod memory;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::error::PlaceResult;
use crate::types::{NewPlace, Place};

pub use memory::MemoryPlaceStore;
pub use sqlite::SqlitePlaceStore;

/// Database URL value that selects the in-memory backend.
pub const MEMORY_URL: &str = "memory";

#[async_trait]
pub trait PlaceStore: Send + Sync {
    /// Insert a new place; the returned record carries the assigned id.
    async fn create(&self, place: NewPlace) -> PlaceResult<Place>;

    /// Replace every field of the place with `place.id`.
    async fn update(&self, place: &Place) -> PlaceResult<()>;

    async fn delete(&self, id: i64) -> PlaceResult<()>;

    async fn get_by_id(&self, id: i64) -> PlaceResult<Option<Place>>;

    /// All places in id order. Empty when the store is empty.
    async fn get_all(&self) -> PlaceResult<Vec<Place>>;
}

/// Open the store named by `database_url`.
///
/// `memory` selects `MemoryPlaceStore`; anything else is handed to SQLite.
pub async fn open_store(database_url: &str) -> PlaceResult<Arc<dyn PlaceStore>> {
    if database_url == MEMORY_URL {
        info!("Using in-memory place store");
        return Ok(Arc::new(MemoryPlaceStore::new()));
    }
    let store = SqlitePlaceStore::connect(database_url).await?;
    Ok(Arc::new(store))
}
