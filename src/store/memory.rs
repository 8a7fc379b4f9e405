//! In-memory place store

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::PlaceStore;
use crate::error::{PlaceError, PlaceResult};
use crate::types::{NewPlace, Place};

#[derive(Default)]
struct Inner {
    next_id: i64,
    places: BTreeMap<i64, Place>,
}

/// Place store kept entirely in process memory. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryPlaceStore {
    inner: RwLock<Inner>,
}

impl MemoryPlaceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlaceStore for MemoryPlaceStore {
    async fn create(&self, place: NewPlace) -> PlaceResult<Place> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let place = place.with_id(inner.next_id);
        inner.places.insert(place.id, place.clone());
        debug!(id = place.id, name = %place.name, "created place");
        Ok(place)
    }

    async fn update(&self, place: &Place) -> PlaceResult<()> {
        let mut inner = self.inner.write().await;
        match inner.places.get_mut(&place.id) {
            Some(existing) => {
                *existing = place.clone();
                Ok(())
            }
            None => Err(PlaceError::NotFound(place.id)),
        }
    }

    async fn delete(&self, id: i64) -> PlaceResult<()> {
        let mut inner = self.inner.write().await;
        inner
            .places
            .remove(&id)
            .map(|_| ())
            .ok_or(PlaceError::NotFound(id))
    }

    async fn get_by_id(&self, id: i64) -> PlaceResult<Option<Place>> {
        Ok(self.inner.read().await.places.get(&id).cloned())
    }

    async fn get_all(&self) -> PlaceResult<Vec<Place>> {
        Ok(self.inner.read().await.places.values().cloned().collect())
    }
}
