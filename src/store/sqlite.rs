//! SQLite-backed place store

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use super::PlaceStore;
use crate::error::{PlaceError, PlaceResult};
use crate::types::{NewPlace, Place};

const CREATE_PLACES_TABLE: &str = "CREATE TABLE IF NOT EXISTS places (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    latitude REAL NOT NULL DEFAULT 0,
    longitude REAL NOT NULL DEFAULT 0,
    description TEXT NOT NULL DEFAULT ''
)";

/// Place store over a SQLite connection pool.
#[derive(Clone)]
pub struct SqlitePlaceStore {
    pool: SqlitePool,
}

impl SqlitePlaceStore {
    /// Connect to `database_url` and make sure the `places` table exists.
    ///
    /// In-memory databases are pinned to a single connection that never idles
    /// out, since each SQLite connection would otherwise see its own database.
    pub async fn connect(database_url: &str) -> PlaceResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(10)
        };

        let pool = pool_options.connect_with(options).await?;
        info!("Connected to database at {}", database_url);

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating the `places` table if needed.
    pub async fn from_pool(pool: SqlitePool) -> PlaceResult<Self> {
        sqlx::query(CREATE_PLACES_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Get a reference to the underlying SQLite pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PlaceStore for SqlitePlaceStore {
    async fn create(&self, place: NewPlace) -> PlaceResult<Place> {
        let result = sqlx::query(
            "INSERT INTO places (name, latitude, longitude, description) VALUES (?, ?, ?, ?)",
        )
        .bind(&place.name)
        .bind(place.latitude)
        .bind(place.longitude)
        .bind(&place.description)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, name = %place.name, "created place");
        Ok(place.with_id(id))
    }

    async fn update(&self, place: &Place) -> PlaceResult<()> {
        let result = sqlx::query(
            "UPDATE places SET name = ?, latitude = ?, longitude = ?, description = ? WHERE id = ?",
        )
        .bind(&place.name)
        .bind(place.latitude)
        .bind(place.longitude)
        .bind(&place.description)
        .bind(place.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PlaceError::NotFound(place.id));
        }
        debug!(id = place.id, "updated place");
        Ok(())
    }

    async fn delete(&self, id: i64) -> PlaceResult<()> {
        let result = sqlx::query("DELETE FROM places WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PlaceError::NotFound(id));
        }
        debug!(id, "deleted place");
        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> PlaceResult<Option<Place>> {
        let place = sqlx::query_as::<_, Place>(
            "SELECT id, name, latitude, longitude, description FROM places WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(place)
    }

    async fn get_all(&self) -> PlaceResult<Vec<Place>> {
        let places = sqlx::query_as::<_, Place>(
            "SELECT id, name, latitude, longitude, description FROM places ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(places)
    }
}
