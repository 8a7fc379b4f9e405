//! Places - place records with Excel import/export
//!
//! This library stores "place" records (name, coordinates, description) and
//! moves them in bulk through Excel workbooks.
//!
//! # Features
//!
//! - `PlaceStore` record store contract with SQLite and in-memory backends
//! - Excel export: every place to one `Places` worksheet
//! - Excel import: every worksheet, header row skipped, fresh ids assigned
//! - HTTP API server (Axum) and CLI
//!
//! # Example
//!
//! ```no_run
//! use places::excel::{PlaceExporter, PlaceImporter};
//! use places::store::open_store;
//! use places::types::NewPlace;
//! use places::PlaceStore;
//!
//! # async fn run() -> places::PlaceResult<()> {
//! let store = open_store("sqlite://places.db").await?;
//! store.create(NewPlace::new("Park", 40.0, -73.0, "A park")).await?;
//!
//! let bytes = PlaceExporter::new(store.clone()).export().await?;
//! let report = PlaceImporter::new(store).import(&bytes).await?;
//! println!("Created {} places", report.created);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod error;
pub mod excel;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{PlaceError, PlaceResult};
pub use store::PlaceStore;
pub use types::{NewPlace, Place};
