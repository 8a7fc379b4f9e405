//! Places API Server module
//!
//! HTTP surface over the place store and the Excel exporter/importer.
//! Run with `places serve` or `places-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server, ApiConfig, AppState};
