//! Excel import/export for place records
//!
//! This module provides bidirectional Excel ↔ store conversion:
//! - Export: places → Excel (.xlsx), one `Places` worksheet
//! - Import: Excel (.xlsx) → places, every worksheet, header row skipped
//!
//! Both sides use the same positional layout: `ID, Name, Lat, Lon, Description`.

mod exporter;
mod importer;

pub use exporter::{export_filename, PlaceExporter, XLSX_CONTENT_TYPE};
pub use importer::{ImportReport, ImportRow, ImportWarning, PlaceImporter};

/// Name of the worksheet written by the exporter
pub const SHEET_NAME: &str = "Places";

/// Header labels, in column order
pub const HEADERS: [&str; 5] = ["ID", "Name", "Lat", "Lon", "Description"];
