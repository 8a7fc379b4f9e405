//! Excel exporter implementation - places → Excel (.xlsx)

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::info;

use super::{HEADERS, SHEET_NAME};
use crate::error::{PlaceError, PlaceResult};
use crate::store::PlaceStore;
use crate::types::Place;

/// MIME type of an .xlsx workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Excel exporter writing every stored place to a single `Places` worksheet
pub struct PlaceExporter {
    store: Arc<dyn PlaceStore>,
}

impl PlaceExporter {
    /// Create a new Excel exporter
    pub fn new(store: Arc<dyn PlaceStore>) -> Self {
        Self { store }
    }

    /// Export all places to an in-memory .xlsx document
    pub async fn export(&self) -> PlaceResult<Vec<u8>> {
        let places = self.store.get_all().await?;
        let bytes = Self::write_workbook(&places)?;
        info!(rows = places.len(), bytes = bytes.len(), "exported places");
        Ok(bytes)
    }

    /// Serialize places into a workbook: header row, then one row per place
    pub fn write_workbook(places: &[Place]) -> PlaceResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| PlaceError::Export(format!("Failed to set worksheet name: {}", e)))?;

        for (col, label) in HEADERS.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, *label)
                .map_err(|e| PlaceError::Export(format!("Failed to write header: {}", e)))?;
        }

        for (idx, place) in places.iter().enumerate() {
            // +1 for header row
            Self::write_place(worksheet, (idx + 1) as u32, place)?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| PlaceError::Export(format!("Failed to save Excel file: {}", e)))
    }

    fn write_place(worksheet: &mut Worksheet, row: u32, place: &Place) -> PlaceResult<()> {
        worksheet
            .write_number(row, 0, place.id as f64)
            .map_err(|e| PlaceError::Export(format!("Failed to write id: {}", e)))?;
        worksheet
            .write_string(row, 1, &place.name)
            .map_err(|e| PlaceError::Export(format!("Failed to write name: {}", e)))?;
        worksheet
            .write_number(row, 2, place.latitude)
            .map_err(|e| PlaceError::Export(format!("Failed to write latitude: {}", e)))?;
        worksheet
            .write_number(row, 3, place.longitude)
            .map_err(|e| PlaceError::Export(format!("Failed to write longitude: {}", e)))?;
        worksheet
            .write_string(row, 4, &place.description)
            .map_err(|e| PlaceError::Export(format!("Failed to write description: {}", e)))?;
        Ok(())
    }
}

/// Download filename for an export created at `created_at`, e.g. `places-1700000000.xlsx`
pub fn export_filename(created_at: DateTime<Utc>) -> String {
    format!("places-{}.xlsx", created_at.timestamp())
}
