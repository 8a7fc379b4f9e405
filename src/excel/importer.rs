//! Excel importer implementation - Excel (.xlsx) → places

use std::io::Cursor;
use std::sync::Arc;

use calamine::{open_workbook_from_rs, Data, Range, Reader, Xlsx};
use serde::Serialize;
use tracing::{info, warn};

use super::HEADERS;
use crate::error::{PlaceError, PlaceResult};
use crate::store::PlaceStore;
use crate::types::{parse_coordinate, NewPlace};

const NAME_COL: u32 = 1;
const LAT_COL: u32 = 2;
const LON_COL: u32 = 3;
const DESCRIPTION_COL: u32 = 4;

/// A numeric cell that could not be parsed and was stored as 0.0
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportWarning {
    pub sheet: String,
    /// 0-based row index within the sheet
    pub row: u32,
    pub column: String,
    pub value: String,
}

/// Outcome of a successful import
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub created: usize,
    pub warnings: Vec<ImportWarning>,
}

/// A data row mapped to a place, before it is persisted
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub sheet: String,
    pub row: u32,
    pub place: NewPlace,
    pub warnings: Vec<ImportWarning>,
}

/// Excel importer creating one place per data row of every worksheet
pub struct PlaceImporter {
    store: Arc<dyn PlaceStore>,
}

impl PlaceImporter {
    /// Create a new Excel importer
    pub fn new(store: Arc<dyn PlaceStore>) -> Self {
        Self { store }
    }

    /// Import an .xlsx document, creating a place per data row.
    ///
    /// Rows are persisted one at a time; the first failing `create` aborts the
    /// import and the rows created before it stay in the store.
    pub async fn import(&self, bytes: &[u8]) -> PlaceResult<ImportReport> {
        let rows = Self::read_rows(bytes)?;
        let mut report = ImportReport::default();

        for row in rows {
            for warning in &row.warnings {
                warn!(
                    sheet = %warning.sheet,
                    row = warning.row,
                    column = %warning.column,
                    value = %warning.value,
                    "non-numeric cell imported as 0"
                );
            }
            self.store.create(row.place).await?;
            report.created += 1;
            report.warnings.extend(row.warnings);
        }

        info!(
            created = report.created,
            warnings = report.warnings.len(),
            "imported places"
        );
        Ok(report)
    }

    /// Parse a workbook into place rows without touching the store
    pub fn read_rows(bytes: &[u8]) -> PlaceResult<Vec<ImportRow>> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))
            .map_err(|e| PlaceError::Format(format!("Failed to open Excel file: {}", e)))?;

        let mut rows = Vec::new();
        for sheet_name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                PlaceError::Format(format!("Failed to read sheet '{}': {}", sheet_name, e))
            })?;
            Self::process_sheet(&sheet_name, &range, &mut rows);
        }
        Ok(rows)
    }

    /// Map every row after the header of a single worksheet
    fn process_sheet(sheet_name: &str, range: &Range<Data>, rows: &mut Vec<ImportRow>) {
        let (Some(start), Some(end)) = (range.start(), range.end()) else {
            return; // Skip empty sheets
        };

        // Row 0 of the sheet is the header, wherever the used range begins
        for row in start.0.max(1)..=end.0 {
            let is_blank = (start.1..=end.1)
                .all(|col| range.get_value((row, col)).map_or(true, is_empty_cell));
            if is_blank {
                continue;
            }

            let mut warnings = Vec::new();
            let mut number = |col: u32| {
                let cell = range.get_value((row, col));
                cell_number(cell).unwrap_or_else(|| {
                    warnings.push(ImportWarning {
                        sheet: sheet_name.to_string(),
                        row,
                        column: HEADERS[col as usize].to_string(),
                        value: cell_text(cell),
                    });
                    0.0
                })
            };
            let latitude = number(LAT_COL);
            let longitude = number(LON_COL);

            let place = NewPlace {
                name: cell_text(range.get_value((row, NAME_COL))),
                latitude,
                longitude,
                description: cell_text(range.get_value((row, DESCRIPTION_COL))),
            };

            rows.push(ImportRow {
                sheet: sheet_name.to_string(),
                row,
                place,
                warnings,
            });
        }
    }
}

fn is_empty_cell(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Display text of a cell; missing cells read as the empty string
fn cell_text(cell: Option<&Data>) -> String {
    cell.map(|c| c.to_string()).unwrap_or_default()
}

/// Numeric value of a cell, parsing text cells. `None` when it is not a number.
fn cell_number(cell: Option<&Data>) -> Option<f64> {
    match cell? {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => parse_coordinate(s),
        _ => None,
    }
}
