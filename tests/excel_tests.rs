//! Excel export/import tests against real stores

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use places::excel::{PlaceExporter, PlaceImporter, HEADERS, SHEET_NAME};
use places::store::{MemoryPlaceStore, SqlitePlaceStore};
use places::{NewPlace, Place, PlaceError, PlaceResult, PlaceStore};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use std::io::Cursor;

async fn sqlite_store() -> Arc<dyn PlaceStore> {
    Arc::new(SqlitePlaceStore::connect("sqlite::memory:").await.unwrap())
}

fn sheet_rows(bytes: Vec<u8>) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    range.rows().map(|row| row.to_vec()).collect()
}

fn tuples(places: &[Place]) -> Vec<NewPlace> {
    let mut fields: Vec<NewPlace> = places.iter().map(Place::fields).collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name));
    fields
}

/// Store that delegates to memory but fails the Nth create (1-based)
struct FailingStore {
    inner: MemoryPlaceStore,
    fail_on: usize,
    creates: AtomicUsize,
}

impl FailingStore {
    fn new(fail_on: usize) -> Self {
        Self {
            inner: MemoryPlaceStore::new(),
            fail_on,
            creates: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl PlaceStore for FailingStore {
    async fn create(&self, place: NewPlace) -> PlaceResult<Place> {
        let attempt = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_on {
            return Err(PlaceError::Persistence(sqlx::Error::PoolClosed));
        }
        self.inner.create(place).await
    }

    async fn update(&self, place: &Place) -> PlaceResult<()> {
        self.inner.update(place).await
    }

    async fn delete(&self, id: i64) -> PlaceResult<()> {
        self.inner.delete(id).await
    }

    async fn get_by_id(&self, id: i64) -> PlaceResult<Option<Place>> {
        self.inner.get_by_id(id).await
    }

    async fn get_all(&self) -> PlaceResult<Vec<Place>> {
        self.inner.get_all().await
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_export_empty_store_is_header_only() {
    let bytes = PlaceExporter::new(sqlite_store().await).export().await.unwrap();
    let rows = sheet_rows(bytes);

    assert_eq!(rows.len(), 1);
    let header: Vec<String> = rows[0].iter().map(|c| c.to_string()).collect();
    assert_eq!(header, HEADERS.to_vec());
}

#[tokio::test]
async fn test_export_single_sheet_named_places() {
    let bytes = PlaceExporter::new(sqlite_store().await).export().await.unwrap();
    let workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Places".to_string()]);
}

#[tokio::test]
async fn test_export_example_row() {
    let store = sqlite_store().await;
    store
        .create(NewPlace::new("Park", 40.0, -73.0, "A park"))
        .await
        .unwrap();

    let rows = sheet_rows(PlaceExporter::new(store).export().await.unwrap());
    assert_eq!(
        rows[1],
        vec![
            Data::Float(1.0),
            Data::String("Park".to_string()),
            Data::Float(40.0),
            Data::Float(-73.0),
            Data::String("A park".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_export_fails_when_store_fails() {
    let store = Arc::new(SqlitePlaceStore::connect("sqlite::memory:").await.unwrap());
    store.pool().close().await;

    let result = PlaceExporter::new(store).export().await;
    assert!(matches!(result, Err(PlaceError::Persistence(_))));
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_round_trip_duplicates_records_with_fresh_ids() {
    let store = sqlite_store().await;
    let originals = vec![
        NewPlace::new("Park", 40.0, -73.0, "A park"),
        NewPlace::new("Harbor", -33.86, 151.21, ""),
        NewPlace::new("Summit", 27.9881, 86.925, "Very high"),
    ];
    for place in &originals {
        store.create(place.clone()).await.unwrap();
    }
    let before = store.get_all().await.unwrap();

    let bytes = PlaceExporter::new(store.clone()).export().await.unwrap();
    let report = PlaceImporter::new(store.clone()).import(&bytes).await.unwrap();
    assert_eq!(report.created, 3);
    assert!(report.warnings.is_empty());

    let after = store.get_all().await.unwrap();
    assert_eq!(after.len(), 6);

    let mut expected = tuples(&before);
    expected.extend(tuples(&before));
    expected.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(tuples(&after), expected);

    let old_ids: Vec<i64> = before.iter().map(|p| p.id).collect();
    for place in &after[3..] {
        assert!(!old_ids.contains(&place.id));
    }
}

#[tokio::test]
async fn test_import_example_gets_next_id() {
    let source = sqlite_store().await;
    source
        .create(NewPlace::new("Park", 40.0, -73.0, "A park"))
        .await
        .unwrap();
    let bytes = PlaceExporter::new(source.clone()).export().await.unwrap();

    PlaceImporter::new(source.clone()).import(&bytes).await.unwrap();

    assert_eq!(
        source.get_by_id(2).await.unwrap(),
        Some(NewPlace::new("Park", 40.0, -73.0, "A park").with_id(2))
    );
}

#[tokio::test]
async fn test_import_malformed_latitude_continues() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, label) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *label).unwrap();
    }
    sheet.write_string(1, 1, "Bad").unwrap();
    sheet.write_string(1, 2, "forty").unwrap();
    sheet.write_number(1, 3, -73.0).unwrap();
    sheet.write_string(2, 1, "Good").unwrap();
    sheet.write_number(2, 2, 10.0).unwrap();
    sheet.write_number(2, 3, 20.0).unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let store = sqlite_store().await;
    let report = PlaceImporter::new(store.clone()).import(&bytes).await.unwrap();

    assert_eq!(report.created, 2);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].value, "forty");

    let places = store.get_all().await.unwrap();
    assert_eq!(places[0].fields(), NewPlace::new("Bad", 0.0, -73.0, ""));
    assert_eq!(places[1].fields(), NewPlace::new("Good", 10.0, 20.0, ""));
}

#[tokio::test]
async fn test_import_aborts_on_first_create_failure_without_rollback() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, label) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *label).unwrap();
    }
    for (row, name) in ["One", "Two", "Three", "Four"].iter().enumerate() {
        let row = row as u32 + 1;
        sheet.write_string(row, 1, *name).unwrap();
        sheet.write_number(row, 2, 1.0).unwrap();
        sheet.write_number(row, 3, 2.0).unwrap();
    }
    let bytes = workbook.save_to_buffer().unwrap();

    let store = Arc::new(FailingStore::new(3));
    let result = PlaceImporter::new(store.clone()).import(&bytes).await;

    assert!(matches!(result, Err(PlaceError::Persistence(_))));
    // Rows before the failure stay; nothing after it was attempted
    let names: Vec<String> = store
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["One", "Two"]);
    assert_eq!(store.creates.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_import_rejects_non_workbook() {
    let store = sqlite_store().await;
    let result = PlaceImporter::new(store.clone())
        .import(b"ID,Name,Lat,Lon,Description\n1,Park,40,-73,A park\n")
        .await;

    assert!(matches!(result, Err(PlaceError::Format(_))));
    assert!(store.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_import_reads_all_sheets() {
    let mut workbook = Workbook::new();
    for (sheet_name, place_name) in [("First", "A"), ("Second", "B")] {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name).unwrap();
        sheet.write_string(0, 1, "Name").unwrap();
        sheet.write_string(1, 1, place_name).unwrap();
        sheet.write_number(1, 2, 1.0).unwrap();
        sheet.write_number(1, 3, 1.0).unwrap();
    }
    let bytes = workbook.save_to_buffer().unwrap();

    let store = sqlite_store().await;
    let report = PlaceImporter::new(store.clone()).import(&bytes).await.unwrap();

    assert_eq!(report.created, 2);
    let names: Vec<String> = store
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}
