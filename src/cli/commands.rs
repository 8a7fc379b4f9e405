use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;

use crate::error::PlaceResult;
use crate::excel::{PlaceExporter, PlaceImporter};
use crate::store::{open_store, PlaceStore};
use crate::types::{NewPlace, Place};

/// Format a coordinate for display, removing unnecessary decimal places
fn format_coordinate(n: f64) -> String {
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn format_place(place: &Place) -> String {
    let mut line = format!(
        "{:>5}  {}  ({}, {})",
        place.id,
        place.name.bright_blue().bold(),
        format_coordinate(place.latitude),
        format_coordinate(place.longitude)
    );
    if !place.description.is_empty() {
        line.push_str(&format!("  {}", place.description.dimmed()));
    }
    line
}

/// Execute the list command
pub async fn list(database_url: String) -> PlaceResult<()> {
    let store = open_store(&database_url).await?;
    let places = store.get_all().await?;

    println!("{}", "📍 Places".bold().green());
    println!("   Database: {}\n", database_url);

    if places.is_empty() {
        println!("{}", "   No places stored".yellow());
        return Ok(());
    }

    for place in &places {
        println!("{}", format_place(place));
    }
    println!("\n   {} place(s)", places.len());
    Ok(())
}

/// Execute the add command
pub async fn add(
    database_url: String,
    name: String,
    latitude: f64,
    longitude: f64,
    description: String,
) -> PlaceResult<()> {
    let store = open_store(&database_url).await?;
    let place = store
        .create(NewPlace::new(name, latitude, longitude, description))
        .await?;

    println!("{}", "✅ Place created".bold().green());
    println!("{}", format_place(&place));
    Ok(())
}

/// Execute the export command
pub async fn export(database_url: String, output: PathBuf, verbose: bool) -> PlaceResult<()> {
    println!("{}", "📍 Places - Excel Export".bold().green());
    println!("   Database: {}", database_url);
    println!("   Output:   {}\n", output.display());

    let store = open_store(&database_url).await?;
    export_to(store, &output, verbose).await?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Excel file: {}\n", output.display());
    Ok(())
}

async fn export_to(store: Arc<dyn PlaceStore>, output: &Path, verbose: bool) -> PlaceResult<()> {
    if verbose {
        println!("{}", "📊 Exporting to Excel...".cyan());
    }
    let bytes = PlaceExporter::new(store).export().await?;
    fs::write(output, &bytes)?;
    if verbose {
        println!("   Wrote {} bytes\n", bytes.len());
    }
    Ok(())
}

/// Execute the import command
pub async fn import(database_url: String, input: PathBuf, verbose: bool) -> PlaceResult<()> {
    println!("{}", "📍 Places - Excel Import".bold().green());
    println!("   Input:    {}", input.display());
    println!("   Database: {}\n", database_url);

    if verbose {
        println!("{}", "📖 Reading Excel file...".cyan());
    }
    let bytes = fs::read(&input)?;

    let store = open_store(&database_url).await?;
    let report = PlaceImporter::new(store).import(&bytes).await?;

    if !report.warnings.is_empty() {
        println!(
            "{}",
            format!("⚠️  {} cell(s) were not numbers and were stored as 0:", report.warnings.len())
                .yellow()
        );
        for warning in &report.warnings {
            println!(
                "   {} row {} {}: {:?}",
                warning.sheet, warning.row, warning.column, warning.value
            );
        }
        println!();
    }

    println!("{}", "✅ Import Complete!".bold().green());
    println!("   Created {} place(s)\n", report.created);
    Ok(())
}
