use clap::{Parser, Subcommand};
use places::api::{run_api_server, server::DEFAULT_DATABASE_URL, ApiConfig};
use places::cli;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "places")]
#[command(about = "Place records with Excel import/export.")]
#[command(long_about = "Places - place records backed by SQLite, with bulk Excel exchange

COMMANDS:
  serve   - Run the HTTP server
  list    - Print all stored places
  add     - Create a place
  export  - Write every place to an Excel (.xlsx) file
  import  - Create places from an Excel (.xlsx) file

EXAMPLES:
  places add \"Central Park\" 40.7829 -73.9654 --desc \"Urban park\"
  places export places.xlsx
  places import places.xlsx --database-url sqlite://other.db
  places serve --port 3000")]
#[command(version)]
struct Cli {
    /// Database URL (sqlite://path/to/file.db, or `memory` for a throwaway store)
    #[arg(
        short,
        long,
        global = true,
        default_value = DEFAULT_DATABASE_URL,
        env = "PLACES_DATABASE_URL"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Host address to bind to (use 0.0.0.0 for all interfaces)
        #[arg(short = 'H', long, default_value = "127.0.0.1", env = "PLACES_HOST")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080", env = "PLACES_PORT")]
        port: u16,
    },

    /// Print all stored places
    List,

    /// Create a place
    Add {
        /// Place name
        name: String,

        /// Latitude (no range check)
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude (no range check)
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Free-text description
        #[arg(long, default_value = "")]
        desc: String,
    },

    #[command(long_about = "Export every place to an Excel .xlsx file.

Writes a single worksheet named \"Places\" with the header row
ID, Name, Lat, Lon, Description followed by one row per place.

EXAMPLE:
  places export places.xlsx")]
    /// Export every place to an Excel .xlsx file
    Export {
        /// Output Excel file path (.xlsx)
        output: PathBuf,

        /// Show verbose export steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Import places from an Excel .xlsx file.

Every worksheet is read. The first row of each sheet is a header and is
skipped. Columns are positional: B=name, C=lat, D=lon, E=description;
column A (the exported ID) is ignored and new ids are assigned.

Coordinates that are not numbers are stored as 0 and reported.
Rows are saved one by one: if saving fails midway, earlier rows stay.

EXAMPLE:
  places import places.xlsx")]
    /// Import places from an Excel .xlsx file
    Import {
        /// Path to Excel file (.xlsx)
        input: PathBuf,

        /// Show verbose import steps
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let database_url = cli.database_url;

    match cli.command {
        Commands::Serve { host, port } => {
            run_api_server(ApiConfig {
                host,
                port,
                database_url,
            })
            .await
        }

        Commands::List => Ok(cli::list(database_url).await?),

        Commands::Add {
            name,
            latitude,
            longitude,
            desc,
        } => Ok(cli::add(database_url, name, latitude, longitude, desc).await?),

        Commands::Export { output, verbose } => {
            Ok(cli::export(database_url, output, verbose).await?)
        }

        Commands::Import { input, verbose } => Ok(cli::import(database_url, input, verbose).await?),
    }
}
