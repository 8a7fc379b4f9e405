//! Places API Server binary
//!
//! HTTP server for place records: CRUD plus Excel export/import.

use clap::Parser;
use places::api::{run_api_server, server::DEFAULT_DATABASE_URL, ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "places-server")]
#[command(version)]
#[command(about = "Places API Server - place records with Excel import/export")]
#[command(long_about = r#"
Places API Server

Endpoints:
  - GET    /places             - List places
  - POST   /places             - Create a place (form: name, lat, lon, desc)
  - GET    /api/v1/places/:id  - Get a place
  - PUT    /api/v1/places/:id  - Replace a place (JSON body)
  - DELETE /api/v1/places/:id  - Delete a place
  - GET    /export             - Download all places as .xlsx
  - POST   /import             - Upload .xlsx (multipart field "file")

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Example usage:
  places-server                           # Start on localhost:8080
  places-server --host 0.0.0.0 --port 3000 --database-url sqlite://places.db

  curl -o places.xlsx http://localhost:8080/export
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "PLACES_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "PLACES_PORT")]
    port: u16,

    /// Database URL (sqlite://path/to/file.db, or `memory`)
    #[arg(short, long, default_value = DEFAULT_DATABASE_URL, env = "PLACES_DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        database_url: args.database_url,
    };

    run_api_server(config).await
}
