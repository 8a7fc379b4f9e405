//! Places API Server implementation
//!
//! HTTP server using Axum. Serves place CRUD plus Excel export/import.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::store::{open_store, PlaceStore};

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://places.db";

/// Largest accepted upload for `/import`
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// API Server configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub version: String,
    pub store: Arc<dyn PlaceStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PlaceStore>) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            store,
        }
    }
}

/// Build the application router over `state`
pub fn router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Places
        .route("/places", post(handlers::create_place).get(handlers::list_places))
        .route(
            "/api/v1/places/:id",
            get(handlers::get_place)
                .put(handlers::update_place)
                .delete(handlers::delete_place),
        )
        // Bulk transfer
        .route("/export", get(handlers::export_places))
        .route("/import", post(handlers::import_places))
        // State and middleware
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "places=info,tower_http=info".into()),
        )
        .init();

    let store = open_store(&config.database_url).await?;
    let state = Arc::new(AppState::new(store));
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("📍 Places API Server starting on http://{}", addr);
    info!("   Database: {}", config.database_url);
    info!("   Endpoints: /places, /api/v1/places/:id, /export, /import");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Places API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPlaceStore;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url, "sqlite://places.db");
    }

    #[test]
    fn test_config_address_format() {
        let config = ApiConfig {
            host: "192.168.1.100".to_string(),
            port: 9090,
            ..ApiConfig::default()
        };
        let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse().unwrap();
        assert_eq!(addr.port(), 9090);
    }

    #[test]
    fn test_app_state_version() {
        let state = AppState::new(Arc::new(MemoryPlaceStore::new()));
        assert_eq!(state.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_app_state_shares_store() {
        let state = Arc::new(AppState::new(Arc::new(MemoryPlaceStore::new())));
        let state_clone = Arc::clone(&state);
        assert!(Arc::ptr_eq(&state.store, &state_clone.store));
    }
}
