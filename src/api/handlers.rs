//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use super::server::AppState;
use crate::error::PlaceError;
use crate::excel::{export_filename, PlaceExporter, PlaceImporter, XLSX_CONTENT_TYPE};
use crate::types::{parse_coordinate, NewPlace, Place};

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error response: status code plus an error envelope
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<PlaceError> for ApiError {
    fn from(err: PlaceError) -> Self {
        let status = match &err {
            PlaceError::NotFound(_) => StatusCode::NOT_FOUND,
            PlaceError::Format(_) => StatusCode::BAD_REQUEST,
            PlaceError::Persistence(_) | PlaceError::Export(_) | PlaceError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            error!("request failed: {}", err);
        }
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::err(self.message))).into_response()
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(path: &str, method: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Places API Server".to_string(),
        version: state.version.clone(),
        description: "Place records with Excel import/export".to_string(),
        endpoints: vec![
            EndpointInfo::new("/health", "GET", "Health check endpoint"),
            EndpointInfo::new("/version", "GET", "Get server version"),
            EndpointInfo::new("/places", "GET", "List all places"),
            EndpointInfo::new("/places", "POST", "Create a place from form fields"),
            EndpointInfo::new("/api/v1/places/:id", "GET", "Get a place by id"),
            EndpointInfo::new("/api/v1/places/:id", "PUT", "Replace a place"),
            EndpointInfo::new("/api/v1/places/:id", "DELETE", "Delete a place"),
            EndpointInfo::new("/export", "GET", "Download all places as Excel"),
            EndpointInfo::new("/import", "POST", "Upload an Excel file of places"),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec![
            "places".to_string(),
            "export".to_string(),
            "import".to_string(),
        ],
    }))
}

/// Create form. Coordinates that do not parse are stored as 0.
#[derive(Deserialize, Default)]
pub struct CreatePlaceForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lat: String,
    #[serde(default)]
    pub lon: String,
    #[serde(default)]
    pub desc: String,
}

impl CreatePlaceForm {
    pub fn into_new_place(self) -> NewPlace {
        NewPlace {
            name: self.name,
            latitude: parse_coordinate(&self.lat).unwrap_or(0.0),
            longitude: parse_coordinate(&self.lon).unwrap_or(0.0),
            description: self.desc,
        }
    }
}

/// POST /places - Create a place, then redirect to the list
pub async fn create_place(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreatePlaceForm>,
) -> Result<Redirect, ApiError> {
    state.store.create(form.into_new_place()).await?;
    Ok(Redirect::to("/places"))
}

/// GET /places - List all places
pub async fn list_places(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Place>>>, ApiError> {
    let places = state.store.get_all().await?;
    Ok(Json(ApiResponse::ok(places)))
}

/// GET /api/v1/places/:id - Get one place
pub async fn get_place(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Place>>, ApiError> {
    match state.store.get_by_id(id).await? {
        Some(place) => Ok(Json(ApiResponse::ok(place))),
        None => Err(PlaceError::NotFound(id).into()),
    }
}

/// PUT /api/v1/places/:id - Replace every field of a place
pub async fn update_place(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<NewPlace>,
) -> Result<Json<ApiResponse<Place>>, ApiError> {
    let place = body.with_id(id);
    state.store.update(&place).await?;
    Ok(Json(ApiResponse::ok(place)))
}

/// Delete response
#[derive(Serialize, Default)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: i64,
}

/// DELETE /api/v1/places/:id - Delete a place
pub async fn delete_place(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeleteResponse>>, ApiError> {
    state.store.delete(id).await?;
    Ok(Json(ApiResponse::ok(DeleteResponse { deleted: true, id })))
}

/// GET /export - Download every place as an .xlsx attachment
pub async fn export_places(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let bytes = PlaceExporter::new(state.store.clone()).export().await?;
    let filename = export_filename(Utc::now());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// POST /import - Import an uploaded .xlsx (multipart field `file`)
pub async fn import_places(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, format!("Invalid upload: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field.bytes().await.map_err(|e| {
                ApiError::new(StatusCode::BAD_REQUEST, format!("Failed to read file: {}", e))
            })?;
            upload = Some(bytes);
        }
    }

    let bytes =
        upload.ok_or_else(|| ApiError::new(StatusCode::BAD_REQUEST, "Failed to get file"))?;

    PlaceImporter::new(state.store.clone())
        .import(&bytes)
        .await?;
    Ok(Redirect::to("/places"))
}
