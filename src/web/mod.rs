//! Web API module for OdontoChart.
//!
//! This module provides a REST API over the charting core so a browser
//! front end can draw the chart and send clicks.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/vocabulary` - Treatment kinds, colors, surfaces and arcade layout
//! - `GET /api/charts` - List chart documents in the workspace
//! - `GET /api/charts/{filename}` - Load a chart with per-tooth views
//! - `PUT /api/charts/{filename}` - Save a chart document
//! - `POST /api/charts/{filename}/click` - Apply one tool click and persist it

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::charting::{ChartChange, ChartingController};
use crate::models::{
    ArcadeLayout, Chart, ChartDocument, RgbColor, Surface, Tool, ToothId, TreatmentKind,
    UNTREATED_COLOR,
};
use crate::projection::{
    aggregate_view, flat_view, AggregateToothView, FlatToothView, AGGREGATE_PRIORITY,
};
use crate::services::{ChartService, ChartSummary};

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Directory holding chart documents
    workspace_root: PathBuf,
    /// Serializes every load-mutate-save so one chart has one writer
    write_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Creates a new application state.
    #[must_use]
    pub fn new(workspace_root: PathBuf) -> Self {
        Self {
            workspace_root,
            write_lock: Arc::new(Mutex::new(())),
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// API version.
    pub version: String,
}

/// One treatment kind of the vocabulary.
#[derive(Debug, Serialize)]
pub struct TreatmentInfo {
    /// Wire name
    pub kind: TreatmentKind,
    /// Human-readable name
    pub name: String,
    /// Fill color
    pub color: RgbColor,
}

/// One tooth surface.
#[derive(Debug, Serialize)]
pub struct SurfaceInfo {
    /// Wire name
    pub surface: Surface,
    /// Single-letter abbreviation
    pub abbreviation: String,
}

/// Everything a renderer needs to draw a chart.
#[derive(Debug, Serialize)]
pub struct VocabularyResponse {
    /// Treatment kinds in palette order
    pub treatments: Vec<TreatmentInfo>,
    /// Surfaces in canonical order
    pub surfaces: Vec<SurfaceInfo>,
    /// Fill for untreated surfaces
    pub untreated_color: RgbColor,
    /// Scan order of the whole-tooth view
    pub aggregate_priority: Vec<TreatmentKind>,
    /// Display order of the teeth
    pub arcades: ArcadeLayout,
}

/// Chart listing.
#[derive(Debug, Serialize)]
pub struct ChartListResponse {
    /// Charts, newest first
    pub charts: Vec<ChartSummary>,
}

/// Both projections of one tooth.
#[derive(Debug, Serialize)]
pub struct ToothViews {
    /// Tooth shown
    pub tooth: ToothId,
    /// Per-surface view
    pub flat: FlatToothView,
    /// Whole-tooth view
    pub aggregate: AggregateToothView,
}

impl ToothViews {
    fn of(chart: &Chart, tooth: ToothId) -> Self {
        Self {
            tooth,
            flat: flat_view(chart, tooth),
            aggregate: aggregate_view(chart, tooth),
        }
    }
}

/// Loaded chart with views for every charted tooth.
#[derive(Debug, Serialize)]
pub struct ChartDetailResponse {
    /// File name within the workspace
    pub filename: String,
    /// The stored document
    pub document: ChartDocument,
    /// Views of charted teeth; uncharted teeth render untreated
    pub views: Vec<ToothViews>,
}

/// Body of a click request.
#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    /// Tooth clicked
    pub tooth: ToothId,
    /// Surface clicked; absent for a whole-tooth click
    #[serde(default)]
    pub surface: Option<Surface>,
    /// Treatment to apply; `null` erases. The field itself is required.
    #[serde(deserialize_with = "required_tool")]
    pub tool: Option<TreatmentKind>,
}

fn required_tool<'de, D>(deserializer: D) -> Result<Option<TreatmentKind>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<TreatmentKind>::deserialize(deserializer)
}

/// Result of a click.
#[derive(Debug, Serialize)]
pub struct ClickResponse {
    /// What changed
    pub change: ChartChange,
    /// Views of the clicked tooth after the change
    pub views: ToothViews,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn internal_error(error: &str, cause: &anyhow::Error) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::with_details(error, format!("{cause:#}"))),
    )
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Validates a filename to prevent path traversal attacks.
///
/// Returns the sanitized filename or an error if the filename is invalid.
fn validate_filename(filename: &str) -> Result<&str, ApiError> {
    if filename.is_empty() {
        return Err(ApiError::new("Filename cannot be empty"));
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ApiError::new(
            "Invalid filename: path traversal not allowed",
        ));
    }

    if filename.starts_with('.') {
        return Err(ApiError::new("Invalid filename: hidden files not allowed"));
    }

    Ok(filename)
}

/// Resolves a request filename to a path in the workspace.
fn chart_path(state: &AppState, filename: &str) -> ApiResult<(String, PathBuf)> {
    let filename = validate_filename(filename).map_err(|e| (StatusCode::BAD_REQUEST, Json(e)))?;
    let path = ChartService::path_for(&state.workspace_root, filename);
    let name = path
        .file_name()
        .map_or_else(|| filename.to_string(), |n| n.to_string_lossy().to_string());
    Ok((name, path))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/vocabulary - Treatment vocabulary and layout.
async fn get_vocabulary() -> Json<VocabularyResponse> {
    Json(VocabularyResponse {
        treatments: TreatmentKind::ALL
            .into_iter()
            .map(|kind| TreatmentInfo {
                kind,
                name: kind.display_name().to_string(),
                color: kind.color(),
            })
            .collect(),
        surfaces: Surface::ALL
            .into_iter()
            .map(|surface| SurfaceInfo {
                surface,
                abbreviation: surface.abbreviation().to_string(),
            })
            .collect(),
        untreated_color: UNTREATED_COLOR,
        aggregate_priority: AGGREGATE_PRIORITY.to_vec(),
        arcades: ArcadeLayout::default(),
    })
}

/// GET /api/charts - List chart documents in the workspace.
async fn list_charts(State(state): State<AppState>) -> ApiResult<Json<ChartListResponse>> {
    let charts = ChartService::list(&state.workspace_root)
        .map_err(|e| internal_error("Failed to read workspace directory", &e))?;
    Ok(Json(ChartListResponse { charts }))
}

/// GET /api/charts/{filename} - Load a chart document.
async fn get_chart(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> ApiResult<Json<ChartDetailResponse>> {
    let (filename, path) = chart_path(&state, &filename)?;

    if !path.exists() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiError::new(format!("Chart file not found: {filename}"))),
        ));
    }

    let document =
        ChartService::load(&path).map_err(|e| internal_error("Failed to load chart", &e))?;
    let chart = document.to_chart();
    let views = chart
        .charted_teeth()
        .map(|tooth| ToothViews::of(&chart, tooth))
        .collect();

    Ok(Json(ChartDetailResponse {
        filename,
        document,
        views,
    }))
}

/// PUT /api/charts/{filename} - Save a chart document.
///
/// Teeth go through the lenient reader, so unknown keys are dropped and
/// partial extractions are completed before saving.
async fn save_chart(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<StatusCode> {
    let (_, path) = chart_path(&state, &filename)?;

    if !body.is_object() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("Chart document must be a JSON object")),
        ));
    }

    let mut document = ChartDocument::from_json_value(&body);
    document.metadata.touch();

    let _guard = state.write_lock.lock().await;
    ChartService::save(&document, &path).map_err(|e| internal_error("Failed to save chart", &e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/charts/{filename}/click - Apply a click and persist the chart.
///
/// A missing file starts a new chart. No-op clicks are not written.
async fn click_chart(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Json(request): Json<ClickRequest>,
) -> ApiResult<Json<ClickResponse>> {
    let (_, path) = chart_path(&state, &filename)?;

    let _guard = state.write_lock.lock().await;
    let mut document = if path.exists() {
        ChartService::load(&path).map_err(|e| internal_error("Failed to load chart", &e))?
    } else {
        ChartDocument::default()
    };
    let mut chart = document.to_chart();

    let controller = ChartingController::new(Tool::from(request.tool));
    let change = match request.surface {
        Some(surface) => controller.apply_surface_click(&mut chart, request.tooth, surface),
        None => controller.apply_tooth_click(&mut chart, request.tooth),
    };

    if change.is_noop() {
        debug!("Click on tooth {} changed nothing", request.tooth);
    } else {
        document.metadata.touch();
        let document = ChartDocument::new(document.metadata, &chart);
        ChartService::save(&document, &path)
            .map_err(|e| internal_error("Failed to save chart", &e))?;
    }

    Ok(Json(ClickResponse {
        change,
        views: ToothViews::of(&chart, request.tooth),
    }))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the server is meant to run locally next to the front end
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/vocabulary", get(get_vocabulary))
        .route("/api/charts", get(list_charts))
        .route("/api/charts/{filename}", get(get_chart).put(save_chart))
        .route("/api/charts/{filename}/click", post(click_chart))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the server fails to bind or serve.
pub async fn run_server(workspace_root: PathBuf, addr: SocketAddr) -> anyhow::Result<()> {
    info!(
        "Serving charts from {} on {}",
        workspace_root.display(),
        addr
    );
    let app = create_router(AppState::new(workspace_root));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
