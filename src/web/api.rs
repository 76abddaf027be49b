use axum::{
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::graph::loader;
use crate::service::{self, ActiveGraph, PathAnswer, ShortestPathService};
use crate::web::models::*;
use crate::Error;

/// Error half of every handler's return type
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared application state
#[derive(Clone, Default)]
pub struct AppState {
    pub service: Arc<Mutex<ShortestPathService>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the service; a panic in another handler does not invalidate the graph
    fn lock(&self) -> MutexGuard<'_, ShortestPathService> {
        self.service.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the active graph, cheap to clone and usable without the lock
    pub fn active_graph(&self) -> crate::Result<ActiveGraph> {
        self.lock().active().cloned()
    }
}

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/upload_graph_json/", post(upload_graph_json))
        .route("/api/graph", post(upload_graph_body).get(get_graph))
        .route("/solve_shortest_path", get(solve_shortest_path))
        .route("/solve_shortest__path/:params", get(solve_shortest_path_segment))
        .route("/api/health", get(health_check))
}

/// Maps a library error to its HTTP status and JSON body
pub fn api_error(err: Error) -> ApiError {
    let (status, code, details) = match &err {
        Error::MalformedGraph(_) => (StatusCode::BAD_REQUEST, "malformed_graph", None),
        Error::InvalidUpload(_) => (StatusCode::BAD_REQUEST, "invalid_upload", None),
        Error::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "invalid_query", None),
        Error::NodeNotFound(id) => (
            StatusCode::NOT_FOUND,
            "node_not_found",
            Some(serde_json::json!({ "node_id": id })),
        ),
        Error::NoActiveGraph => (StatusCode::CONFLICT, "no_active_graph", None),
        Error::PathInconsistency(_) => (StatusCode::INTERNAL_SERVER_ERROR, "path_inconsistency", None),
    };
    debug!("Request failed with {}: {}", status, err);

    (status, Json(ErrorResponse {
        error: code.to_string(),
        message: err.to_string(),
        details,
    }))
}

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Welcome to the Shortest Path Solver!" }))
}

/// Upload a graph as a multipart `file` field with a `.json` file name
pub async fn upload_graph_json(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| api_error(Error::InvalidUpload(err.to_string())))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| api_error(Error::InvalidUpload(err.to_string())))?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) = upload
        .ok_or_else(|| api_error(Error::InvalidUpload("no file uploaded".to_string())))?;

    if !filename.to_lowercase().ends_with(".json") {
        return Err(api_error(Error::InvalidUpload(format!(
            "invalid file type: '{}'",
            filename
        ))));
    }

    info!("Received graph upload '{}' ({} bytes)", filename, bytes.len());
    install_graph(&state, &filename, &bytes)
}

/// Upload a graph as a plain JSON request body
///
/// Read as raw bytes so that shape errors surface as `malformed_graph`.
pub async fn upload_graph_body(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<UploadResponse>, ApiError> {
    install_graph(&state, "inline.json", &body)
}

/// Builds the graph without holding the lock, then swaps it in
fn install_graph(state: &AppState, name: &str, bytes: &[u8]) -> Result<Json<UploadResponse>, ApiError> {
    let graph = loader::load_json(bytes).map_err(|err| {
        warn!("Rejected graph upload '{}': {}", name, err);
        api_error(err)
    })?;

    let mut service = state.lock();
    let active = service.replace(name, graph);
    Ok(Json(UploadResponse::from(active)))
}

/// Summary of the active graph
pub async fn get_graph(State(state): State<AppState>) -> Result<Json<GraphInfo>, ApiError> {
    let active = state.active_graph().map_err(api_error)?;
    Ok(Json(GraphInfo::from(&active)))
}

/// Shortest path between two nodes of the active graph
pub async fn solve_shortest_path(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<PathAnswer>, ApiError> {
    answer_query(&state, &query)
}

/// Same query with both ids packed into the path,
/// e.g. `/solve_shortest__path/starting_node_id=A&end_node_id=D`
pub async fn solve_shortest_path_segment(
    State(state): State<AppState>,
    Path(params): Path<String>,
) -> Result<Json<PathAnswer>, ApiError> {
    let query = PathQuery::from_path_segment(&params).map_err(api_error)?;
    answer_query(&state, &query)
}

fn answer_query(state: &AppState, query: &PathQuery) -> Result<Json<PathAnswer>, ApiError> {
    let active = state.active_graph().map_err(api_error)?;
    let answer = service::solve_and_path(&active.graph, &query.starting_node_id, &query.end_node_id)
        .map_err(api_error)?;
    Ok(Json(answer))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
