//! HTTP handlers for the solving service.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::deadline::Deadline;
use crate::engine::TspEngine;
use crate::error::SolveError;

/// Body of `POST /tsp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TspRequest {
    /// City names, unique and non-blank.
    pub cities: Vec<String>,
    /// Symmetric N×N distance matrix.
    pub distances: Vec<Vec<f64>>,
    /// Seed for start-city sampling on very large instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Successful response of `POST /tsp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TspResponse {
    /// City names in visiting order; the return to the first city is implied.
    pub best_path: Vec<String>,
    /// Length of the closed tour.
    pub min_cost: f64,
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error kind, e.g. `AsymmetricMatrix`.
    pub error: String,
    /// Human-readable description.
    pub message: String,
}

/// Shared, read-only state for all requests.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    engine: TspEngine,
    time_limit: Option<Duration>,
    seed: Option<u64>,
}

impl AppState {
    /// Creates state around an engine with no time limit.
    pub fn new(engine: TspEngine) -> Self {
        Self {
            engine,
            time_limit: None,
            seed: None,
        }
    }

    /// Limits every solve to `limit` of wall time.
    pub fn with_time_limit(mut self, limit: Option<Duration>) -> Self {
        self.time_limit = limit;
        self
    }

    /// Seed used when a request does not carry one.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    fn deadline(&self, token: CancellationToken) -> Deadline {
        let deadline = match self.time_limit {
            Some(limit) => Deadline::after(limit),
            None => Deadline::none(),
        };
        deadline.with_token(token)
    }
}

/// Errors returned by the handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The engine rejected or failed the request.
    Solve(SolveError),
    /// The body was not a valid JSON request.
    Rejected(JsonRejection),
    /// The blocking solve task panicked or was cancelled.
    Task(String),
}

impl From<SolveError> for ApiError {
    fn from(e: SolveError) -> Self {
        Self::Solve(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            Self::Solve(e) => {
                let status = if e.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, e.kind().to_string(), e.to_string())
            }
            Self::Rejected(rejection) => (
                rejection.status(),
                "MalformedRequest".to_string(),
                rejection.body_text(),
            ),
            Self::Task(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal".to_string(),
                message,
            ),
        };
        if status.is_server_error() {
            error!(%status, kind = %kind, message = %message, "request failed");
        } else {
            warn!(%status, kind = %kind, message = %message, "request rejected");
        }
        (status, Json(ErrorResponse { error: kind, message })).into_response()
    }
}

/// Build the Axum router.
pub fn build_router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/tsp", post(solve_tsp))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Handler for `POST /tsp`.
///
/// The solve runs on the blocking pool. If the client goes away the request
/// future is dropped, which cancels the deadline token and lets a heuristic
/// search stop at its next pass boundary.
async fn solve_tsp(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TspRequest>, JsonRejection>,
) -> Result<Json<TspResponse>, ApiError> {
    let Json(req) = payload.map_err(ApiError::Rejected)?;

    let token = CancellationToken::new();
    let _cancel_on_drop = token.clone().drop_guard();
    let deadline = state.deadline(token);
    let seed = req.seed.or(state.seed);
    let cities = req.cities.len();

    let task_state = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || {
        task_state
            .engine
            .solve(req.cities, &req.distances, &deadline, seed)
    })
    .await
    .map_err(|e| ApiError::Task(format!("solve task failed: {e}")))??;

    info!(
        cities,
        algorithm = %result.algorithm,
        min_cost = result.total_distance,
        elapsed_ms = result.stats.elapsed.as_millis() as u64,
        deadline_reached = result.stats.deadline_reached,
        "tsp solved"
    );

    Ok(Json(TspResponse {
        best_path: result.path,
        min_cost: result.total_distance,
    }))
}

/// Handler for `GET /health`.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
