//! HTTP surface of the game service.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use crate::error::ServiceError;
use crate::protocol::{
    BestMoveRequest, BestMoveResponse, CreateGameRequest, DeleteAllResponse, ErrorResponse,
    GameSnapshot, MoveRecord, MoveRequest,
};

use super::GameService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GameService>,
}

/// Error returned by handlers, rendered as `{"error": ...}`.
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(ServiceError::BadRequest(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(ServiceError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict => StatusCode::CONFLICT,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        if status.is_server_error() {
            log::error!("{}", self.0);
        } else {
            log::debug!("rejected request: {}", self.0);
        }
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Build the router serving `/api/algorithms/`.
pub fn router(service: Arc<GameService>) -> Router {
    Router::new()
        .route("/api/algorithms/", get(list_games).post(create_game))
        .route("/api/algorithms/delete_all/", delete(delete_all))
        .route("/api/algorithms/{id}/", get(get_game).delete(delete_game))
        .route("/api/algorithms/{id}/make_move/", post(make_move))
        .route("/api/algorithms/{id}/get_best_move/", post(best_move))
        .route("/api/algorithms/{id}/moves/", get(list_moves))
        .with_state(AppState { service })
}

/// Run service work on the blocking pool; searches can take a while.
async fn run_blocking<T, F>(service: &Arc<GameService>, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&GameService) -> Result<T, ServiceError> + Send + 'static,
{
    let service = Arc::clone(service);
    let result = tokio::task::spawn_blocking(move || work(&service))
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))?;
    Ok(result?)
}

async fn create_game(
    State(state): State<AppState>,
    body: Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<GameSnapshot>), ApiError> {
    let Json(req) = body?;
    let snapshot = run_blocking(&state.service, move |service| service.create_game(req)).await?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

async fn list_games(State(state): State<AppState>) -> Json<Vec<GameSnapshot>> {
    Json(state.service.list_games())
}

async fn get_game(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.service.get_game(id)?))
}

async fn delete_game(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.service.delete_game(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_all(State(state): State<AppState>) -> Json<DeleteAllResponse> {
    Json(state.service.delete_all())
}

async fn make_move(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<GameSnapshot>, ApiError> {
    let Path(id) = id?;
    let Json(req) = body?;
    let snapshot = run_blocking(&state.service, move |service| service.make_move(id, req)).await?;
    Ok(Json(snapshot))
}

async fn best_move(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<BestMoveRequest>, JsonRejection>,
) -> Result<Json<BestMoveResponse>, ApiError> {
    let Path(id) = id?;
    let Json(req) = body?;
    let response = run_blocking(&state.service, move |service| service.best_move(id, req)).await?;
    Ok(Json(response))
}

async fn list_moves(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Vec<MoveRecord>>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.service.list_moves(id)?))
}
