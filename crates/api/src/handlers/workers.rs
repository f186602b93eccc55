//! Handlers for the `/workers` roster.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use mendlet_core::error::CoreError;
use mendlet_core::types::DbId;
use mendlet_db::models::worker::CreateWorker;
use mendlet_db::repositories::WorkerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAgent;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /workers`.
#[derive(Debug, Default, Deserialize)]
pub struct WorkerFilter {
    pub category: Option<String>,
}

/// Request body for `PUT /workers/{id}/favorite`.
#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    pub favorite: bool,
}

/// POST /workers
///
/// Add a worker to the roster.
pub async fn create(
    RequireAgent(user): RequireAgent,
    State(state): State<AppState>,
    Json(input): Json<CreateWorker>,
) -> AppResult<impl IntoResponse> {
    for (value, field) in [
        (&input.name, "Name"),
        (&input.specialty, "Specialty"),
        (&input.category, "Category"),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "{field} must not be empty"
            ))));
        }
    }

    let worker = WorkerRepo::create(&state.pool, &input).await?;

    tracing::info!(
        worker_id = %worker.id,
        agent_id = %user.profile_id,
        category = %worker.category,
        "Worker added to roster"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: worker })))
}

/// GET /workers?category=
///
/// The roster, favorites first. Any authenticated caller may browse it.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<WorkerFilter>,
) -> AppResult<impl IntoResponse> {
    let workers = WorkerRepo::list(&state.pool, filter.category.as_deref()).await?;
    Ok(Json(DataResponse { data: workers }))
}

/// GET /workers/{id}
pub async fn get(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let worker = WorkerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Worker",
                id,
            })
        })?;
    Ok(Json(DataResponse { data: worker }))
}

/// PUT /workers/{id}/favorite
///
/// Mark or unmark a roster favorite.
pub async fn set_favorite(
    RequireAgent(user): RequireAgent,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<FavoriteRequest>,
) -> AppResult<impl IntoResponse> {
    let worker = WorkerRepo::set_favorite(&state.pool, id, input.favorite)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Worker",
                id,
            })
        })?;

    tracing::info!(
        worker_id = %id,
        agent_id = %user.profile_id,
        favorite = input.favorite,
        "Worker favorite flag updated"
    );

    Ok(Json(DataResponse { data: worker }))
}
