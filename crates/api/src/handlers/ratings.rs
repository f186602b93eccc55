//! Handlers for worker ratings.
//!
//! Rating identity comes from the authenticated session, never the body.
//! Core validation runs before any store call, so a zero rating is
//! rejected without touching the database; a value the database still
//! refuses surfaces as a 400, not a crash.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use mendlet_core::error::CoreError;
use mendlet_core::rating::{validate_comment, validate_rating, RaterType};
use mendlet_core::status::RequestStatus;
use mendlet_core::types::DbId;
use mendlet_db::models::worker_rating::UpsertWorkerRating;
use mendlet_db::repositories::{RatingRepo, RequestRepo, WorkerRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::requests::ensure_landlord_owns;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /requests/{id}/rating`.
#[derive(Debug, Deserialize)]
pub struct SubmitRatingRequest {
    pub rating: i16,
    pub comment: Option<String>,
}

/// POST /requests/{id}/rating
///
/// Rate the worker who handled a completed request. Submitting again for
/// the same request overwrites the earlier rating.
pub async fn submit_rating(
    user: AuthUser,
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
    Json(input): Json<SubmitRatingRequest>,
) -> AppResult<impl IntoResponse> {
    // Who is rating, and may they?
    let rater_type = RaterType::from_role(user.role).map_err(AppError::Core)?;

    // Validate before any store call.
    validate_rating(input.rating).map_err(AppError::Core)?;
    validate_comment(input.comment.as_deref()).map_err(AppError::Core)?;

    let request = RequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "MaintenanceRequest",
                id: request_id,
            })
        })?;

    // Only the parties to the tenancy rate, and only their own request.
    match rater_type {
        RaterType::Tenant => {
            if request.tenant_id != user.profile_id {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Not your request".into(),
                )));
            }
        }
        RaterType::Landlord => {
            ensure_landlord_owns(&state.pool, &request, user.profile_id).await?;
        }
    }

    // Rating opens up once the work is done.
    let status = RequestStatus::parse(&request.status).map_err(AppError::Core)?;
    if status != RequestStatus::Completed {
        return Err(AppError::Core(CoreError::Conflict(
            "Only completed requests can be rated".into(),
        )));
    }
    let worker_id = request.assigned_worker_id.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "Request has no assigned worker to rate".into(),
        ))
    })?;

    let rating = RatingRepo::upsert(
        &state.pool,
        &UpsertWorkerRating {
            worker_id,
            maintenance_request_id: request_id,
            rater_id: user.profile_id,
            rater_type: rater_type.as_str().to_string(),
            rating: input.rating,
            comment: input.comment,
        },
    )
    .await?;

    // Keep the roster aggregate in step with the new sample.
    WorkerRepo::refresh_rating(&state.pool, worker_id).await?;

    tracing::info!(
        request_id = %request_id,
        worker_id = %worker_id,
        rater_id = %user.profile_id,
        rater_type = %rater_type,
        rating = input.rating,
        "Worker rating recorded"
    );

    Ok(Json(DataResponse { data: rating }))
}

/// GET /workers/{id}/ratings
///
/// All ratings received by a worker, newest first.
pub async fn list_worker_ratings(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(worker_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    WorkerRepo::find_by_id(&state.pool, worker_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Worker",
                id: worker_id,
            })
        })?;

    let ratings = RatingRepo::list_for_worker(&state.pool, worker_id).await?;
    Ok(Json(DataResponse { data: ratings }))
}
