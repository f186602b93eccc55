//! Handlers for the maintenance-request lifecycle.
//!
//! Three role views (tenant / agent / landlord), the four guarded
//! transitions (assign, approve, deny, complete), and the plain-text
//! invoice download. Transition handlers rely on the repository's
//! guarded UPDATEs; when the guard misses they re-read the row to tell
//! "not found" apart from "illegal transition" and let the core state
//! machine word the rejection.

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use rust_decimal::Decimal;

use mendlet_core::error::CoreError;
use mendlet_core::invoice::{ensure_invoice_eligible, Invoice};
use mendlet_core::roles::Role;
use mendlet_core::status::{Priority, RequestStatus};
use mendlet_core::types::DbId;
use mendlet_db::models::maintenance_request::{
    ApproveRequest, AssignRequest, CompleteRequest, CreateMaintenanceRequest, DenyRequest,
    MaintenanceRequest, RequestFilter,
};
use mendlet_db::repositories::{ProfileRepo, PropertyRepo, RequestRepo, WorkerRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAgent, RequireLandlord, RequireTenant};
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Fetch a request or return 404.
async fn fetch_request(pool: &sqlx::PgPool, id: DbId) -> AppResult<MaintenanceRequest> {
    RequestRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "MaintenanceRequest",
            id,
        })
    })
}

/// A guarded transition returned no row: re-read and report why.
///
/// Either the request vanished (404) or it is not in the state the
/// transition requires, in which case the state machine words the
/// conflict.
async fn explain_failed_transition(
    pool: &sqlx::PgPool,
    id: DbId,
    target: RequestStatus,
) -> AppError {
    match RequestRepo::find_by_id(pool, id).await {
        Ok(Some(row)) => match RequestStatus::parse(&row.status) {
            Ok(current) => match current.validate_transition(target) {
                // The guard missed but the transition looks legal: we
                // lost a race with a concurrent writer.
                Ok(()) => AppError::Core(CoreError::Conflict(format!(
                    "Request was modified concurrently; now '{}'",
                    row.status
                ))),
                Err(core) => AppError::Core(core),
            },
            Err(core) => AppError::Core(core),
        },
        Ok(None) => AppError::Core(CoreError::NotFound {
            entity: "MaintenanceRequest",
            id,
        }),
        Err(err) => AppError::Database(err),
    }
}

/// Reject when the request's property does not belong to this landlord.
pub(crate) async fn ensure_landlord_owns(
    pool: &sqlx::PgPool,
    request: &MaintenanceRequest,
    landlord_id: DbId,
) -> AppResult<()> {
    let property = PropertyRepo::find_by_id(pool, request.property_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Property",
                id: request.property_id,
            })
        })?;
    if property.landlord_id != landlord_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Request is not on one of your properties".into(),
        )));
    }
    Ok(())
}

/// Detail visibility: the owning tenant, any agent, or the owning
/// landlord.
async fn ensure_can_view(
    pool: &sqlx::PgPool,
    request: &MaintenanceRequest,
    user: &AuthUser,
) -> AppResult<()> {
    match user.role {
        Role::Agent => Ok(()),
        Role::Tenant => {
            if request.tenant_id == user.profile_id {
                Ok(())
            } else {
                Err(AppError::Core(CoreError::Forbidden(
                    "Not your request".into(),
                )))
            }
        }
        Role::Landlord => ensure_landlord_owns(pool, request, user.profile_id).await,
    }
}

fn require_non_empty(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{field} must not be empty"
        ))));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Role views
-------------------------------------------------------------------------- */

/// GET /tenant/requests
///
/// The tenant's own requests, newest first.
pub async fn tenant_list(
    RequireTenant(user): RequireTenant,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests = RequestRepo::list_for_tenant(&state.pool, user.profile_id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// POST /tenant/requests
///
/// Submit a new request against the tenant's leased property. Always
/// created in `submitted`.
pub async fn submit(
    RequireTenant(user): RequireTenant,
    State(state): State<AppState>,
    Json(input): Json<CreateMaintenanceRequest>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.title, "Title")?;
    require_non_empty(&input.category, "Category")?;
    require_non_empty(&input.description, "Description")?;
    Priority::parse(&input.priority).map_err(AppError::Core)?;

    let profile = ProfileRepo::find_by_id(&state.pool, user.profile_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Profile no longer exists".into()))
        })?;
    let property_id = profile.property_id.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(
            "You have no active lease to report against".into(),
        ))
    })?;

    let request = RequestRepo::create(&state.pool, user.profile_id, property_id, &input).await?;

    tracing::info!(
        request_id = %request.id,
        tenant_id = %user.profile_id,
        priority = %request.priority,
        "Maintenance request submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// GET /agent/requests?status=&priority=
///
/// The agent triage view: all requests, optionally filtered.
pub async fn agent_list(
    RequireAgent(_user): RequireAgent,
    State(state): State<AppState>,
    Query(filter): Query<RequestFilter>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref status) = filter.status {
        RequestStatus::parse(status).map_err(AppError::Core)?;
    }
    if let Some(ref priority) = filter.priority {
        Priority::parse(priority).map_err(AppError::Core)?;
    }

    let requests = RequestRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /landlord/requests
///
/// Requests on the landlord's properties, newest first.
pub async fn landlord_list(
    RequireLandlord(user): RequireLandlord,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests = RequestRepo::list_for_landlord(&state.pool, user.profile_id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /landlord/invoices
///
/// The landlord's invoice-eligible set: completed requests with a
/// positive actual cost.
pub async fn landlord_invoices(
    RequireLandlord(user): RequireLandlord,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let requests =
        RequestRepo::list_invoice_eligible_for_landlord(&state.pool, user.profile_id).await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /requests/{id}
///
/// Request detail, visible to the owning tenant, any agent, or the
/// owning landlord.
pub async fn get_request(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = fetch_request(&state.pool, id).await?;
    ensure_can_view(&state.pool, &request, &user).await?;
    Ok(Json(DataResponse { data: request }))
}

/* --------------------------------------------------------------------------
Transitions
-------------------------------------------------------------------------- */

/// POST /requests/{id}/assign
///
/// Agent assigns a rostered worker: submitted -> in_progress.
pub async fn assign(
    RequireAgent(user): RequireAgent,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AssignRequest>,
) -> AppResult<impl IntoResponse> {
    WorkerRepo::find_by_id(&state.pool, input.worker_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Worker",
                id: input.worker_id,
            })
        })?;

    if let Some(cost) = input.estimated_cost {
        if cost < Decimal::ZERO {
            return Err(AppError::Core(CoreError::Validation(
                "Estimated cost must not be negative".into(),
            )));
        }
    }

    let updated = RequestRepo::assign(
        &state.pool,
        id,
        input.worker_id,
        input.estimated_cost,
        input.agent_notes.as_deref(),
    )
    .await?;

    match updated {
        Some(request) => {
            tracing::info!(
                request_id = %id,
                agent_id = %user.profile_id,
                worker_id = %input.worker_id,
                "Request assigned"
            );
            Ok(Json(DataResponse { data: request }))
        }
        None => Err(explain_failed_transition(&state.pool, id, RequestStatus::InProgress).await),
    }
}

/// POST /requests/{id}/approve
///
/// Landlord approves spend: submitted -> in_progress. The budget cap is
/// stored but not enforced.
pub async fn approve(
    RequireLandlord(user): RequireLandlord,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ApproveRequest>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.landlord_notes, "Landlord notes")?;

    let request = fetch_request(&state.pool, id).await?;
    ensure_landlord_owns(&state.pool, &request, user.profile_id).await?;

    let updated =
        RequestRepo::approve(&state.pool, id, &input.landlord_notes, input.max_budget).await?;

    match updated {
        Some(request) => {
            tracing::info!(
                request_id = %id,
                landlord_id = %user.profile_id,
                "Request approved"
            );
            Ok(Json(DataResponse { data: request }))
        }
        None => Err(explain_failed_transition(&state.pool, id, RequestStatus::InProgress).await),
    }
}

/// POST /requests/{id}/deny
///
/// Landlord denies a request: submitted -> cancelled.
pub async fn deny(
    RequireLandlord(user): RequireLandlord,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DenyRequest>,
) -> AppResult<impl IntoResponse> {
    let request = fetch_request(&state.pool, id).await?;
    ensure_landlord_owns(&state.pool, &request, user.profile_id).await?;

    let updated = RequestRepo::deny(&state.pool, id, input.landlord_notes.as_deref()).await?;

    match updated {
        Some(request) => {
            tracing::info!(
                request_id = %id,
                landlord_id = %user.profile_id,
                "Request denied"
            );
            Ok(Json(DataResponse { data: request }))
        }
        None => Err(explain_failed_transition(&state.pool, id, RequestStatus::Cancelled).await),
    }
}

/// POST /requests/{id}/complete
///
/// Agent records completion: in_progress -> completed, stamping the
/// actual cost and completion time.
pub async fn complete(
    RequireAgent(user): RequireAgent,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CompleteRequest>,
) -> AppResult<impl IntoResponse> {
    if input.actual_cost <= Decimal::ZERO {
        return Err(AppError::Core(CoreError::Validation(
            "Actual cost must be greater than zero".into(),
        )));
    }

    let updated = RequestRepo::complete(&state.pool, id, input.actual_cost).await?;

    match updated {
        Some(request) => {
            tracing::info!(
                request_id = %id,
                agent_id = %user.profile_id,
                actual_cost = %input.actual_cost,
                "Request completed"
            );
            Ok(Json(DataResponse { data: request }))
        }
        None => Err(explain_failed_transition(&state.pool, id, RequestStatus::Completed).await),
    }
}

/* --------------------------------------------------------------------------
Invoice download
-------------------------------------------------------------------------- */

/// GET /requests/{id}/invoice
///
/// Render the invoice for a completed, costed request as a plain-text
/// attachment. Nothing is persisted.
pub async fn invoice(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = fetch_request(&state.pool, id).await?;
    ensure_can_view(&state.pool, &request, &user).await?;

    let status = RequestStatus::parse(&request.status).map_err(AppError::Core)?;
    ensure_invoice_eligible(status, request.actual_cost).map_err(AppError::Core)?;
    // Eligibility guarantees a positive actual cost.
    let actual_cost = request.actual_cost.ok_or_else(|| {
        AppError::InternalError("Eligible request lost its actual cost".into())
    })?;

    let tenant = ProfileRepo::find_by_id(&state.pool, request.tenant_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: request.tenant_id,
            })
        })?;
    let property = PropertyRepo::find_by_id(&state.pool, request.property_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Property",
                id: request.property_id,
            })
        })?;
    let worker_name = match request.assigned_worker_id {
        Some(worker_id) => WorkerRepo::find_by_id(&state.pool, worker_id)
            .await?
            .map(|w| w.name),
        None => None,
    };

    let invoice = Invoice {
        request_id: request.id,
        title: request.title,
        category: request.category,
        tenant_name: tenant.full_name,
        property_address: property.address,
        worker_name,
        estimated_cost: request.estimated_cost,
        actual_cost,
        completed_at: request.completed_at,
        issued_at: Utc::now(),
    };

    tracing::info!(request_id = %id, profile_id = %user.profile_id, "Invoice downloaded");

    let headers = [
        (CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", invoice.filename()),
        ),
    ];
    Ok((headers, invoice.render()))
}
