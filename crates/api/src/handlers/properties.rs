//! Handlers for the `/properties` resource and tenancy assignment.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;

use mendlet_core::error::CoreError;
use mendlet_core::roles::Role;
use mendlet_core::types::DbId;
use mendlet_db::models::property::{CreateProperty, Property, PROPERTY_OCCUPIED, PROPERTY_VACANT};
use mendlet_db::repositories::{ProfileRepo, PropertyRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAgent;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /properties/{id}/tenant`.
#[derive(Debug, Deserialize)]
pub struct LeaseRequest {
    pub tenant_id: DbId,
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Fetch a property or return 404.
async fn fetch_property(pool: &sqlx::PgPool, id: DbId) -> AppResult<Property> {
    PropertyRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Property",
            id,
        })
    })
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// POST /properties
///
/// Register a property. Landlords register against themselves; agents
/// must name the landlord in the body.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProperty>,
) -> AppResult<impl IntoResponse> {
    if !user.role.can_create_properties() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Agent or Landlord role required".into(),
        )));
    }
    if input.name.trim().is_empty() || input.address.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name and address must not be empty".into(),
        )));
    }
    if input.units <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Units must be at least 1".into(),
        )));
    }
    if input.rent_per_unit < Decimal::ZERO {
        return Err(AppError::Core(CoreError::Validation(
            "Rent must not be negative".into(),
        )));
    }

    let landlord_id = match user.role {
        Role::Landlord => {
            // Landlords own what they register; a mismatched body id is
            // rejected rather than silently corrected.
            if input.landlord_id.is_some_and(|id| id != user.profile_id) {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Landlords can only register their own properties".into(),
                )));
            }
            user.profile_id
        }
        _ => {
            let named = input.landlord_id.ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "landlord_id is required when an agent registers a property".into(),
                ))
            })?;
            let owner = ProfileRepo::find_by_id(&state.pool, named)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::NotFound {
                        entity: "Profile",
                        id: named,
                    })
                })?;
            if Role::parse(&owner.role).map_err(AppError::Core)? != Role::Landlord {
                return Err(AppError::Core(CoreError::Validation(
                    "Named profile is not a landlord".into(),
                )));
            }
            named
        }
    };

    let property = PropertyRepo::create(&state.pool, landlord_id, &input).await?;

    tracing::info!(
        property_id = %property.id,
        landlord_id = %landlord_id,
        created_by = %user.profile_id,
        "Property registered"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: property })))
}

/// GET /properties
///
/// Agents see the whole portfolio; landlords see their own.
pub async fn list(user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let properties = match user.role {
        Role::Agent => PropertyRepo::list(&state.pool).await?,
        Role::Landlord => PropertyRepo::list_for_landlord(&state.pool, user.profile_id).await?,
        Role::Tenant => {
            return Err(AppError::Core(CoreError::Forbidden(
                "Agent or Landlord role required".into(),
            )))
        }
    };
    Ok(Json(DataResponse { data: properties }))
}

/// GET /properties/{id}
///
/// Visible to agents, the owning landlord, and the leased tenant.
pub async fn get(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let property = fetch_property(&state.pool, id).await?;

    match user.role {
        Role::Agent => {}
        Role::Landlord => {
            if property.landlord_id != user.profile_id {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Not one of your properties".into(),
                )));
            }
        }
        Role::Tenant => {
            let profile = ProfileRepo::find_by_id(&state.pool, user.profile_id)
                .await?
                .ok_or_else(|| {
                    AppError::Core(CoreError::Unauthorized("Profile no longer exists".into()))
                })?;
            if profile.property_id != Some(id) {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Not your leased property".into(),
                )));
            }
        }
    }

    Ok(Json(DataResponse { data: property }))
}

/// PUT /properties/{id}/tenant
///
/// Lease a tenant to a property. The partial unique index makes a second
/// active lease a 409; on success the property flips to `occupied`.
pub async fn lease(
    RequireAgent(user): RequireAgent,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<LeaseRequest>,
) -> AppResult<impl IntoResponse> {
    fetch_property(&state.pool, id).await?;

    let tenant = ProfileRepo::find_by_id(&state.pool, input.tenant_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: input.tenant_id,
            })
        })?;
    if Role::parse(&tenant.role).map_err(AppError::Core)? != Role::Tenant {
        return Err(AppError::Core(CoreError::Validation(
            "Named profile is not a tenant".into(),
        )));
    }
    if tenant.property_id.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Tenant already holds a lease".into(),
        )));
    }

    let leased = ProfileRepo::assign_property(&state.pool, input.tenant_id, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Profile",
                id: input.tenant_id,
            })
        })?;
    PropertyRepo::set_status(&state.pool, id, PROPERTY_OCCUPIED).await?;

    tracing::info!(
        property_id = %id,
        tenant_id = %input.tenant_id,
        agent_id = %user.profile_id,
        "Tenant leased to property"
    );

    Ok(Json(DataResponse {
        data: mendlet_db::models::profile::ProfileResponse::from(leased),
    }))
}

/// DELETE /properties/{id}/tenant
///
/// End the active lease, if any, and mark the property vacant.
pub async fn end_lease(
    RequireAgent(user): RequireAgent,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    fetch_property(&state.pool, id).await?;

    let occupant = ProfileRepo::find_tenant_of_property(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Property has no active tenant".into()))
        })?;

    ProfileRepo::clear_property(&state.pool, occupant.id).await?;
    PropertyRepo::set_status(&state.pool, id, PROPERTY_VACANT).await?;

    tracing::info!(
        property_id = %id,
        tenant_id = %occupant.id,
        agent_id = %user.profile_id,
        "Lease ended"
    );

    Ok(StatusCode::NO_CONTENT)
}
