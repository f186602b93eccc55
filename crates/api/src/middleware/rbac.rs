//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does
//! not meet the requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use mendlet_core::error::CoreError;
use mendlet_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `tenant` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn tenant_only(RequireTenant(user): RequireTenant) -> AppResult<Json<()>> {
///     // user is guaranteed to be a tenant here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireTenant(pub AuthUser);

impl FromRequestParts<AppState> for RequireTenant {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Tenant {
            return Err(AppError::Core(CoreError::Forbidden(
                "Tenant role required".into(),
            )));
        }
        Ok(RequireTenant(user))
    }
}

/// Requires the `agent` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAgent(pub AuthUser);

impl FromRequestParts<AppState> for RequireAgent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Agent {
            return Err(AppError::Core(CoreError::Forbidden(
                "Agent role required".into(),
            )));
        }
        Ok(RequireAgent(user))
    }
}

/// Requires the `landlord` role. Rejects with 403 Forbidden otherwise.
pub struct RequireLandlord(pub AuthUser);

impl FromRequestParts<AppState> for RequireLandlord {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Landlord {
            return Err(AppError::Core(CoreError::Forbidden(
                "Landlord role required".into(),
            )));
        }
        Ok(RequireLandlord(user))
    }
}
