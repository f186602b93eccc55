//! Handlers for the `/auth` resource (register, login, refresh, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use mendlet_core::error::CoreError;
use mendlet_core::roles::Role;
use mendlet_core::types::DbId;
use mendlet_db::models::profile::{CreateProfile, ProfileResponse};
use mendlet_db::models::session::CreateSession;
use mendlet_db::repositories::{ProfileRepo, SessionRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::synthetic_email;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

/// Username length bounds for new accounts.
const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// One of `tenant`, `agent`, `landlord`. Immutable after signup.
    pub role: String,
    pub full_name: String,
    pub phone: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by register, login, and
/// refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public profile info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub full_name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a profile with a fixed role and sign the caller in. The
/// email-shaped identity is synthesized from the username.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_username(&input.username)?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let role = Role::parse(&input.role).map_err(AppError::Core)?;

    if input.full_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Full name must not be empty".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // A duplicate username surfaces as a unique violation -> 409.
    let profile = ProfileRepo::create(
        &state.pool,
        &CreateProfile {
            username: input.username.clone(),
            email: synthetic_email(&input.username),
            password_hash,
            role: role.as_str().to_string(),
            full_name: input.full_name.trim().to_string(),
            phone: input.phone,
        },
    )
    .await?;

    tracing::info!(profile_id = %profile.id, role = %role, "Profile registered");

    let response = create_auth_response(
        &state,
        profile.id,
        &profile.username,
        &profile.email,
        &profile.full_name,
        role,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns access and refresh
/// tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Find profile by username.
    let profile = ProfileRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    // 2. Check if the account is active.
    if !profile.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    // 3. Check if the account is temporarily locked.
    if let Some(locked_until) = profile.locked_until {
        if locked_until > Utc::now() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Account is temporarily locked. Try again later.".into(),
            )));
        }
    }

    // 4. Verify password.
    let password_valid = verify_password(&input.password, &profile.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        // 5. On failure: increment counter, lock if threshold exceeded.
        ProfileRepo::increment_failed_login(&state.pool, profile.id).await?;

        let new_count = profile.failed_login_count + 1;
        if new_count >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            ProfileRepo::lock_account(&state.pool, profile.id, lock_until).await?;
        }

        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    // 6. On success: reset failed count, set last_login_at.
    ProfileRepo::record_successful_login(&state.pool, profile.id).await?;

    let role = Role::parse(&profile.role).map_err(AppError::Core)?;

    // 7. Generate tokens and create session.
    let response = create_auth_response(
        &state,
        profile.id,
        &profile.username,
        &profile.email,
        &profile.full_name,
        role,
    )
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Hash the provided refresh token.
    let token_hash = hash_refresh_token(&input.refresh_token);

    // 2. Find matching active session.
    let session = SessionRepo::find_active_by_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // 3. Revoke old session (token rotation).
    SessionRepo::revoke(&state.pool, session.id).await?;

    // 4. Find profile.
    let profile = ProfileRepo::find_by_id(&state.pool, session.profile_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Profile no longer exists".into()))
        })?;

    if !profile.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let role = Role::parse(&profile.role).map_err(AppError::Core)?;

    // 5. Generate new tokens and create new session.
    let response = create_auth_response(
        &state,
        profile.id,
        &profile.username,
        &profile.email,
        &profile.full_name,
        role,
    )
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated profile. After this no
/// token the client holds -- on any device -- remains usable. Returns
/// 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_profile(&state.pool, auth_user.profile_id).await?;
    tracing::info!(
        profile_id = %auth_user.profile_id,
        revoked,
        "Signed out, sessions revoked"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// The authenticated caller's profile.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<ProfileResponse>>> {
    let profile = ProfileRepo::find_by_id(&state.pool, auth_user.profile_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Profile no longer exists".into()))
        })?;
    Ok(Json(DataResponse {
        data: profile.into(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Username charset/length checks applied at signup.
fn validate_username(username: &str) -> AppResult<()> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Username must be {MIN_USERNAME_LENGTH}-{MAX_USERNAME_LENGTH} characters"
        ))));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(AppError::Core(CoreError::Validation(
            "Username may only contain letters, digits, '_', '-', and '.'".into(),
        )));
    }
    Ok(())
}

/// Generate access + refresh tokens, persist a session row, and build
/// the response.
async fn create_auth_response(
    state: &AppState,
    profile_id: DbId,
    username: &str,
    email: &str,
    full_name: &str,
    role: Role,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(profile_id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        profile_id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        user: UserInfo {
            id: profile_id,
            username: username.to_string(),
            email: email.to_string(),
            role: role.as_str().to_string(),
            full_name: full_name.to_string(),
        },
    })
}
