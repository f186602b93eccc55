//! Session entity model.
//!
//! One row per issued refresh token. Only the SHA-256 digest of the
//! token is stored; sign-out revokes every row for the profile so no
//! previously issued token remains usable.

use sqlx::FromRow;

use mendlet_core::types::{DbId, Timestamp};

/// A session row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub profile_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a session.
#[derive(Debug)]
pub struct CreateSession {
    pub profile_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
