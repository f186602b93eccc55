//! Profile entity model and DTOs.
//!
//! A profile is both the identity record (username, password hash, role)
//! and the person's directory entry (name, phone, lease). The role is
//! fixed at signup and CHECK-constrained to the values in
//! `mendlet_core::roles`.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mendlet_core::types::{DbId, Timestamp};

/// Full profile row from the `profiles` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`ProfileResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: DbId,
    pub username: String,
    /// Synthetic email-shaped identity: `<username>@mendlet.local`.
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub full_name: String,
    pub phone: Option<String>,
    /// The property a tenant currently leases. Always `NULL` for agents
    /// and landlords.
    pub property_id: Option<DbId>,
    pub is_active: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe profile representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub property_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        ProfileResponse {
            id: profile.id,
            username: profile.username,
            email: profile.email,
            role: profile.role,
            full_name: profile.full_name,
            phone: profile.phone,
            property_id: profile.property_id,
            created_at: profile.created_at,
        }
    }
}

/// DTO for creating a new profile. The password arrives already hashed.
#[derive(Debug)]
pub struct CreateProfile {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub full_name: String,
    pub phone: Option<String>,
}

/// DTO for updating contact details. Role and username are immutable.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}
