//! Repository for the `profiles` table.

use sqlx::PgPool;

use mendlet_core::roles::ROLE_TENANT;
use mendlet_core::types::{DbId, Timestamp};

use crate::models::profile::{CreateProfile, Profile, UpdateProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, role, full_name, phone, \
                        property_id, is_active, failed_login_count, locked_until, \
                        last_login_at, created_at, updated_at";

/// Provides CRUD and tenancy operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (username, email, password_hash, role, full_name, phone)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.full_name)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a profile by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE username = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// The active tenant leasing a property, if any.
    pub async fn find_tenant_of_property(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles
             WHERE property_id = $1 AND role = $2"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(property_id)
            .bind(ROLE_TENANT)
            .fetch_optional(pool)
            .await
    }

    /// Update contact details. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProfile,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET
                full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.phone)
            .fetch_optional(pool)
            .await
    }

    /// Lease a property to a tenant profile.
    ///
    /// The partial unique index on `(property_id) WHERE role = 'tenant'`
    /// makes a second active lease a unique violation, surfaced to the
    /// caller as a conflict.
    pub async fn assign_property(
        pool: &PgPool,
        tenant_id: DbId,
        property_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET property_id = $2
             WHERE id = $1 AND role = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(tenant_id)
            .bind(property_id)
            .bind(ROLE_TENANT)
            .fetch_optional(pool)
            .await
    }

    /// End a tenant's lease. Returns `true` if a lease was cleared.
    pub async fn clear_property(pool: &PgPool, tenant_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE profiles SET property_id = NULL WHERE id = $1 AND property_id IS NOT NULL")
                .bind(tenant_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Increment the failed login counter by 1.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE profiles SET failed_login_count = failed_login_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Lock a profile until the specified timestamp.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE profiles SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset `failed_login_count` to 0, clear
    /// `locked_until`, and set `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE profiles SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
