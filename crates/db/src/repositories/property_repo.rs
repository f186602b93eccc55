//! Repository for the `properties` table.

use sqlx::PgPool;

use mendlet_core::types::DbId;

use crate::models::property::{CreateProperty, Property};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, address, property_type, units, rent_per_unit, status, \
                        landlord_id, created_at, updated_at";

/// Provides CRUD operations for properties.
pub struct PropertyRepo;

impl PropertyRepo {
    /// Insert a new property (created vacant), returning the created row.
    ///
    /// `landlord_id` is resolved by the handler: landlords register
    /// against themselves, agents name the landlord in the body.
    pub async fn create(
        pool: &PgPool,
        landlord_id: DbId,
        input: &CreateProperty,
    ) -> Result<Property, sqlx::Error> {
        let query = format!(
            "INSERT INTO properties (name, address, property_type, units, rent_per_unit, landlord_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(&input.property_type)
            .bind(input.units)
            .bind(input.rent_per_unit)
            .bind(landlord_id)
            .fetch_one(pool)
            .await
    }

    /// Find a property by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties WHERE id = $1");
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all properties, most recently registered first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties ORDER BY created_at DESC");
        sqlx::query_as::<_, Property>(&query).fetch_all(pool).await
    }

    /// List the properties owned by one landlord.
    pub async fn list_for_landlord(
        pool: &PgPool,
        landlord_id: DbId,
    ) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM properties
             WHERE landlord_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(landlord_id)
            .fetch_all(pool)
            .await
    }

    /// Set the occupancy status (`vacant` / `occupied`).
    ///
    /// Returns `true` if the row was updated.
    pub async fn set_status(pool: &PgPool, id: DbId, status: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE properties SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
