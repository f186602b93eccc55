//! Property entity model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mendlet_core::types::{DbId, Timestamp};

/// A property with no active tenant.
pub const PROPERTY_VACANT: &str = "vacant";
/// A property with an active lease.
pub const PROPERTY_OCCUPIED: &str = "occupied";

/// A property row from the `properties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub property_type: String,
    pub units: i32,
    pub rent_per_unit: Decimal,
    /// Occupancy status: `vacant` or `occupied`. Flipped by the lease
    /// endpoints, never set directly by clients.
    pub status: String,
    pub landlord_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a property.
///
/// `landlord_id` is optional in the request body: landlords register
/// properties against themselves, agents must name the landlord.
#[derive(Debug, Deserialize)]
pub struct CreateProperty {
    pub name: String,
    pub address: String,
    pub property_type: String,
    pub units: i32,
    pub rent_per_unit: Decimal,
    pub landlord_id: Option<DbId>,
}
