//! Worker roster entity model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mendlet_core::types::{DbId, Timestamp};

/// A worker row from the `workers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Worker {
    pub id: DbId,
    pub name: String,
    pub specialty: String,
    pub category: String,
    pub phone: Option<String>,
    /// Mean of this worker's ratings, recomputed after every rating
    /// upsert. `None` until the first rating lands.
    pub rating: Option<Decimal>,
    pub favorite: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a worker to the roster.
#[derive(Debug, Deserialize)]
pub struct CreateWorker {
    pub name: String,
    pub specialty: String,
    pub category: String,
    pub phone: Option<String>,
}
