//! Worker-rating entity model.
//!
//! Uniqueness per (request, rater, rater_type) is a database constraint
//! (`uq_worker_ratings_request_rater`); writes go through an upsert so a
//! repeat submission overwrites rather than duplicates.

use serde::Serialize;
use sqlx::FromRow;

use mendlet_core::types::{DbId, Timestamp};

/// A rating row from the `worker_ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorkerRating {
    pub id: DbId,
    pub worker_id: DbId,
    pub maintenance_request_id: DbId,
    pub rater_id: DbId,
    pub rater_type: String,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// All fields of one rating submission, resolved by the handler.
#[derive(Debug)]
pub struct UpsertWorkerRating {
    pub worker_id: DbId,
    pub maintenance_request_id: DbId,
    pub rater_id: DbId,
    pub rater_type: String,
    pub rating: i16,
    pub comment: Option<String>,
}
