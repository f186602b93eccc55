//! Repository for the `worker_ratings` table.

use sqlx::PgPool;

use mendlet_core::types::DbId;

use crate::models::worker_rating::{UpsertWorkerRating, WorkerRating};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, worker_id, maintenance_request_id, rater_id, rater_type, rating, \
                        comment, created_at, updated_at";

/// Provides upsert and read operations for worker ratings.
pub struct RatingRepo;

impl RatingRepo {
    /// Insert a rating, or overwrite the existing one for the same
    /// (request, rater, rater_type) key. Exactly one row survives a
    /// repeat submission; the latest values win.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertWorkerRating,
    ) -> Result<WorkerRating, sqlx::Error> {
        let query = format!(
            "INSERT INTO worker_ratings
                (worker_id, maintenance_request_id, rater_id, rater_type, rating, comment)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT ON CONSTRAINT uq_worker_ratings_request_rater
             DO UPDATE SET
                worker_id = EXCLUDED.worker_id,
                rating = EXCLUDED.rating,
                comment = EXCLUDED.comment,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkerRating>(&query)
            .bind(input.worker_id)
            .bind(input.maintenance_request_id)
            .bind(input.rater_id)
            .bind(&input.rater_type)
            .bind(input.rating)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Find the rating for one (request, rater, rater_type) key.
    pub async fn find_for_request(
        pool: &PgPool,
        request_id: DbId,
        rater_id: DbId,
        rater_type: &str,
    ) -> Result<Option<WorkerRating>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM worker_ratings
             WHERE maintenance_request_id = $1 AND rater_id = $2 AND rater_type = $3"
        );
        sqlx::query_as::<_, WorkerRating>(&query)
            .bind(request_id)
            .bind(rater_id)
            .bind(rater_type)
            .fetch_optional(pool)
            .await
    }

    /// List all ratings received by a worker, newest first.
    pub async fn list_for_worker(
        pool: &PgPool,
        worker_id: DbId,
    ) -> Result<Vec<WorkerRating>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM worker_ratings
             WHERE worker_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, WorkerRating>(&query)
            .bind(worker_id)
            .fetch_all(pool)
            .await
    }
}
