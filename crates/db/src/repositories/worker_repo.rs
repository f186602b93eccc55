//! Repository for the `workers` table.

use sqlx::PgPool;

use mendlet_core::types::DbId;

use crate::models::worker::{CreateWorker, Worker};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, specialty, category, phone, rating, favorite, created_at, updated_at";

/// Provides roster operations for workers.
pub struct WorkerRepo;

impl WorkerRepo {
    /// Insert a new worker, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateWorker) -> Result<Worker, sqlx::Error> {
        let query = format!(
            "INSERT INTO workers (name, specialty, category, phone)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Worker>(&query)
            .bind(&input.name)
            .bind(&input.specialty)
            .bind(&input.category)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a worker by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Worker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workers WHERE id = $1");
        sqlx::query_as::<_, Worker>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the roster, favorites first, then by name. Optional trade
    /// category filter.
    pub async fn list(pool: &PgPool, category: Option<&str>) -> Result<Vec<Worker>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM workers
             WHERE ($1::text IS NULL OR category = $1)
             ORDER BY favorite DESC, name ASC"
        );
        sqlx::query_as::<_, Worker>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Mark or unmark a worker as a favorite.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_favorite(
        pool: &PgPool,
        id: DbId,
        favorite: bool,
    ) -> Result<Option<Worker>, sqlx::Error> {
        let query = format!(
            "UPDATE workers SET favorite = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Worker>(&query)
            .bind(id)
            .bind(favorite)
            .fetch_optional(pool)
            .await
    }

    /// Recompute the aggregate rating as the mean of all ratings for
    /// this worker, rounded to two places. Called after every rating
    /// upsert.
    pub async fn refresh_rating(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE workers SET rating = (
                SELECT ROUND(AVG(rating)::numeric, 2)
                FROM worker_ratings
                WHERE worker_id = $1
             )
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}
