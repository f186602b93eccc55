//! Integration tests for worker-rating upserts and the aggregate.

mod common;

use assert_matches::assert_matches;
use rust_decimal::Decimal;
use sqlx::PgPool;

use mendlet_db::models::worker_rating::UpsertWorkerRating;
use mendlet_db::repositories::{RatingRepo, WorkerRepo};

use common::{new_request, new_worker, tenancy_fixture};

fn rating_input(
    worker_id: uuid::Uuid,
    request_id: uuid::Uuid,
    rater_id: uuid::Uuid,
    rater_type: &str,
    rating: i16,
    comment: Option<&str>,
) -> UpsertWorkerRating {
    UpsertWorkerRating {
        worker_id,
        maintenance_request_id: request_id,
        rater_id,
        rater_type: rater_type.to_string(),
        rating,
        comment: comment.map(str::to_string),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeat_submission_overwrites_not_duplicates(pool: PgPool) {
    let (tenant, _, property) = tenancy_fixture(&pool).await;
    let worker = new_worker(&pool, "R. Patel", "plumbing").await;
    let request = new_request(&pool, tenant.id, property.id, "Plumbing", "high").await;

    let first = RatingRepo::upsert(
        &pool,
        &rating_input(worker.id, request.id, tenant.id, "tenant", 3, Some("ok")),
    )
    .await
    .expect("first upsert should succeed");

    let second = RatingRepo::upsert(
        &pool,
        &rating_input(worker.id, request.id, tenant.id, "tenant", 5, Some("great")),
    )
    .await
    .expect("second upsert should succeed");

    // Same row, latest values.
    assert_eq!(first.id, second.id);
    assert_eq!(second.rating, 5);
    assert_eq!(second.comment.as_deref(), Some("great"));

    let all = RatingRepo::list_for_worker(&pool, worker.id)
        .await
        .expect("listing should succeed");
    assert_eq!(all.len(), 1, "exactly one stored rating row");
    assert_eq!(all[0].rating, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tenant_and_landlord_ratings_coexist(pool: PgPool) {
    let (tenant, landlord, property) = tenancy_fixture(&pool).await;
    let worker = new_worker(&pool, "R. Patel", "plumbing").await;
    let request = new_request(&pool, tenant.id, property.id, "Plumbing", "high").await;

    RatingRepo::upsert(
        &pool,
        &rating_input(worker.id, request.id, tenant.id, "tenant", 4, None),
    )
    .await
    .expect("tenant rating should succeed");
    RatingRepo::upsert(
        &pool,
        &rating_input(worker.id, request.id, landlord.id, "landlord", 2, None),
    )
    .await
    .expect("landlord rating should succeed");

    let all = RatingRepo::list_for_worker(&pool, worker.id)
        .await
        .expect("listing should succeed");
    assert_eq!(all.len(), 2);

    let found = RatingRepo::find_for_request(&pool, request.id, landlord.id, "landlord")
        .await
        .expect("lookup should succeed")
        .expect("landlord rating should exist");
    assert_eq!(found.rating, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn store_rejects_unknown_rater_type(pool: PgPool) {
    let (tenant, _, property) = tenancy_fixture(&pool).await;
    let agent = common::new_profile(&pool, "a_staff", "agent").await;
    let worker = new_worker(&pool, "R. Patel", "plumbing").await;
    let request = new_request(&pool, tenant.id, property.id, "Plumbing", "high").await;

    // rater_type is CHECK-constrained to tenant/landlord.
    let result = RatingRepo::upsert(
        &pool,
        &rating_input(worker.id, request.id, agent.id, "agent", 4, None),
    )
    .await;

    assert_matches!(result, Err(sqlx::Error::Database(ref db_err)) => {
        assert_eq!(db_err.code().as_deref(), Some("23514"));
    });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn aggregate_is_mean_of_current_rows(pool: PgPool) {
    let (tenant, landlord, property) = tenancy_fixture(&pool).await;
    let worker = new_worker(&pool, "R. Patel", "plumbing").await;
    let request = new_request(&pool, tenant.id, property.id, "Plumbing", "high").await;

    RatingRepo::upsert(
        &pool,
        &rating_input(worker.id, request.id, tenant.id, "tenant", 5, None),
    )
    .await
    .expect("tenant rating should succeed");
    WorkerRepo::refresh_rating(&pool, worker.id)
        .await
        .expect("refresh should succeed");

    RatingRepo::upsert(
        &pool,
        &rating_input(worker.id, request.id, landlord.id, "landlord", 2, None),
    )
    .await
    .expect("landlord rating should succeed");
    WorkerRepo::refresh_rating(&pool, worker.id)
        .await
        .expect("refresh should succeed");

    let refreshed = WorkerRepo::find_by_id(&pool, worker.id)
        .await
        .expect("find should succeed")
        .expect("worker should exist");
    assert_eq!(refreshed.rating, Some(Decimal::new(350, 2)), "(5 + 2) / 2 = 3.50");

    // Overwriting a rating moves the mean, it does not add a sample.
    RatingRepo::upsert(
        &pool,
        &rating_input(worker.id, request.id, landlord.id, "landlord", 4, None),
    )
    .await
    .expect("overwrite should succeed");
    WorkerRepo::refresh_rating(&pool, worker.id)
        .await
        .expect("refresh should succeed");

    let after = WorkerRepo::find_by_id(&pool, worker.id)
        .await
        .expect("find should succeed")
        .expect("worker should exist");
    assert_eq!(after.rating, Some(Decimal::new(450, 2)), "(5 + 4) / 2 = 4.50");
}
