//! Integration tests for the maintenance-request lifecycle.
//!
//! Exercises the guarded transitions against a real database:
//! - submit -> assign/approve -> complete happy paths
//! - invalid transitions leave the row unchanged
//! - racing writers resolve to exactly one winner
//! - the invoice-eligible set

mod common;

use rust_decimal::Decimal;
use sqlx::PgPool;

use mendlet_core::status::{
    STATUS_CANCELLED, STATUS_COMPLETED, STATUS_IN_PROGRESS, STATUS_SUBMITTED,
};
use mendlet_db::repositories::RequestRepo;

use common::{new_request, new_worker, tenancy_fixture};

#[sqlx::test(migrations = "../../db/migrations")]
async fn submit_creates_submitted_request(pool: PgPool) {
    let (tenant, _, property) = tenancy_fixture(&pool).await;

    let request = new_request(&pool, tenant.id, property.id, "Plumbing", "urgent").await;

    assert_eq!(request.status, STATUS_SUBMITTED);
    assert_eq!(request.priority, "urgent");
    assert_eq!(request.category, "Plumbing");
    assert!(request.assigned_worker_id.is_none());
    assert!(request.completed_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approve_moves_to_in_progress_with_notes(pool: PgPool) {
    let (tenant, _, property) = tenancy_fixture(&pool).await;
    let request = new_request(&pool, tenant.id, property.id, "Plumbing", "urgent").await;

    let approved = RequestRepo::approve(&pool, request.id, "proceed", None)
        .await
        .expect("approve query should succeed")
        .expect("submitted request should be approvable");

    assert_eq!(approved.status, STATUS_IN_PROGRESS);
    assert_eq!(approved.landlord_notes.as_deref(), Some("proceed"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assign_sets_worker_and_estimate(pool: PgPool) {
    let (tenant, _, property) = tenancy_fixture(&pool).await;
    let worker = new_worker(&pool, "R. Patel", "plumbing").await;
    let request = new_request(&pool, tenant.id, property.id, "Plumbing", "high").await;

    let estimate = Decimal::new(40000, 2);
    let assigned = RequestRepo::assign(&pool, request.id, worker.id, Some(estimate), Some("book asap"))
        .await
        .expect("assign query should succeed")
        .expect("submitted request should be assignable");

    assert_eq!(assigned.status, STATUS_IN_PROGRESS);
    assert_eq!(assigned.assigned_worker_id, Some(worker.id));
    assert_eq!(assigned.estimated_cost, Some(estimate));
    assert_eq!(assigned.agent_notes.as_deref(), Some("book asap"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_assign_loses_the_race(pool: PgPool) {
    let (tenant, _, property) = tenancy_fixture(&pool).await;
    let worker_a = new_worker(&pool, "A", "plumbing").await;
    let worker_b = new_worker(&pool, "B", "plumbing").await;
    let request = new_request(&pool, tenant.id, property.id, "Plumbing", "medium").await;

    let first = RequestRepo::assign(&pool, request.id, worker_a.id, None, None)
        .await
        .expect("assign query should succeed");
    assert!(first.is_some(), "first assign wins");

    let second = RequestRepo::assign(&pool, request.id, worker_b.id, None, None)
        .await
        .expect("assign query should succeed");
    assert!(second.is_none(), "second assign must observe no row");

    // The winner's assignment stands.
    let row = RequestRepo::find_by_id(&pool, request.id)
        .await
        .expect("find should succeed")
        .expect("row should exist");
    assert_eq!(row.assigned_worker_id, Some(worker_a.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn complete_requires_in_progress(pool: PgPool) {
    let (tenant, _, property) = tenancy_fixture(&pool).await;
    let request = new_request(&pool, tenant.id, property.id, "Electrics", "low").await;

    // Straight from submitted: rejected.
    let premature = RequestRepo::complete(&pool, request.id, Decimal::new(42000, 2))
        .await
        .expect("complete query should succeed");
    assert!(premature.is_none());

    let row = RequestRepo::find_by_id(&pool, request.id)
        .await
        .expect("find should succeed")
        .expect("row should exist");
    assert_eq!(row.status, STATUS_SUBMITTED, "row must be unchanged");
    assert!(row.actual_cost.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn complete_stamps_cost_and_timestamp(pool: PgPool) {
    let (tenant, _, property) = tenancy_fixture(&pool).await;
    let worker = new_worker(&pool, "R. Patel", "electrics").await;
    let request = new_request(&pool, tenant.id, property.id, "Electrics", "high").await;

    RequestRepo::assign(&pool, request.id, worker.id, None, None)
        .await
        .expect("assign query should succeed")
        .expect("assign should win");

    let cost = Decimal::new(42000, 2);
    let completed = RequestRepo::complete(&pool, request.id, cost)
        .await
        .expect("complete query should succeed")
        .expect("in-progress request should complete");

    assert_eq!(completed.status, STATUS_COMPLETED);
    assert_eq!(completed.actual_cost, Some(cost));
    assert!(completed.completed_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deny_cancels_submitted_only(pool: PgPool) {
    let (tenant, _, property) = tenancy_fixture(&pool).await;
    let worker = new_worker(&pool, "R. Patel", "plumbing").await;

    let denied_req = new_request(&pool, tenant.id, property.id, "Plumbing", "low").await;
    let denied = RequestRepo::deny(&pool, denied_req.id, Some("not worth the spend"))
        .await
        .expect("deny query should succeed")
        .expect("submitted request should be deniable");
    assert_eq!(denied.status, STATUS_CANCELLED);
    assert_eq!(denied.landlord_notes.as_deref(), Some("not worth the spend"));

    // Once assigned, denial is no longer possible.
    let live_req = new_request(&pool, tenant.id, property.id, "Plumbing", "low").await;
    RequestRepo::assign(&pool, live_req.id, worker.id, None, None)
        .await
        .expect("assign query should succeed")
        .expect("assign should win");
    let late_deny = RequestRepo::deny(&pool, live_req.id, None)
        .await
        .expect("deny query should succeed");
    assert!(late_deny.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn terminal_states_reject_further_transitions(pool: PgPool) {
    let (tenant, _, property) = tenancy_fixture(&pool).await;
    let worker = new_worker(&pool, "R. Patel", "plumbing").await;
    let request = new_request(&pool, tenant.id, property.id, "Plumbing", "urgent").await;

    RequestRepo::assign(&pool, request.id, worker.id, None, None)
        .await
        .expect("assign query should succeed")
        .expect("assign should win");
    RequestRepo::complete(&pool, request.id, Decimal::new(10000, 2))
        .await
        .expect("complete query should succeed")
        .expect("complete should win");

    assert!(RequestRepo::assign(&pool, request.id, worker.id, None, None)
        .await
        .expect("assign query should succeed")
        .is_none());
    assert!(RequestRepo::approve(&pool, request.id, "too late", None)
        .await
        .expect("approve query should succeed")
        .is_none());
    assert!(RequestRepo::deny(&pool, request.id, None)
        .await
        .expect("deny query should succeed")
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invoice_eligible_set_is_completed_and_costed_only(pool: PgPool) {
    let (tenant, landlord, property) = tenancy_fixture(&pool).await;
    let worker = new_worker(&pool, "R. Patel", "plumbing").await;

    // Still submitted: not eligible.
    let _submitted = new_request(&pool, tenant.id, property.id, "Plumbing", "low").await;

    // In progress: not eligible.
    let in_progress = new_request(&pool, tenant.id, property.id, "Plumbing", "medium").await;
    RequestRepo::assign(&pool, in_progress.id, worker.id, None, None)
        .await
        .expect("assign query should succeed")
        .expect("assign should win");

    // Completed with positive cost: eligible.
    let billable = new_request(&pool, tenant.id, property.id, "Plumbing", "urgent").await;
    RequestRepo::assign(&pool, billable.id, worker.id, None, None)
        .await
        .expect("assign query should succeed")
        .expect("assign should win");
    RequestRepo::complete(&pool, billable.id, Decimal::new(42000, 2))
        .await
        .expect("complete query should succeed")
        .expect("complete should win");

    let eligible = RequestRepo::list_invoice_eligible_for_landlord(&pool, landlord.id)
        .await
        .expect("listing should succeed");

    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].id, billable.id);
    assert_eq!(eligible[0].actual_cost, Some(Decimal::new(42000, 2)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn role_views_are_scoped(pool: PgPool) {
    let (tenant, landlord, property) = tenancy_fixture(&pool).await;
    let request = new_request(&pool, tenant.id, property.id, "Heating", "high").await;

    let tenant_view = RequestRepo::list_for_tenant(&pool, tenant.id)
        .await
        .expect("tenant listing should succeed");
    assert_eq!(tenant_view.len(), 1);
    assert_eq!(tenant_view[0].id, request.id);

    let landlord_view = RequestRepo::list_for_landlord(&pool, landlord.id)
        .await
        .expect("landlord listing should succeed");
    assert_eq!(landlord_view.len(), 1);

    // A landlord with no properties sees nothing.
    let other = common::new_profile(&pool, "l_other", "landlord").await;
    let empty = RequestRepo::list_for_landlord(&pool, other.id)
        .await
        .expect("landlord listing should succeed");
    assert!(empty.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn agent_filter_narrows_by_status_and_priority(pool: PgPool) {
    let (tenant, _, property) = tenancy_fixture(&pool).await;
    let _low = new_request(&pool, tenant.id, property.id, "Plumbing", "low").await;
    let urgent = new_request(&pool, tenant.id, property.id, "Plumbing", "urgent").await;

    let filter = mendlet_db::models::maintenance_request::RequestFilter {
        status: Some(STATUS_SUBMITTED.to_string()),
        priority: Some("urgent".to_string()),
    };
    let matching = RequestRepo::list(&pool, &filter)
        .await
        .expect("filtered listing should succeed");
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].id, urgent.id);

    let all = RequestRepo::list(&pool, &Default::default())
        .await
        .expect("unfiltered listing should succeed");
    assert_eq!(all.len(), 2);
}
