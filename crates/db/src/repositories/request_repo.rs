//! Repository for the `maintenance_requests` table.
//!
//! Lifecycle transitions are single guarded UPDATEs: the WHERE clause
//! pins both the row id and the expected current status. A `None` return
//! from a transition method therefore means "no row in the required
//! state" -- the handler distinguishes missing row from illegal
//! transition by re-reading. Two agents racing to assign the same
//! request resolve to exactly one winner.

use rust_decimal::Decimal;
use sqlx::PgPool;

use mendlet_core::status::{
    STATUS_CANCELLED, STATUS_COMPLETED, STATUS_IN_PROGRESS, STATUS_SUBMITTED,
};
use mendlet_core::types::DbId;

use crate::models::maintenance_request::{
    CreateMaintenanceRequest, MaintenanceRequest, RequestFilter,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, tenant_id, property_id, category, subcategory, title, description, \
                        room, photo_urls, priority, status, estimated_cost, actual_cost, \
                        max_budget, assigned_worker_id, agent_notes, landlord_notes, \
                        completed_at, created_at, updated_at";

/// Prefixed column list for queries joining other tables.
const PREFIXED_COLUMNS: &str =
    "r.id, r.tenant_id, r.property_id, r.category, r.subcategory, r.title, r.description, \
     r.room, r.photo_urls, r.priority, r.status, r.estimated_cost, r.actual_cost, \
     r.max_budget, r.assigned_worker_id, r.agent_notes, r.landlord_notes, \
     r.completed_at, r.created_at, r.updated_at";

/// Provides CRUD and lifecycle operations for maintenance requests.
pub struct RequestRepo;

impl RequestRepo {
    /// Insert a new request in the `submitted` state, returning the row.
    pub async fn create(
        pool: &PgPool,
        tenant_id: DbId,
        property_id: DbId,
        input: &CreateMaintenanceRequest,
    ) -> Result<MaintenanceRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO maintenance_requests
                (tenant_id, property_id, category, subcategory, title, description,
                 room, photo_urls, priority, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(tenant_id)
            .bind(property_id)
            .bind(&input.category)
            .bind(&input.subcategory)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.room)
            .bind(&input.photo_urls)
            .bind(&input.priority)
            .bind(STATUS_SUBMITTED)
            .fetch_one(pool)
            .await
    }

    /// Find a request by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_requests WHERE id = $1");
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one tenant's requests, newest first.
    pub async fn list_for_tenant(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Vec<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_requests
             WHERE tenant_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await
    }

    /// List all requests with optional status/priority filters
    /// (the agent triage view), newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &RequestFilter,
    ) -> Result<Vec<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_requests
             WHERE ($1::text IS NULL OR status = $1)
               AND ($2::text IS NULL OR priority = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(&filter.status)
            .bind(&filter.priority)
            .fetch_all(pool)
            .await
    }

    /// List requests on properties owned by one landlord, newest first.
    pub async fn list_for_landlord(
        pool: &PgPool,
        landlord_id: DbId,
    ) -> Result<Vec<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {PREFIXED_COLUMNS}
             FROM maintenance_requests r
             JOIN properties p ON p.id = r.property_id
             WHERE p.landlord_id = $1
             ORDER BY r.created_at DESC"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(landlord_id)
            .fetch_all(pool)
            .await
    }

    /// The invoice-eligible set for one landlord: completed requests with
    /// a positive actual cost, newest completion first.
    pub async fn list_invoice_eligible_for_landlord(
        pool: &PgPool,
        landlord_id: DbId,
    ) -> Result<Vec<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {PREFIXED_COLUMNS}
             FROM maintenance_requests r
             JOIN properties p ON p.id = r.property_id
             WHERE p.landlord_id = $1
               AND r.status = $2
               AND r.actual_cost > 0
             ORDER BY r.completed_at DESC"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(landlord_id)
            .bind(STATUS_COMPLETED)
            .fetch_all(pool)
            .await
    }

    /// Agent assigns a worker: `submitted` -> `in_progress`.
    ///
    /// Returns `None` when the row is absent or not in `submitted`.
    pub async fn assign(
        pool: &PgPool,
        id: DbId,
        worker_id: DbId,
        estimated_cost: Option<Decimal>,
        agent_notes: Option<&str>,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_requests SET
                status = $2,
                assigned_worker_id = $3,
                estimated_cost = COALESCE($4, estimated_cost),
                agent_notes = COALESCE($5, agent_notes)
             WHERE id = $1 AND status = $6
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .bind(STATUS_IN_PROGRESS)
            .bind(worker_id)
            .bind(estimated_cost)
            .bind(agent_notes)
            .bind(STATUS_SUBMITTED)
            .fetch_optional(pool)
            .await
    }

    /// Landlord approves spend: `submitted` -> `in_progress`, attaching
    /// notes and the (unenforced) budget cap.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        landlord_notes: &str,
        max_budget: Option<Decimal>,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_requests SET
                status = $2,
                landlord_notes = $3,
                max_budget = COALESCE($4, max_budget)
             WHERE id = $1 AND status = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .bind(STATUS_IN_PROGRESS)
            .bind(landlord_notes)
            .bind(max_budget)
            .bind(STATUS_SUBMITTED)
            .fetch_optional(pool)
            .await
    }

    /// Landlord denies a request: `submitted` -> `cancelled`.
    pub async fn deny(
        pool: &PgPool,
        id: DbId,
        landlord_notes: Option<&str>,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_requests SET
                status = $2,
                landlord_notes = COALESCE($3, landlord_notes)
             WHERE id = $1 AND status = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .bind(STATUS_CANCELLED)
            .bind(landlord_notes)
            .bind(STATUS_SUBMITTED)
            .fetch_optional(pool)
            .await
    }

    /// Agent records completion: `in_progress` -> `completed`, stamping
    /// `completed_at` and the actual cost.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        actual_cost: Decimal,
    ) -> Result<Option<MaintenanceRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_requests SET
                status = $2,
                actual_cost = $3,
                completed_at = NOW()
             WHERE id = $1 AND status = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRequest>(&query)
            .bind(id)
            .bind(STATUS_COMPLETED)
            .bind(actual_cost)
            .bind(STATUS_IN_PROGRESS)
            .fetch_optional(pool)
            .await
    }
}
