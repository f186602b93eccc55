//! Maintenance-request entity model and DTOs.
//!
//! The central entity of the platform. `status` and `priority` are
//! CHECK-constrained TEXT columns whose values come from
//! `mendlet_core::status`; every status change goes through a guarded
//! transition method on `RequestRepo`, never a plain field write.
//! Requests are never hard-deleted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use mendlet_core::types::{DbId, Timestamp};

/// A maintenance request row from the `maintenance_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaintenanceRequest {
    pub id: DbId,
    pub tenant_id: DbId,
    pub property_id: DbId,
    pub category: String,
    pub subcategory: Option<String>,
    pub title: String,
    pub description: String,
    pub room: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    pub priority: String,
    pub status: String,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
    /// Collected from the landlord at approval; stored but not enforced.
    pub max_budget: Option<Decimal>,
    pub assigned_worker_id: Option<DbId>,
    pub agent_notes: Option<String>,
    pub landlord_notes: Option<String>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for a tenant submitting a request. The tenant and property are
/// resolved from the authenticated session, not the body.
#[derive(Debug, Deserialize)]
pub struct CreateMaintenanceRequest {
    pub category: String,
    pub subcategory: Option<String>,
    pub title: String,
    pub description: String,
    pub room: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    pub priority: String,
}

/// Body for the agent's assign transition (submitted -> in_progress).
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub worker_id: DbId,
    pub estimated_cost: Option<Decimal>,
    pub agent_notes: Option<String>,
}

/// Body for the landlord's approve transition (submitted -> in_progress).
#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub landlord_notes: String,
    pub max_budget: Option<Decimal>,
}

/// Body for the landlord's deny transition (submitted -> cancelled).
#[derive(Debug, Deserialize)]
pub struct DenyRequest {
    pub landlord_notes: Option<String>,
}

/// Body for the agent's complete transition (in_progress -> completed).
#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub actual_cost: Decimal,
}

/// Optional filters for the agent's request listing.
#[derive(Debug, Default, Deserialize)]
pub struct RequestFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
}
