//! Maintenance-request lifecycle: status and priority domains, and the
//! transition table.
//!
//! Statuses are stored as CHECK-constrained TEXT in the
//! `maintenance_requests` table; the repository performs each transition
//! as a single guarded UPDATE so concurrent actors resolve to exactly
//! one winner. This module owns the question of *which* transitions are
//! legal; the repository owns making them atomic.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STATUS_SUBMITTED: &str = "submitted";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_CANCELLED: &str = "cancelled";

/// All valid status strings, in lifecycle order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_SUBMITTED,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED,
    STATUS_CANCELLED,
];

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";
pub const PRIORITY_URGENT: &str = "urgent";

/// All valid priority strings, lowest first.
pub const VALID_PRIORITIES: &[&str] =
    &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH, PRIORITY_URGENT];

/// Lifecycle status of a maintenance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Submitted,
    InProgress,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Submitted => STATUS_SUBMITTED,
            RequestStatus::InProgress => STATUS_IN_PROGRESS,
            RequestStatus::Completed => STATUS_COMPLETED,
            RequestStatus::Cancelled => STATUS_CANCELLED,
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_SUBMITTED => Ok(RequestStatus::Submitted),
            STATUS_IN_PROGRESS => Ok(RequestStatus::InProgress),
            STATUS_COMPLETED => Ok(RequestStatus::Completed),
            STATUS_CANCELLED => Ok(RequestStatus::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// Completed and cancelled requests accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Cancelled)
    }

    /// The statuses reachable from `self` in one step.
    ///
    /// - Submitted  -> InProgress (agent assigns, or landlord approves)
    /// - Submitted  -> Cancelled  (landlord denies)
    /// - InProgress -> Completed  (agent records completion)
    pub fn allowed_transitions(self) -> &'static [RequestStatus] {
        match self {
            RequestStatus::Submitted => {
                &[RequestStatus::InProgress, RequestStatus::Cancelled]
            }
            RequestStatus::InProgress => &[RequestStatus::Completed],
            RequestStatus::Completed | RequestStatus::Cancelled => &[],
        }
    }

    /// Check a single transition, with a descriptive error on rejection.
    pub fn validate_transition(self, to: RequestStatus) -> Result<(), CoreError> {
        if self.allowed_transitions().contains(&to) {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Cannot move request from '{}' to '{}'",
                self.as_str(),
                to.as_str()
            )))
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a maintenance request, chosen by the tenant at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => PRIORITY_LOW,
            Priority::Medium => PRIORITY_MEDIUM,
            Priority::High => PRIORITY_HIGH,
            Priority::Urgent => PRIORITY_URGENT,
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            PRIORITY_LOW => Ok(Priority::Low),
            PRIORITY_MEDIUM => Ok(Priority::Medium),
            PRIORITY_HIGH => Ok(Priority::High),
            PRIORITY_URGENT => Ok(Priority::Urgent),
            other => Err(CoreError::Validation(format!(
                "Invalid priority '{other}'. Must be one of: {}",
                VALID_PRIORITIES.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
