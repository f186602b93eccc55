//! Plain-text invoice formatting for completed maintenance requests.
//!
//! Formatting is pure and synchronous; nothing here touches the store.
//! Generated invoices are never persisted server-side -- the API layer
//! streams the rendered text straight to the caller as a download.

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::status::RequestStatus;
use crate::types::{DbId, Timestamp};

/// Fixed payment term carried on every invoice.
pub const PAYMENT_TERMS: &str = "Payment due within 30 days";

/// Number of trailing id characters used in the invoice number.
const INVOICE_ID_SUFFIX_LEN: usize = 8;

/// A request is invoiceable exactly when it is completed and carries a
/// positive actual cost.
pub fn is_invoice_eligible(status: RequestStatus, actual_cost: Option<Decimal>) -> bool {
    status == RequestStatus::Completed
        && actual_cost.is_some_and(|cost| cost > Decimal::ZERO)
}

/// Derive the invoice number from a request id: `INV-` plus the last 8
/// hex characters of the UUID, uppercased.
pub fn invoice_number(request_id: DbId) -> String {
    let id = request_id.to_string();
    let suffix: String = id
        .chars()
        .skip(id.chars().count() - INVOICE_ID_SUFFIX_LEN)
        .collect();
    format!("INV-{}", suffix.to_uppercase())
}

/// Everything needed to render one invoice, with foreign keys already
/// resolved to display names by the caller.
#[derive(Debug, Clone)]
pub struct Invoice {
    pub request_id: DbId,
    pub title: String,
    pub category: String,
    pub tenant_name: String,
    pub property_address: String,
    /// `None` renders as "Unassigned" (the request was completed without
    /// a rostered worker on file).
    pub worker_name: Option<String>,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Decimal,
    pub completed_at: Option<Timestamp>,
    pub issued_at: Timestamp,
}

impl Invoice {
    /// Render the fixed-layout plain-text document.
    pub fn render(&self) -> String {
        let rule = "=".repeat(44);
        let thin_rule = "-".repeat(44);
        let number = invoice_number(self.request_id);
        let worker = self.worker_name.as_deref().unwrap_or("Unassigned");
        let estimated = match self.estimated_cost {
            Some(cost) => format!("£{cost:.2}"),
            None => "N/A".to_string(),
        };
        let completed = match self.completed_at {
            Some(ts) => ts.format("%Y-%m-%d").to_string(),
            None => "N/A".to_string(),
        };

        let mut out = String::new();
        out.push_str(&rule);
        out.push('\n');
        out.push_str("            MAINTENANCE INVOICE\n");
        out.push_str(&rule);
        out.push_str("\n\n");
        out.push_str(&format!("Invoice Number : {number}\n"));
        out.push_str(&format!(
            "Issue Date     : {}\n",
            self.issued_at.format("%Y-%m-%d")
        ));
        out.push_str(&format!("Payment Terms  : {PAYMENT_TERMS}\n\n"));
        out.push_str(&format!("Property       : {}\n", self.property_address));
        out.push_str(&format!("Tenant         : {}\n", self.tenant_name));
        out.push_str(&format!("Worker         : {worker}\n\n"));
        out.push_str("Work Item\n");
        out.push_str(&thin_rule);
        out.push('\n');
        out.push_str(&format!("Title          : {}\n", self.title));
        out.push_str(&format!("Category       : {}\n", self.category));
        out.push_str(&format!("Completed      : {completed}\n\n"));
        out.push_str("Charges\n");
        out.push_str(&thin_rule);
        out.push('\n');
        out.push_str(&format!("Estimated Cost : {estimated}\n"));
        out.push_str(&format!("Actual Cost    : £{:.2}\n\n", self.actual_cost));
        out.push_str(&format!("Total Amount Due: £{:.2}\n\n", self.actual_cost));
        out.push_str(&rule);
        out.push('\n');
        out
    }

    /// Suggested download filename, e.g. `INV-1A2B3C4D.txt`.
    pub fn filename(&self) -> String {
        format!("{}.txt", invoice_number(self.request_id))
    }
}

/// Check eligibility, returning a conflict error suitable for the API
/// layer when the request cannot be invoiced.
pub fn ensure_invoice_eligible(
    status: RequestStatus,
    actual_cost: Option<Decimal>,
) -> Result<(), CoreError> {
    if is_invoice_eligible(status, actual_cost) {
        Ok(())
    } else {
        Err(CoreError::Conflict(
            "Request is not invoiceable: it must be completed with a positive actual cost"
                .to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;

    fn sample_invoice(id: Uuid) -> Invoice {
        Invoice {
            request_id: id,
            title: "Leaking kitchen tap".to_string(),
            category: "Plumbing".to_string(),
            tenant_name: "Alice Warren".to_string(),
            property_address: "12 High Street, London".to_string(),
            worker_name: Some("R. Patel".to_string()),
            estimated_cost: Some(Decimal::new(40000, 2)),
            actual_cost: Decimal::new(42000, 2),
            completed_at: Some(chrono::Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap()),
            issued_at: chrono::Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn invoice_number_uses_last_eight_id_chars_uppercased() {
        let id = Uuid::parse_str("b5e7a839-14c2-4d0e-9f01-3a4b5c6d7e8f").unwrap();
        assert_eq!(invoice_number(id), "INV-5C6D7E8F");
    }

    #[test]
    fn render_contains_total_due_line() {
        let id = Uuid::parse_str("b5e7a839-14c2-4d0e-9f01-3a4b5c6d7e8f").unwrap();
        let text = sample_invoice(id).render();
        assert!(text.contains("Invoice Number : INV-5C6D7E8F"));
        assert!(text.contains("Total Amount Due: £420.00"));
        assert!(text.contains(PAYMENT_TERMS));
        assert!(text.contains("Estimated Cost : £400.00"));
    }

    #[test]
    fn render_handles_missing_worker_and_estimate() {
        let id = Uuid::new_v4();
        let mut invoice = sample_invoice(id);
        invoice.worker_name = None;
        invoice.estimated_cost = None;
        let text = invoice.render();
        assert!(text.contains("Worker         : Unassigned"));
        assert!(text.contains("Estimated Cost : N/A"));
    }

    #[test]
    fn eligibility_requires_completed_and_positive_cost() {
        let cost = Some(Decimal::new(42000, 2));
        assert!(is_invoice_eligible(RequestStatus::Completed, cost));
        assert!(!is_invoice_eligible(RequestStatus::InProgress, cost));
        assert!(!is_invoice_eligible(RequestStatus::Submitted, cost));
        assert!(!is_invoice_eligible(RequestStatus::Cancelled, cost));
        assert!(!is_invoice_eligible(RequestStatus::Completed, None));
        assert!(!is_invoice_eligible(
            RequestStatus::Completed,
            Some(Decimal::ZERO)
        ));
        assert!(!is_invoice_eligible(
            RequestStatus::Completed,
            Some(Decimal::new(-100, 2))
        ));
    }

    #[test]
    fn ensure_eligibility_surfaces_conflict() {
        let err = ensure_invoice_eligible(RequestStatus::Submitted, None).unwrap_err();
        assert!(err.to_string().contains("not invoiceable"));
    }

    #[test]
    fn filename_matches_invoice_number() {
        let id = Uuid::parse_str("b5e7a839-14c2-4d0e-9f01-3a4b5c6d7e8f").unwrap();
        assert_eq!(sample_invoice(id).filename(), "INV-5C6D7E8F.txt");
    }
}
