//! Route definitions for the request role views and lifecycle.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{ratings, requests};
use crate::state::AppState;

/// The three parallel role surfaces, mounted at the API root.
///
/// ```text
/// GET  /tenant/requests     -> tenant_list
/// POST /tenant/requests     -> submit
/// GET  /agent/requests      -> agent_list      (?status, ?priority)
/// GET  /landlord/requests   -> landlord_list
/// GET  /landlord/invoices   -> landlord_invoices
/// ```
pub fn role_views_router() -> Router<AppState> {
    Router::new()
        .route(
            "/tenant/requests",
            get(requests::tenant_list).post(requests::submit),
        )
        .route("/agent/requests", get(requests::agent_list))
        .route("/landlord/requests", get(requests::landlord_list))
        .route("/landlord/invoices", get(requests::landlord_invoices))
}

/// Routes mounted at `/requests`.
///
/// ```text
/// GET  /{id}            -> get_request
/// POST /{id}/assign     -> assign     (agent)
/// POST /{id}/approve    -> approve    (landlord)
/// POST /{id}/deny       -> deny       (landlord)
/// POST /{id}/complete   -> complete   (agent)
/// GET  /{id}/invoice    -> invoice
/// POST /{id}/rating     -> submit_rating (tenant/landlord)
/// ```
pub fn requests_router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(requests::get_request))
        .route("/{id}/assign", post(requests::assign))
        .route("/{id}/approve", post(requests::approve))
        .route("/{id}/deny", post(requests::deny))
        .route("/{id}/complete", post(requests::complete))
        .route("/{id}/invoice", get(requests::invoice))
        .route("/{id}/rating", post(ratings::submit_rating))
}
