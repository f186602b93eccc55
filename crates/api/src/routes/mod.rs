//! Route tree for the API.

pub mod auth;
pub mod health;
pub mod properties;
pub mod requests;
pub mod workers;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/me                             current profile
///
/// /tenant/requests                     tenant view: list, submit
/// /agent/requests                      agent view: list (?status, ?priority)
/// /landlord/requests                   landlord view: list
/// /landlord/invoices                   landlord view: invoice-eligible set
///
/// /requests/{id}                       detail (owning tenant / agent / owning landlord)
/// /requests/{id}/assign                agent: submitted -> in_progress
/// /requests/{id}/approve               landlord: submitted -> in_progress
/// /requests/{id}/deny                  landlord: submitted -> cancelled
/// /requests/{id}/complete              agent: in_progress -> completed
/// /requests/{id}/invoice               plain-text invoice download
/// /requests/{id}/rating                tenant/landlord: upsert rating
///
/// /properties                          list, create
/// /properties/{id}                     get
/// /properties/{id}/tenant              lease (PUT), end lease (DELETE)
///
/// /workers                             list, create
/// /workers/{id}                        get
/// /workers/{id}/favorite               favorite toggle (PUT)
/// /workers/{id}/ratings                ratings received
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(requests::role_views_router())
        .nest("/requests", requests::requests_router())
        .nest("/properties", properties::router())
        .nest("/workers", workers::router())
}
