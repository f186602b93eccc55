//! Route definitions for the `/properties` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::properties;
use crate::state::AppState;

/// Routes mounted at `/properties`.
///
/// ```text
/// GET    /             -> list    (agent: all, landlord: own)
/// POST   /             -> create
/// GET    /{id}         -> get
/// PUT    /{id}/tenant  -> lease       (agent)
/// DELETE /{id}/tenant  -> end_lease   (agent)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(properties::list).post(properties::create))
        .route("/{id}", get(properties::get))
        .route(
            "/{id}/tenant",
            put(properties::lease).delete(properties::end_lease),
        )
}
