//! Route definitions for the `/workers` roster.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{ratings, workers};
use crate::state::AppState;

/// Routes mounted at `/workers`.
///
/// ```text
/// GET  /                -> list    (?category)
/// POST /                -> create  (agent)
/// GET  /{id}            -> get
/// PUT  /{id}/favorite   -> set_favorite (agent)
/// GET  /{id}/ratings    -> list_worker_ratings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workers::list).post(workers::create))
        .route("/{id}", get(workers::get))
        .route("/{id}/favorite", put(workers::set_favorite))
        .route("/{id}/ratings", get(ratings::list_worker_ratings))
}
