//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the corresponding repository in `mendlet_db` and
//! map errors via [`crate::error::AppError`].

pub mod auth;
pub mod properties;
pub mod ratings;
pub mod requests;
pub mod workers;
