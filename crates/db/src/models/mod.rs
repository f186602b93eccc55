//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Where the entity is patchable, a `Deserialize` update DTO with
//!   all-`Option` fields

pub mod maintenance_request;
pub mod profile;
pub mod property;
pub mod session;
pub mod worker;
pub mod worker_rating;
