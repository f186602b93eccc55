//! Domain logic for the mendlet property-maintenance platform.
//!
//! Everything in this crate is pure and synchronous: role capabilities,
//! the maintenance-request state machine, rating validation, and the
//! invoice formatter. Persistence lives in `mendlet-db`, HTTP in
//! `mendlet-api`.

pub mod error;
pub mod invoice;
pub mod rating;
pub mod roles;
pub mod status;
pub mod types;
