//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Status transitions on
//! maintenance requests are guarded single-row UPDATEs: the WHERE clause
//! pins the expected current status, so of two racing writers exactly
//! one succeeds and the other observes no row.

pub mod profile_repo;
pub mod property_repo;
pub mod rating_repo;
pub mod request_repo;
pub mod session_repo;
pub mod worker_repo;

pub use profile_repo::ProfileRepo;
pub use property_repo::PropertyRepo;
pub use rating_repo::RatingRepo;
pub use request_repo::RequestRepo;
pub use session_repo::SessionRepo;
pub use worker_repo::WorkerRepo;
