//! Core persistence logic for revboard performance reviews.
//! This crate is the single source of truth for review invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{EmployeeId, EmployeeLookup, EmployeeLookupError};
pub use model::review::{
    PersistenceState, Review, ReviewId, ReviewValidationError, MIN_REVIEW_YEAR,
};
pub use repo::employee_directory::SqliteEmployeeDirectory;
pub use repo::review_repo::{
    RepoError, RepoResult, ReviewHandle, ReviewRepository, SqliteReviewRepository,
};
pub use service::review_service::ReviewService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
