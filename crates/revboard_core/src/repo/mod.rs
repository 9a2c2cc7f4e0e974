//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for reviews.
//! - Isolate SQLite query details from service/business orchestration.
//! - Own the per-process identity cache of live review handles.
//!
//! # Invariants
//! - Hydration returns the same handle for the same row id within one
//!   repository (reference identity).
//! - Repository APIs return semantic errors (`NotFound`, `UnsavedReview`)
//!   in addition to DB transport errors.

pub mod employee_directory;
pub mod review_repo;
