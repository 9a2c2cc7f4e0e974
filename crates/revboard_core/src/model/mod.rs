//! Domain model for performance review records.
//!
//! # Responsibility
//! - Define the validated `Review` record and its persistence state.
//! - Define the employee-lookup boundary consumed during validation.
//!
//! # Invariants
//! - A `Review` value that exists is a valid one; every mutation path
//!   re-validates before assigning.
//! - Persistence state is an explicit tag (`Unsaved` vs `Saved`), never
//!   inferred from field contents.

pub mod employee;
pub mod review;
