//! Employee collaborator boundary.
//!
//! # Responsibility
//! - Expose the one capability review validation needs from the employee
//!   side: existence by id.
//!
//! # Invariants
//! - The model layer stays storage-agnostic; concrete lookups live in the
//!   repository layer and are injected where validation runs.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Primary key of an employee row.
pub type EmployeeId = i64;

/// Existence lookup for employees.
///
/// Injected into review construction and setters so the review module never
/// depends on the employee module directly. Implementations must report
/// `Ok(false)` for nonexistent ids rather than erroring.
pub trait EmployeeLookup {
    fn employee_exists(&self, id: EmployeeId) -> Result<bool, EmployeeLookupError>;
}

/// Transport failure while answering an existence lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeLookupError {
    message: String,
}

impl EmployeeLookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for EmployeeLookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "employee lookup failed: {}", self.message)
    }
}

impl Error for EmployeeLookupError {}
