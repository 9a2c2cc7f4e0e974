//! Review domain model.
//!
//! # Responsibility
//! - Hold one validated performance review record.
//! - Enforce field constraints at construction and on every setter.
//!
//! # Invariants
//! - `year >= MIN_REVIEW_YEAR`.
//! - `summary` contains non-whitespace text.
//! - `employee_id` referenced an existing employee when it was assigned
//!   (a later deletion of that employee is not re-checked).
//! - Setters fail fast: on error the field keeps its previous value.

use crate::model::employee::{EmployeeId, EmployeeLookup, EmployeeLookupError};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Primary key of a review row (SQLite rowid).
pub type ReviewId = i64;

/// Earliest review year accepted by validation.
pub const MIN_REVIEW_YEAR: i32 = 2000;

/// Whether a review is backed by a database row.
///
/// Replaces nullable-id encoding so update/delete on a never-saved review
/// is a type-checked precondition instead of a driver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceState {
    /// Never persisted, or detached after delete.
    Unsaved,
    /// Backed by the row with this primary key.
    Saved(ReviewId),
}

/// Validation failure raised at the point of assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    YearTooEarly { year: i32 },
    EmptySummary,
    UnknownEmployee { employee_id: EmployeeId },
    Lookup(EmployeeLookupError),
}

impl Display for ReviewValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearTooEarly { year } => {
                write!(f, "year {year} is earlier than minimum {MIN_REVIEW_YEAR}")
            }
            Self::EmptySummary => write!(f, "summary must contain non-whitespace text"),
            Self::UnknownEmployee { employee_id } => {
                write!(
                    f,
                    "employee_id {employee_id} does not reference an existing employee"
                )
            }
            Self::Lookup(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReviewValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lookup(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EmployeeLookupError> for ReviewValidationError {
    fn from(value: EmployeeLookupError) -> Self {
        Self::Lookup(value)
    }
}

/// One performance review record.
///
/// Fields are private so no invalid value can be constructed; all writes go
/// through validating setters. Construction never touches storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    state: PersistenceState,
    year: i32,
    summary: String,
    employee_id: EmployeeId,
}

impl Review {
    /// Creates an unsaved review, validating all three constraints in
    /// assignment order (year, summary, employee existence).
    pub fn new(
        year: i32,
        summary: impl Into<String>,
        employee_id: EmployeeId,
        employees: &dyn EmployeeLookup,
    ) -> Result<Self, ReviewValidationError> {
        let summary = summary.into();
        validate_year(year)?;
        validate_summary(&summary)?;
        validate_employee(employee_id, employees)?;
        Ok(Self {
            state: PersistenceState::Unsaved,
            year,
            summary,
            employee_id,
        })
    }

    /// Reconstructs a saved review from persisted field values, re-running
    /// validation so corrupt rows surface instead of being masked.
    pub(crate) fn hydrated(
        id: ReviewId,
        year: i32,
        summary: String,
        employee_id: EmployeeId,
        employees: &dyn EmployeeLookup,
    ) -> Result<Self, ReviewValidationError> {
        let mut review = Self::new(year, summary, employee_id, employees)?;
        review.state = PersistenceState::Saved(id);
        Ok(review)
    }

    pub fn state(&self) -> PersistenceState {
        self.state
    }

    /// Primary key when saved, `None` while unsaved.
    pub fn id(&self) -> Option<ReviewId> {
        match self.state {
            PersistenceState::Saved(id) => Some(id),
            PersistenceState::Unsaved => None,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn set_year(&mut self, year: i32) -> Result<(), ReviewValidationError> {
        validate_year(year)?;
        self.year = year;
        Ok(())
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), ReviewValidationError> {
        let summary = summary.into();
        validate_summary(&summary)?;
        self.summary = summary;
        Ok(())
    }

    pub fn set_employee_id(
        &mut self,
        employee_id: EmployeeId,
        employees: &dyn EmployeeLookup,
    ) -> Result<(), ReviewValidationError> {
        validate_employee(employee_id, employees)?;
        self.employee_id = employee_id;
        Ok(())
    }

    pub(crate) fn mark_saved(&mut self, id: ReviewId) {
        self.state = PersistenceState::Saved(id);
    }

    pub(crate) fn mark_unsaved(&mut self) {
        self.state = PersistenceState::Unsaved;
    }
}

fn validate_year(year: i32) -> Result<(), ReviewValidationError> {
    if year < MIN_REVIEW_YEAR {
        return Err(ReviewValidationError::YearTooEarly { year });
    }
    Ok(())
}

fn validate_summary(summary: &str) -> Result<(), ReviewValidationError> {
    if summary.trim().is_empty() {
        return Err(ReviewValidationError::EmptySummary);
    }
    Ok(())
}

fn validate_employee(
    employee_id: EmployeeId,
    employees: &dyn EmployeeLookup,
) -> Result<(), ReviewValidationError> {
    if !employees.employee_exists(employee_id)? {
        return Err(ReviewValidationError::UnknownEmployee { employee_id });
    }
    Ok(())
}
