use revboard_core::{
    EmployeeId, EmployeeLookup, EmployeeLookupError, PersistenceState, Review,
    ReviewValidationError, MIN_REVIEW_YEAR,
};
use std::collections::HashSet;

struct StaticDirectory(HashSet<EmployeeId>);

impl StaticDirectory {
    fn with_ids(ids: &[EmployeeId]) -> Self {
        Self(ids.iter().copied().collect())
    }
}

impl EmployeeLookup for StaticDirectory {
    fn employee_exists(&self, id: EmployeeId) -> Result<bool, EmployeeLookupError> {
        Ok(self.0.contains(&id))
    }
}

struct BrokenDirectory;

impl EmployeeLookup for BrokenDirectory {
    fn employee_exists(&self, _id: EmployeeId) -> Result<bool, EmployeeLookupError> {
        Err(EmployeeLookupError::new("directory offline"))
    }
}

#[test]
fn new_review_is_unsaved_and_holds_fields() {
    let directory = StaticDirectory::with_ids(&[1]);

    let review = Review::new(2021, "Good", 1, &directory).unwrap();

    assert_eq!(review.state(), PersistenceState::Unsaved);
    assert_eq!(review.id(), None);
    assert_eq!(review.year(), 2021);
    assert_eq!(review.summary(), "Good");
    assert_eq!(review.employee_id(), 1);
}

#[test]
fn year_below_minimum_is_rejected() {
    let directory = StaticDirectory::with_ids(&[1]);

    let err = Review::new(1999, "Good", 1, &directory).unwrap_err();
    assert_eq!(err, ReviewValidationError::YearTooEarly { year: 1999 });
}

#[test]
fn minimum_year_is_accepted() {
    let directory = StaticDirectory::with_ids(&[1]);

    let review = Review::new(MIN_REVIEW_YEAR, "Good", 1, &directory).unwrap();
    assert_eq!(review.year(), MIN_REVIEW_YEAR);
}

#[test]
fn empty_and_whitespace_summaries_are_rejected() {
    let directory = StaticDirectory::with_ids(&[1]);

    let empty = Review::new(2021, "", 1, &directory).unwrap_err();
    assert_eq!(empty, ReviewValidationError::EmptySummary);

    let whitespace = Review::new(2021, "   \t\n", 1, &directory).unwrap_err();
    assert_eq!(whitespace, ReviewValidationError::EmptySummary);
}

#[test]
fn unknown_employee_is_rejected() {
    let directory = StaticDirectory::with_ids(&[1]);

    let err = Review::new(2021, "Good", 42, &directory).unwrap_err();
    assert_eq!(err, ReviewValidationError::UnknownEmployee { employee_id: 42 });
}

#[test]
fn lookup_failure_propagates_from_construction() {
    let err = Review::new(2021, "Good", 1, &BrokenDirectory).unwrap_err();
    assert!(matches!(err, ReviewValidationError::Lookup(_)));
}

#[test]
fn failed_setter_leaves_previous_value_in_place() {
    let directory = StaticDirectory::with_ids(&[1]);
    let mut review = Review::new(2021, "Good", 1, &directory).unwrap();

    review.set_year(1980).unwrap_err();
    assert_eq!(review.year(), 2021);

    review.set_summary("  ").unwrap_err();
    assert_eq!(review.summary(), "Good");

    review.set_employee_id(9, &directory).unwrap_err();
    assert_eq!(review.employee_id(), 1);
}

#[test]
fn setters_apply_valid_values() {
    let directory = StaticDirectory::with_ids(&[1, 2]);
    let mut review = Review::new(2021, "Good", 1, &directory).unwrap();

    review.set_year(2023).unwrap();
    review.set_summary("Outstanding").unwrap();
    review.set_employee_id(2, &directory).unwrap();

    assert_eq!(review.year(), 2023);
    assert_eq!(review.summary(), "Outstanding");
    assert_eq!(review.employee_id(), 2);
}

#[test]
fn review_serializes_with_state_tag() {
    let directory = StaticDirectory::with_ids(&[1]);
    let review = Review::new(2021, "Good", 1, &directory).unwrap();

    let value = serde_json::to_value(&review).unwrap();
    assert_eq!(value["year"], 2021);
    assert_eq!(value["summary"], "Good");
    assert_eq!(value["employee_id"], 1);
    assert_eq!(value["state"], "unsaved");
}
