//! Review use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::employee::EmployeeId;
use crate::model::review::ReviewId;
use crate::repo::review_repo::{RepoResult, ReviewHandle, ReviewRepository};

/// Use-case service wrapper for review CRUD operations.
pub struct ReviewService<R: ReviewRepository> {
    repo: R,
}

impl<R: ReviewRepository> ReviewService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records a new review: validated construction plus persistence.
    ///
    /// Returns validation errors for a bad year/summary or an unknown
    /// employee unchanged.
    pub fn record_review(
        &self,
        year: i32,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<ReviewHandle> {
        self.repo.create_review(year, summary, employee_id)
    }

    /// Pushes locally mutated fields of a saved review to storage.
    pub fn update_review(&self, review: &ReviewHandle) -> RepoResult<()> {
        self.repo.update_review(review)
    }

    /// Deletes a saved review and detaches the handle.
    pub fn delete_review(&self, review: &ReviewHandle) -> RepoResult<()> {
        self.repo.delete_review(review)
    }

    /// Gets one review by primary key.
    pub fn get_review(&self, id: ReviewId) -> RepoResult<Option<ReviewHandle>> {
        self.repo.find_review_by_id(id)
    }

    /// Lists every persisted review.
    pub fn list_reviews(&self) -> RepoResult<Vec<ReviewHandle>> {
        self.repo.list_reviews()
    }
}
