//! Review repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `reviews` storage.
//! - Maintain the identity cache: one live handle per row id.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths only accept `Review` values, which are valid by
//!   construction.
//! - Read paths re-validate persisted state instead of masking bad rows.
//! - Saved/unsaved preconditions are checked before any SQL runs.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::employee::{EmployeeId, EmployeeLookup};
use crate::model::review::{Review, ReviewId, ReviewValidationError};
use rusqlite::{params, Connection, Row};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

const REVIEW_SELECT_SQL: &str = "SELECT id, year, summary, employee_id FROM reviews";

const REVIEWS_TABLE_DDL: &str = "CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    year INTEGER NOT NULL,
    summary TEXT NOT NULL,
    employee_id INTEGER NOT NULL REFERENCES employees(id)
);
CREATE INDEX IF NOT EXISTS idx_reviews_employee_id ON reviews(employee_id);";

const REQUIRED_REVIEW_COLUMNS: &[&str] = &["id", "year", "summary", "employee_id"];

/// Shared, interior-mutable handle to a live review instance.
///
/// The repository hands out clones of one `Rc` per row id, so repeated
/// lookups of the same row observe the same object.
pub type ReviewHandle = Rc<RefCell<Review>>;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for review persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ReviewValidationError),
    Db(DbError),
    NotFound(ReviewId),
    UnsavedReview,
    AlreadySaved(ReviewId),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "review not found: {id}"),
            Self::UnsavedReview => write!(f, "review has not been saved"),
            Self::AlreadySaved(id) => write!(f, "review is already saved as row {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ReviewValidationError> for RepoError {
    fn from(value: ReviewValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for review CRUD operations.
pub trait ReviewRepository {
    /// Inserts an unsaved review, assigns its rowid and caches the handle.
    fn save_review(&self, review: &ReviewHandle) -> RepoResult<ReviewId>;
    /// Validated construct + save in one step.
    fn create_review(
        &self,
        year: i32,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<ReviewHandle>;
    /// Pushes the current field values of a saved review to its row.
    fn update_review(&self, review: &ReviewHandle) -> RepoResult<()>;
    /// Deletes the row, evicts the cache entry and detaches the review.
    fn delete_review(&self, review: &ReviewHandle) -> RepoResult<()>;
    fn find_review_by_id(&self, id: ReviewId) -> RepoResult<Option<ReviewHandle>>;
    /// Every row in database iteration order.
    fn list_reviews(&self) -> RepoResult<Vec<ReviewHandle>>;
    /// Cache inspection without touching storage.
    fn cached_review(&self, id: ReviewId) -> Option<ReviewHandle>;
    /// Idempotently ensures the `reviews` table and its index exist.
    fn ensure_reviews_table(&self) -> RepoResult<()>;
    /// Idempotently drops the `reviews` table and clears the cache.
    fn drop_reviews_table(&self) -> RepoResult<()>;
}

/// SQLite-backed review repository with an identity cache.
pub struct SqliteReviewRepository<'conn, D: EmployeeLookup> {
    conn: &'conn Connection,
    employees: D,
    cache: RefCell<HashMap<ReviewId, ReviewHandle>>,
}

impl<'conn, D: EmployeeLookup> SqliteReviewRepository<'conn, D> {
    /// Wraps a migrated connection, rejecting one whose schema is not ready.
    pub fn try_new(conn: &'conn Connection, employees: D) -> RepoResult<Self> {
        ensure_schema(conn)?;
        Ok(Self {
            conn,
            employees,
            cache: RefCell::new(HashMap::new()),
        })
    }

    /// Reconciles one fetched row with the identity cache.
    ///
    /// A cached instance is refreshed in place through the validating
    /// setters and returned as-is; an uncached row becomes a new handle.
    fn hydrate_row(&self, row: &Row<'_>) -> RepoResult<ReviewHandle> {
        let id: ReviewId = row.get("id")?;
        let year: i32 = row.get("year")?;
        let summary: String = row.get("summary")?;
        let employee_id: EmployeeId = row.get("employee_id")?;

        let cached = self.cache.borrow().get(&id).cloned();
        if let Some(handle) = cached {
            {
                let mut review = handle.borrow_mut();
                review.set_year(year)?;
                review.set_summary(summary)?;
                review.set_employee_id(employee_id, &self.employees)?;
            }
            return Ok(handle);
        }

        let review = Review::hydrated(id, year, summary, employee_id, &self.employees)?;
        let handle = Rc::new(RefCell::new(review));
        self.cache.borrow_mut().insert(id, Rc::clone(&handle));
        Ok(handle)
    }
}

impl<D: EmployeeLookup> ReviewRepository for SqliteReviewRepository<'_, D> {
    fn save_review(&self, review: &ReviewHandle) -> RepoResult<ReviewId> {
        {
            let review = review.borrow();
            if let Some(id) = review.id() {
                return Err(RepoError::AlreadySaved(id));
            }

            self.conn.execute(
                "INSERT INTO reviews (year, summary, employee_id) VALUES (?1, ?2, ?3);",
                params![review.year(), review.summary(), review.employee_id()],
            )?;
        }

        let id = self.conn.last_insert_rowid();
        review.borrow_mut().mark_saved(id);
        self.cache.borrow_mut().insert(id, Rc::clone(review));
        Ok(id)
    }

    fn create_review(
        &self,
        year: i32,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<ReviewHandle> {
        let review = Review::new(year, summary, employee_id, &self.employees)?;
        let handle = Rc::new(RefCell::new(review));
        self.save_review(&handle)?;
        Ok(handle)
    }

    fn update_review(&self, review: &ReviewHandle) -> RepoResult<()> {
        let review = review.borrow();
        let id = review.id().ok_or(RepoError::UnsavedReview)?;

        let changed = self.conn.execute(
            "UPDATE reviews SET year = ?1, summary = ?2, employee_id = ?3 WHERE id = ?4;",
            params![review.year(), review.summary(), review.employee_id(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_review(&self, review: &ReviewHandle) -> RepoResult<()> {
        let id = review.borrow().id().ok_or(RepoError::UnsavedReview)?;

        // A row already removed behind our back is tolerated, matching the
        // idempotent cache eviction below.
        self.conn
            .execute("DELETE FROM reviews WHERE id = ?1;", [id])?;

        self.cache.borrow_mut().remove(&id);
        review.borrow_mut().mark_unsaved();
        Ok(())
    }

    fn find_review_by_id(&self, id: ReviewId) -> RepoResult<Option<ReviewHandle>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(self.hydrate_row(row)?));
        }

        Ok(None)
    }

    fn list_reviews(&self) -> RepoResult<Vec<ReviewHandle>> {
        let mut stmt = self.conn.prepare(&format!("{REVIEW_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut reviews = Vec::new();

        while let Some(row) = rows.next()? {
            reviews.push(self.hydrate_row(row)?);
        }

        Ok(reviews)
    }

    fn cached_review(&self, id: ReviewId) -> Option<ReviewHandle> {
        self.cache.borrow().get(&id).cloned()
    }

    fn ensure_reviews_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(REVIEWS_TABLE_DDL)?;
        Ok(())
    }

    fn drop_reviews_table(&self) -> RepoResult<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS reviews;")?;
        // Cached handles would point at rows that no longer exist.
        self.cache.borrow_mut().clear();
        Ok(())
    }
}

fn ensure_schema(conn: &Connection) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();

    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "reviews")? {
        return Err(RepoError::MissingRequiredTable("reviews"));
    }

    for &column in REQUIRED_REVIEW_COLUMNS {
        if !column_exists(conn, "reviews", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "reviews",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;

    while let Some(row) = rows.next()? {
        let name: String = row.get("name")?;
        if name == column {
            return Ok(true);
        }
    }

    Ok(false)
}
