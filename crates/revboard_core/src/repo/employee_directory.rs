//! SQLite-backed employee existence lookups.
//!
//! # Responsibility
//! - Implement the `EmployeeLookup` boundary over the `employees` table.
//!
//! # Invariants
//! - Nonexistent ids answer `Ok(false)`, never an error.

use crate::model::employee::{EmployeeId, EmployeeLookup, EmployeeLookupError};
use rusqlite::Connection;

/// Employee directory reading the `employees` table.
pub struct SqliteEmployeeDirectory<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeDirectory<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployeeLookup for SqliteEmployeeDirectory<'_> {
    fn employee_exists(&self, id: EmployeeId) -> Result<bool, EmployeeLookupError> {
        let exists: i64 = self
            .conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?1);",
                [id],
                |row| row.get(0),
            )
            .map_err(|err| EmployeeLookupError::new(err.to_string()))?;
        Ok(exists == 1)
    }
}
