//! SQLite storage for colleges, programs, students, organizations and
//! organization memberships.
//!
//! Schema history (mirrored to `PRAGMA user_version`):
//! - v1: the five record tables. Program, Student and OrgMember rows cascade
//!   away with their owner; deleting a College nulls `organizations.college_id`.
//!   `students.student_id` is unique.
//! - v2: indexes on the join columns and the list screens' ordering columns.
//!
//! Every connection from [`open_db`]/[`open_db_in_memory`] enforces foreign
//! keys and is at the latest version before any record is read or written.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "studentorg schema v{db_version} was written by a newer build (this build reads up to v{latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
