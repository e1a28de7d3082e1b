//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the `Record` contract that maps a model onto one table.
//! - Isolate SQLite statement details from services and listing callers.
//!
//! # Invariants
//! - Write paths call `validate()` before any SQL mutation.
//! - Repository APIs return semantic errors (`NotFound`, `MissingReference`,
//!   `Conflict`) in addition to DB transport errors.

pub mod record_repo;
mod records;

use crate::db::DbError;
use crate::model::{EntityKind, EntityRecord, RecordId, Stored, ValidationError};
use rusqlite::types::Value;
use rusqlite::Row;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use record_repo::{RecordRepository, SqliteRecordRepository};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound {
        table: &'static str,
        id: RecordId,
    },
    /// A foreign reference does not point to an existing record.
    MissingReference {
        table: &'static str,
    },
    /// A unique column already holds the written value.
    Conflict {
        table: &'static str,
        message: String,
    },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Persisted data cannot be converted into a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { table, id } => write!(f, "record not found: {table}#{id}"),
            Self::MissingReference { table } => {
                write!(f, "{table} row references a record that does not exist")
            }
            Self::Conflict { table, message } => write!(f, "conflict in {table}: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
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

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
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

/// Maps one model type onto one table.
///
/// `COLUMNS` lists the writable columns in the order produced by
/// [`Record::to_values`]. `id`, `created_at` and `updated_at` are managed by
/// storage and never appear there.
pub trait Record: Sized {
    const KIND: EntityKind;
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn validate(&self) -> Result<(), ValidationError>;
    fn to_values(&self) -> Vec<Value>;
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
    fn into_entity(stored: Stored<Self>) -> EntityRecord;
}

/// Table-qualified select list for a record, identity and timestamps first.
pub(crate) fn select_columns<R: Record>() -> String {
    let mut columns = vec![
        format!("{}.id AS id", R::TABLE),
        format!("{}.created_at AS created_at", R::TABLE),
        format!("{}.updated_at AS updated_at", R::TABLE),
    ];
    columns.extend(
        R::COLUMNS
            .iter()
            .map(|column| format!("{table}.{column} AS {column}", table = R::TABLE)),
    );
    columns.join(", ")
}

pub(crate) fn parse_stored<R: Record>(row: &Row<'_>) -> RepoResult<Stored<R>> {
    Ok(Stored {
        id: row.get("id")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        record: R::from_row(row)?,
    })
}
