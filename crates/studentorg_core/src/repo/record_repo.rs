//! Record repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/update/get/delete/count over any `Record` table.
//! - Translate SQLite constraint failures into semantic repository errors.
//!
//! # Invariants
//! - Deletes are hard deletes; owned rows follow the schema's cascade rules.
//! - `update` bumps `updated_at` and leaves `created_at` untouched.

use super::{parse_stored, select_columns, Record, RepoError, RepoResult};
use crate::db::migrations::latest_version;
use crate::model::{RecordId, Stored};
use rusqlite::ffi;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension};

/// Repository interface for record CRUD operations.
pub trait RecordRepository {
    fn create<R: Record>(&self, record: &R) -> RepoResult<RecordId>;
    fn update<R: Record>(&self, id: RecordId, record: &R) -> RepoResult<()>;
    fn get<R: Record>(&self, id: RecordId) -> RepoResult<Option<Stored<R>>>;
    fn delete<R: Record>(&self, id: RecordId) -> RepoResult<()>;
    fn count<R: Record>(&self) -> RepoResult<u64>;
}

/// SQLite-backed record repository.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Rejects connections whose schema version differs from the one this
    /// binary migrates to; use [`crate::db::open_db`] to obtain one.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn create<R: Record>(&self, record: &R) -> RepoResult<RecordId> {
        record.validate()?;

        let placeholders = (1..=R::COLUMNS.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            R::TABLE,
            R::COLUMNS.join(", ")
        );

        self.conn
            .execute(&sql, params_from_iter(record.to_values()))
            .map_err(|err| map_write_error(err, R::TABLE))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update<R: Record>(&self, id: RecordId, record: &R) -> RepoResult<()> {
        record.validate()?;

        let assignments = R::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {}
             SET
                {assignments},
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?{};",
            R::TABLE,
            R::COLUMNS.len() + 1
        );

        let mut bind_values = record.to_values();
        bind_values.push(Value::Integer(id));
        let changed = self
            .conn
            .execute(&sql, params_from_iter(bind_values))
            .map_err(|err| map_write_error(err, R::TABLE))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: R::TABLE,
                id,
            });
        }

        Ok(())
    }

    fn get<R: Record>(&self, id: RecordId) -> RepoResult<Option<Stored<R>>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {}.id = ?1;",
            select_columns::<R>(),
            R::TABLE,
            R::TABLE
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_stored(row)?));
        }

        Ok(None)
    }

    fn delete<R: Record>(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(&format!("DELETE FROM {} WHERE id = ?1;", R::TABLE), [id])
            .map_err(|err| map_write_error(err, R::TABLE))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                table: R::TABLE,
                id,
            });
        }

        Ok(())
    }

    fn count<R: Record>(&self) -> RepoResult<u64> {
        count_rows(self.conn, R::TABLE)
    }
}

pub(crate) fn count_rows(conn: &Connection, table: &str) -> RepoResult<u64> {
    let count: Option<i64> = conn
        .query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
            row.get(0)
        })
        .optional()?;
    u64::try_from(count.unwrap_or(0))
        .map_err(|_| RepoError::InvalidData(format!("negative row count for {table}")))
}

fn map_write_error(err: rusqlite::Error, table: &'static str) -> RepoError {
    if let rusqlite::Error::SqliteFailure(failure, message) = &err {
        match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return RepoError::MissingReference { table },
            ffi::SQLITE_CONSTRAINT_UNIQUE => {
                return RepoError::Conflict {
                    table,
                    message: message
                        .clone()
                        .unwrap_or_else(|| "unique constraint failed".to_string()),
                }
            }
            _ => {}
        }
    }
    RepoError::from(err)
}
