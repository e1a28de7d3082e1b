//! Record use-case service.
//!
//! # Responsibility
//! - Provide create/update/get/delete entry points for every record kind.
//! - Emit one metadata-only log event per write.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Service layer remains storage-agnostic.

use crate::model::{RecordId, Stored};
use crate::repo::{Record, RecordRepository, RepoResult};
use log::{info, warn};

/// Use-case service wrapper for record CRUD operations.
pub struct RecordService<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> RecordService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and inserts a record, returning its new id.
    pub fn create<T: Record>(&self, record: &T) -> RepoResult<RecordId> {
        let result = self.repo.create(record);
        match &result {
            Ok(id) => info!(
                "event=record_create module=service status=ok entity={} id={id}",
                T::KIND
            ),
            Err(err) => warn!(
                "event=record_create module=service status=error entity={} error={err}",
                T::KIND
            ),
        }
        result
    }

    /// Replaces all writable fields of an existing record.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update<T: Record>(&self, id: RecordId, record: &T) -> RepoResult<()> {
        let result = self.repo.update(id, record);
        log_write("record_update", T::KIND.as_str(), id, &result);
        result
    }

    pub fn get<T: Record>(&self, id: RecordId) -> RepoResult<Option<Stored<T>>> {
        self.repo.get(id)
    }

    /// Hard-deletes a record; owned records follow the schema's cascade rules.
    pub fn delete<T: Record>(&self, id: RecordId) -> RepoResult<()> {
        let result = self.repo.delete::<T>(id);
        log_write("record_delete", T::KIND.as_str(), id, &result);
        result
    }
}

fn log_write(event: &str, entity: &str, id: RecordId, result: &RepoResult<()>) {
    match result {
        Ok(()) => info!("event={event} module=service status=ok entity={entity} id={id}"),
        Err(err) => {
            warn!("event={event} module=service status=error entity={entity} id={id} error={err}")
        }
    }
}
