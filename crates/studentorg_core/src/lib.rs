//! Core record management for student organizations.
//!
//! Colleges, programs, students, organizations and memberships live in one
//! SQLite database; every list screen goes through [`listing::list`].

pub mod db;
pub mod listing;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use listing::{
    list, list_from_params, list_kind, list_records, ListingError, ListingResult, ListingSpec,
    Page, PageMeta, PageRequest, PAGE_SIZE,
};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::org_member::parse_date_joined;
pub use model::{
    College, EntityKind, EntityRecord, OrgMember, Organization, Program, RecordId, Stored,
    Student, ValidationError,
};
pub use repo::{Record, RecordRepository, RepoError, RepoResult, SqliteRecordRepository};
pub use service::dashboard::{dashboard_counts, DashboardCounts};
pub use service::record_service::RecordService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
