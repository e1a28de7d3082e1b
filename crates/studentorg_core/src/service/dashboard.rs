//! Home dashboard aggregate counts.

use crate::model::{College, OrgMember, Organization, Program, Student};
use crate::repo::record_repo::count_rows;
use crate::repo::{Record, RepoResult};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

/// Record totals shown on the home screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCounts {
    pub colleges: u64,
    pub programs: u64,
    pub students: u64,
    pub organizations: u64,
    pub memberships: u64,
}

/// Counts every record kind inside one read transaction.
pub fn dashboard_counts(conn: &Connection) -> RepoResult<DashboardCounts> {
    let tx = conn.unchecked_transaction()?;
    let counts = DashboardCounts {
        colleges: count_rows(&tx, College::TABLE)?,
        programs: count_rows(&tx, Program::TABLE)?,
        students: count_rows(&tx, Student::TABLE)?,
        organizations: count_rows(&tx, Organization::TABLE)?,
        memberships: count_rows(&tx, OrgMember::TABLE)?,
    };
    tx.commit()?;
    Ok(counts)
}
