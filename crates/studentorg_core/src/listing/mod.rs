//! Filterable paginated listing shared by every list screen.
//!
//! # Responsibility
//! - Narrow one entity collection by a free-text substring query.
//! - Order it by an allow-listed sort key or the entity's default order.
//! - Cut the ordered result into fixed-size pages with metadata.
//!
//! # Invariants
//! - Read-only: listing never mutates persisted state.
//! - Ordering always ends with the primary key, so it is total.
//! - Page boundaries are computed against the filtered count.
//! - Count and items are read in one transaction.
//! - A page past the last one is empty, never an error.

mod page;
mod query;
pub mod spec;

use crate::model::{
    College, EntityKind, EntityRecord, OrgMember, Organization, Program, Stored, Student,
};
use crate::repo::{parse_stored, select_columns, Record, RepoError};
use log::{debug, warn};
use query::ListingPlan;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub use page::{Page, PageMeta, PageRequest};
pub use spec::{FieldRef, ListingSpec, PAGE_SIZE};

pub type ListingResult<T> = Result<T, ListingError>;

/// Errors from listing calls.
#[derive(Debug)]
pub enum ListingError {
    /// Requested entity name is not one of the supported kinds.
    UnknownEntityKind(String),
    /// Raw page parameter is not an integer or `last`.
    InvalidPageRequest(String),
    /// Storage failure, passed through unchanged.
    Repo(RepoError),
}

impl Display for ListingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEntityKind(name) => write!(f, "unknown entity kind `{name}`"),
            Self::InvalidPageRequest(raw) => write!(f, "invalid page request `{raw}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ListingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ListingError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<rusqlite::Error> for ListingError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::from(value))
    }
}

/// Lists one page of the named entity collection.
///
/// `entity_type` is matched by [`EntityKind::parse`].
pub fn list(
    conn: &Connection,
    entity_type: &str,
    query: Option<&str>,
    sort_key: Option<&str>,
    page: PageRequest,
) -> ListingResult<Page<EntityRecord>> {
    let kind = EntityKind::parse(entity_type)
        .ok_or_else(|| ListingError::UnknownEntityKind(entity_type.to_string()))?;
    list_kind(conn, kind, query, sort_key, page)
}

/// Lists using raw request parameters, parsing `page` first.
///
/// See [`PageRequest::parse`] for the accepted page syntax.
pub fn list_from_params(
    conn: &Connection,
    entity_type: &str,
    query: Option<&str>,
    sort_key: Option<&str>,
    page: Option<&str>,
) -> ListingResult<Page<EntityRecord>> {
    let page = PageRequest::parse(page).map_err(ListingError::InvalidPageRequest)?;
    list(conn, entity_type, query, sort_key, page)
}

/// Lists one page of `kind`, returning kind-tagged records.
pub fn list_kind(
    conn: &Connection,
    kind: EntityKind,
    query: Option<&str>,
    sort_key: Option<&str>,
    page: PageRequest,
) -> ListingResult<Page<EntityRecord>> {
    match kind {
        EntityKind::College => tagged::<College>(conn, query, sort_key, page),
        EntityKind::Program => tagged::<Program>(conn, query, sort_key, page),
        EntityKind::Student => tagged::<Student>(conn, query, sort_key, page),
        EntityKind::Organization => tagged::<Organization>(conn, query, sort_key, page),
        EntityKind::OrgMember => tagged::<OrgMember>(conn, query, sort_key, page),
    }
}

fn tagged<R: Record>(
    conn: &Connection,
    query: Option<&str>,
    sort_key: Option<&str>,
    page: PageRequest,
) -> ListingResult<Page<EntityRecord>> {
    Ok(list_records::<R>(conn, query, sort_key, page)?.map(R::into_entity))
}

/// Lists one page of `R` records.
///
/// # Errors
/// - Storage failures are returned as [`ListingError::Repo`].
/// - Fails when `conn` is already inside a transaction.
pub fn list_records<R: Record>(
    conn: &Connection,
    query: Option<&str>,
    sort_key: Option<&str>,
    page: PageRequest,
) -> ListingResult<Page<Stored<R>>> {
    let started_at = Instant::now();
    let spec = ListingSpec::for_kind(R::KIND);
    let plan = ListingPlan::build(spec, query, sort_key);

    match run_listing::<R>(conn, spec, &plan, page) {
        Ok(result) => {
            debug!(
                "event=list_records module=listing status=ok entity={} filtered={} sort={} page={} total={} items={} duration_ms={}",
                spec.kind,
                !plan.where_sql.is_empty(),
                plan.sort_key.unwrap_or("default"),
                result.meta.page,
                result.meta.total,
                result.items.len(),
                started_at.elapsed().as_millis()
            );
            Ok(result)
        }
        Err(err) => {
            warn!(
                "event=list_records module=listing status=error entity={} duration_ms={} error={}",
                spec.kind,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn run_listing<R: Record>(
    conn: &Connection,
    spec: &ListingSpec,
    plan: &ListingPlan,
    page: PageRequest,
) -> ListingResult<Page<Stored<R>>> {
    let tx = conn.unchecked_transaction()?;

    let count_sql = format!("SELECT COUNT(*) FROM {}{};", spec.from_sql, plan.where_sql);
    let count: i64 = tx.query_row(
        &count_sql,
        params_from_iter(plan.bind_values.iter()),
        |row| row.get(0),
    )?;
    let total = u64::try_from(count)
        .map_err(|_| RepoError::InvalidData(format!("negative row count for {}", spec.table)))?;

    let meta = PageMeta::new(total, page.resolve(total, spec.page_size), spec.page_size);
    let mut items = Vec::new();

    if meta.page <= meta.total_pages {
        let select_sql = format!(
            "SELECT {} FROM {}{}{} LIMIT ? OFFSET ?;",
            select_columns::<R>(),
            spec.from_sql,
            plan.where_sql,
            plan.order_by
        );
        let mut bind_values = plan.bind_values.clone();
        bind_values.push(Value::Integer(i64::from(meta.page_size)));
        bind_values.push(Value::Integer(
            i64::try_from(meta.offset()).unwrap_or(i64::MAX),
        ));

        let mut stmt = tx.prepare(&select_sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        while let Some(row) = rows.next()? {
            items.push(parse_stored::<R>(row)?);
        }
    }

    tx.commit()?;
    Ok(Page { items, meta })
}
