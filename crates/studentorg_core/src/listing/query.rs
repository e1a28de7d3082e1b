//! SQL fragments for one listing call: filter predicate and ordering.

use super::spec::ListingSpec;
use crate::model::{DESCRIPTION_MAX_CHARS, NAME_MAX_CHARS};
use rusqlite::types::Value;

const LIKE_ESCAPE: char = '\\';

/// Longest text any filterable column can hold. Longer queries cannot match.
const FILTERABLE_MAX_CHARS: usize = if DESCRIPTION_MAX_CHARS > NAME_MAX_CHARS {
    DESCRIPTION_MAX_CHARS
} else {
    NAME_MAX_CHARS
};

const MATCH_NOTHING_SQL: &str = " WHERE 0 = 1";

/// Filter and ordering resolved from raw request parameters.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListingPlan {
    /// Empty, ` WHERE (...)` with one placeholder per bind value, or a
    /// predicate that matches nothing for queries longer than any field.
    pub where_sql: String,
    pub bind_values: Vec<Value>,
    pub order_by: String,
    /// The allow-listed sort key in effect, if any.
    pub sort_key: Option<&'static str>,
}

impl ListingPlan {
    pub fn build(spec: &ListingSpec, query: Option<&str>, sort_key: Option<&str>) -> Self {
        let mut where_sql = String::new();
        let mut bind_values = Vec::new();

        let fields = spec.applicable_filter_fields();
        if let Some(text) = normalize_query(query).filter(|_| !fields.is_empty()) {
            if text.chars().count() > FILTERABLE_MAX_CHARS {
                // Also keeps the LIKE pattern under SQLite's pattern length limit.
                where_sql = MATCH_NOTHING_SQL.to_string();
            } else {
                let pattern = format!("%{}%", escape_like(text));
                let predicates = fields
                    .iter()
                    .map(|field| format!("{} LIKE ? ESCAPE '{LIKE_ESCAPE}'", field.expr))
                    .collect::<Vec<_>>();
                where_sql = format!(" WHERE ({})", predicates.join(" OR "));
                bind_values = vec![Value::Text(pattern); fields.len()];
            }
        }

        let sort_key = sort_key
            .map(str::trim)
            .and_then(|key| spec.allowed_sort_keys.iter().copied().find(|allowed| *allowed == key));

        Self {
            where_sql,
            bind_values,
            order_by: order_by_clause(spec, sort_key),
            sort_key,
        }
    }
}

/// Returns the query text when it should filter, `None` for absent/blank.
pub(crate) fn normalize_query(query: Option<&str>) -> Option<&str> {
    query.map(str::trim).filter(|text| !text.is_empty())
}

/// Escapes `LIKE` wildcards so the query matches literally.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// Requested key first, then the remaining default keys, then the primary key.
fn order_by_clause(spec: &ListingSpec, sort_key: Option<&'static str>) -> String {
    let mut keys: Vec<&'static str> = Vec::with_capacity(spec.default_order.len() + 1);
    if let Some(key) = sort_key {
        keys.push(key);
    }
    keys.extend(
        spec.default_order
            .iter()
            .copied()
            .filter(|key| Some(*key) != sort_key),
    );

    let mut terms = keys
        .into_iter()
        .filter_map(|key| spec.field(key))
        .map(|field| format!("{} ASC", field.expr))
        .collect::<Vec<_>>();
    terms.push(format!("{}.id ASC", spec.table));
    format!(" ORDER BY {}", terms.join(", "))
}
