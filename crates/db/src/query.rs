//! Shared building blocks for paginated list queries.
//!
//! Every resource list endpoint supports the same query surface: exact-match
//! filters from a per-resource allow-list, a free-text `search` parameter
//! matched with ILIKE across declared columns, an `ordering` parameter
//! (leading `-` for descending) validated against an allow-list, and clamped
//! `limit`/`offset` pagination. Repositories assemble these pieces with
//! [`sqlx::QueryBuilder`], running the same condition set once for the COUNT
//! and once for the page SELECT.

use sqlx::{Postgres, QueryBuilder};

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for list endpoints.
pub const MAX_LIMIT: i64 = 200;

/// One page of results plus the total row count for the same conditions.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// Clamp a requested page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a requested offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Tracks the `WHERE` / `AND` separator while conditions are appended.
#[derive(Debug, Default)]
pub struct Conditions {
    any: bool,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the next separator (` WHERE ` first, ` AND ` afterwards).
    pub fn sep(&mut self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(if self.any { " AND " } else { " WHERE " });
        self.any = true;
    }
}

/// Build an `ILIKE` pattern for substring search, escaping LIKE wildcards.
pub fn search_pattern(term: &str) -> String {
    let escaped: String = term
        .chars()
        .flat_map(|c| match c {
            '\\' | '%' | '_' => vec!['\\', c],
            other => vec![other],
        })
        .collect();
    format!("%{escaped}%")
}

/// Resolve the `ordering` query parameter against an allow-list.
///
/// `allowed` maps API field names to SQL sort expressions. A leading `-`
/// requests descending order. Unknown fields fall back to `default`
/// (the original API silently ignored them rather than erroring).
pub fn order_clause(requested: Option<&str>, allowed: &[(&str, &str)], default: &str) -> String {
    if let Some(raw) = requested {
        let (field, direction) = match raw.strip_prefix('-') {
            Some(field) => (field, " DESC"),
            None => (raw, " ASC"),
        };
        if let Some((_, column)) = allowed.iter().find(|(name, _)| *name == field) {
            return format!("{column}{direction}");
        }
    }
    default.to_string()
}
