//! SQL query modules, one per concern.

pub mod fulltext;
pub mod project_ops;
pub mod summary_ops;
pub mod vector_search;

use chrono::{DateTime, SecondsFormat, Utc};

use chronicle_core::errors::ChronicleResult;

use crate::to_store_err;

/// Timestamps are stored as fixed-width RFC 3339 (UTC, microseconds) so that
/// lexicographic comparison in SQL matches chronological order.
pub(crate) fn ts_to_sql(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn ts_from_sql(raw: &str) -> ChronicleResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_store_err(format!("bad timestamp {raw:?}: {e}")))
}
