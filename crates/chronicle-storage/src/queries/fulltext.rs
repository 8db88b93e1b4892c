//! FTS5 full-text queries over summary text.

use rusqlite::{params, Connection};

use chronicle_core::errors::ChronicleResult;
use chronicle_core::model::SearchHit;

use crate::to_store_err;

/// BM25-ranked full-text query. FTS5 rank is ascending-better, so the score
/// is negated to make higher-is-better like every other hit list. An empty
/// corpus yields an empty list.
pub fn fulltext_query(
    conn: &Connection,
    query: &str,
    limit: usize,
) -> ChronicleResult<Vec<SearchHit>> {
    let mut stmt = conn
        .prepare(
            "SELECT s.id, s.text, -fts.rank AS score
             FROM summary_fts fts
             JOIN summaries s ON s.rowid = fts.rowid
             WHERE summary_fts MATCH ?1
             ORDER BY fts.rank
             LIMIT ?2",
        )
        .map_err(|e| to_store_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![query, limit as i64], |row| {
            Ok(SearchHit {
                summary_id: row.get(0)?,
                text: row.get(1)?,
                score: row.get(2)?,
            })
        })
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut hits = Vec::new();
    for row in rows {
        hits.push(row.map_err(|e| to_store_err(e.to_string()))?);
    }
    Ok(hits)
}
