//! Brute-force cosine similarity search over stored embeddings.

use rusqlite::Connection;

use chronicle_core::cancel::CancelToken;
use chronicle_core::errors::ChronicleResult;
use chronicle_core::model::SearchHit;

use crate::to_store_err;

/// How many rows to scan between cancellation checks.
const CANCEL_CHECK_INTERVAL: usize = 256;

/// Scan all summary embeddings, compute cosine similarity in Rust, and
/// return the `limit` nearest ordered by similarity descending.
///
/// Rows whose stored dimensionality differs from the query are skipped
/// without deserializing the vector.
pub fn vector_query(
    conn: &Connection,
    query_embedding: &[f32],
    limit: usize,
    cancel: &CancelToken,
) -> ChronicleResult<Vec<SearchHit>> {
    // Pre-compute the query norm once; a zero-norm query matches nothing.
    let query_norm_sq: f64 = query_embedding
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum();
    if query_norm_sq == 0.0 {
        return Ok(Vec::new());
    }
    let query_len = query_embedding.len();

    let mut stmt = conn
        .prepare("SELECT id, text, embedding, dimensions FROM summaries")
        .map_err(|e| to_store_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            let id: String = row.get(0)?;
            let text: String = row.get(1)?;
            let blob: Vec<u8> = row.get(2)?;
            let dims: i64 = row.get(3)?;
            Ok((id, text, blob, dims))
        })
        .map_err(|e| to_store_err(e.to_string()))?;

    let mut scored: Vec<SearchHit> = Vec::new();
    for (scanned, row) in rows.enumerate() {
        if scanned % CANCEL_CHECK_INTERVAL == 0 {
            cancel.checkpoint()?;
        }
        let (id, text, blob, dims) = row.map_err(|e| to_store_err(e.to_string()))?;
        if dims as usize != query_len {
            continue;
        }
        let stored = bytes_to_f32_vec(&blob, dims as usize);
        let sim = cosine_similarity(query_embedding, &stored);
        if sim > 0.0 {
            scored.push(SearchHit {
                summary_id: id,
                text,
                score: sim,
            });
        }
    }

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(limit);

    Ok(scored)
}

/// Convert f32 slice to bytes (little-endian).
pub(crate) fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert bytes back to f32 vec.
fn bytes_to_f32_vec(bytes: &[u8], expected_dims: usize) -> Vec<f32> {
    let mut result = Vec::with_capacity(expected_dims);
    for chunk in bytes.chunks_exact(4) {
        result.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    result
}

/// Cosine similarity between two vectors.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    let norm_a: f64 = a
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum::<f64>()
        .sqrt();
    let norm_b: f64 = b
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum::<f64>()
        .sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
