use serde::{Deserialize, Serialize};

/// One row from a lexical or vector query, ordered by score descending.
/// Lexical scores are BM25 relevance, vector scores cosine similarity; the
/// two are not comparable in magnitude, which is why fusion uses ranks.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub summary_id: String,
    pub text: String,
    pub score: f64,
}

/// A candidate after RRF fusion, before hydration. Owned solely by the query
/// invocation and discarded once the response is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedHit {
    pub summary_id: String,
    /// Accumulated `1/(k + rank)` contributions across the input lists.
    pub score: f64,
}

/// A hydrated result row: the matched summary together with its owning
/// project. `score` carries the reranker's relevance when reranking ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMatch {
    pub project_id: String,
    pub question: String,
    pub summary_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}
