use crate::errors::ChronicleResult;

/// External pairwise relevance scorer (cross-encoder stand-in): scores a
/// (query, document) pair, higher meaning more relevant. Scores are only
/// compared against each other within a single query, so no particular range
/// is required.
pub trait PairScorer: Send + Sync {
    fn score(&self, query: &str, document: &str) -> ChronicleResult<f64>;

    /// Score one query against many documents. The default loops over
    /// [`score`](Self::score); batching implementations may override.
    fn score_batch(&self, query: &str, documents: &[&str]) -> ChronicleResult<Vec<f64>> {
        documents.iter().map(|doc| self.score(query, doc)).collect()
    }

    /// Human-readable scorer name.
    fn name(&self) -> &str;
}
