/// Retrieval subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("lexical search failed: {reason}")]
    LexicalFailed { reason: String },

    #[error("vector search failed: {reason}")]
    VectorFailed { reason: String },

    #[error("query embedding failed: {reason}")]
    EmbeddingFailed { reason: String },

    #[error("relevance scoring failed: {reason}")]
    ScoringFailed { reason: String },
}
