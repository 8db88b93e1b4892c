use crate::errors::ChronicleResult;

/// External embedding function: text in, fixed-length vector out.
///
/// The retrieval and versioning engines never compute embeddings themselves;
/// they call whatever implementation was injected at startup.
pub trait Embedder: Send + Sync {
    /// Embed a single text, returning a vector of floats.
    fn embed(&self, text: &str) -> ChronicleResult<Vec<f32>>;

    /// The dimensionality of vectors produced by this embedder.
    fn dimensions(&self) -> usize;

    /// Human-readable provider name.
    fn name(&self) -> &str;
}
