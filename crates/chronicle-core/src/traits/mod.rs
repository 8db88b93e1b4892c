//! Abstract interfaces over external collaborators: the graph store, the
//! embedding model, and the pairwise relevance scorer.

mod embedding;
mod scorer;
mod store;

pub use embedding::Embedder;
pub use scorer::PairScorer;
pub use store::{GraphStore, GraphTx, WriteOp};
