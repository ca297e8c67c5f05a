//! Retrieval core: overlapping text chunking, durable vector storage, and
//! exhaustive cosine-similarity retrieval.
//!
//! The store keeps the full `id -> (text, embedding)` mapping in memory and
//! mirrors it to a single JSON snapshot on every write; the retriever scans
//! every record per query. Both are deliberate baseline contracts — an ANN
//! index or append-only log can replace the internals without changing the
//! external surface.

pub mod chunker;
pub mod error;
pub mod retriever;
pub mod store;

pub use chunker::{Chunker, ChunkerConfig};
pub use error::{IndexError, Result};
pub use retriever::{RankedResult, Retriever};
pub use store::{VectorRecord, VectorStore};
