//! Exhaustive cosine-similarity retrieval over the vector store.

use std::sync::Arc;

use crate::error::{IndexError, Result};
use crate::store::VectorStore;

/// Keeps the denominator nonzero when either vector is all-zero.
const EPSILON: f32 = 1e-8;

/// One retrieval hit: the stored chunk text and its similarity to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub text: String,
    pub score: f32,
}

/// Brute-force nearest-neighbor search: every call scores every stored
/// record and recomputes every norm. The store boundary (`all()`) is kept
/// narrow so a precomputed-norm cache or an ANN index can replace this scan
/// without changing the contract.
pub struct Retriever {
    store: Arc<VectorStore>,
}

impl Retriever {
    #[must_use]
    pub fn new(store: Arc<VectorStore>) -> Self {
        Self { store }
    }

    /// Return the `k` stored chunks most similar to `query`, ordered by
    /// descending score. Equal scores keep store id order, so results are
    /// deterministic. An empty store yields an empty sequence; `k` larger
    /// than the store yields everything, fully ranked.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `query` disagrees with the store's
    /// dimensionality.
    pub fn top_k(&self, query: &[f32], k: usize) -> Result<Vec<RankedResult>> {
        let records = self.store.all()?;

        if let Some(first) = records.values().next()
            && first.embedding.len() != query.len()
        {
            return Err(IndexError::DimensionMismatch {
                expected: first.embedding.len(),
                actual: query.len(),
            });
        }

        let mut results: Vec<RankedResult> = records
            .values()
            .map(|r| RankedResult {
                text: r.text.clone(),
                score: cosine_similarity(query, &r.embedding),
            })
            .collect();

        // Stable sort: ties preserve the store's id order.
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(k);
        Ok(results)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    dot / (norm_a * norm_b + EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retriever_with(records: &[(&str, &str, Vec<f32>)]) -> (tempfile::TempDir, Retriever) {
        let dir = tempfile::tempdir().unwrap();
        let store = VectorStore::open(dir.path().join("vectors.json")).unwrap();
        for (id, text, embedding) in records {
            store.put(id, text, embedding.clone()).unwrap();
        }
        (dir, Retriever::new(Arc::new(store)))
    }

    #[test]
    fn empty_store_returns_empty_for_any_k() {
        let (_dir, retriever) = retriever_with(&[]);
        assert!(retriever.top_k(&[1.0, 0.0], 0).unwrap().is_empty());
        assert!(retriever.top_k(&[1.0, 0.0], 3).unwrap().is_empty());
        assert!(retriever.top_k(&[1.0, 0.0], 1000).unwrap().is_empty());
    }

    #[test]
    fn k_larger_than_store_returns_all_ranked() {
        let (_dir, retriever) = retriever_with(&[
            ("a", "alpha", vec![1.0, 0.0]),
            ("b", "beta", vec![0.0, 1.0]),
        ]);
        let results = retriever.top_k(&[1.0, 0.0], 10).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "alpha");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn identical_embedding_scores_near_one_and_ranks_first() {
        let (_dir, retriever) = retriever_with(&[
            ("a", "other", vec![0.0, 1.0, 0.0]),
            ("b", "exact", vec![0.6, 0.0, 0.8]),
        ]);
        let results = retriever.top_k(&[0.6, 0.0, 0.8], 2).unwrap();
        assert_eq!(results[0].text, "exact");
        assert!((results[0].score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        let (_dir, retriever) = retriever_with(&[("a", "t", vec![0.0, 1.0])]);
        let results = retriever.top_k(&[1.0, 0.0], 1).unwrap();
        assert!(results[0].score.abs() < 1e-6);
    }

    #[test]
    fn zero_vector_does_not_divide_by_zero() {
        let (_dir, retriever) = retriever_with(&[("a", "t", vec![0.0, 0.0])]);
        let results = retriever.top_k(&[0.0, 0.0], 1).unwrap();
        assert!(results[0].score.is_finite());
        assert!(results[0].score.abs() < 1e-6);
    }

    #[test]
    fn ties_keep_id_order() {
        // All records identical to the query: every score ties at ~1.0.
        let (_dir, retriever) = retriever_with(&[
            ("c", "third", vec![1.0, 1.0]),
            ("a", "first", vec![1.0, 1.0]),
            ("b", "second", vec![1.0, 1.0]),
        ]);
        let results = retriever.top_k(&[1.0, 1.0], 3).unwrap();
        let texts: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn identical_queries_return_identical_results() {
        let (_dir, retriever) = retriever_with(&[
            ("a", "one", vec![0.9, 0.1]),
            ("b", "two", vec![0.1, 0.9]),
            ("c", "three", vec![0.5, 0.5]),
        ]);
        let first = retriever.top_k(&[0.7, 0.3], 3).unwrap();
        let second = retriever.top_k(&[0.7, 0.3], 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn query_dimension_mismatch_errors() {
        let (_dir, retriever) = retriever_with(&[("a", "t", vec![1.0, 0.0, 0.0])]);
        let err = retriever.top_k(&[1.0, 0.0], 1).unwrap_err();
        assert!(matches!(
            err,
            IndexError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn scale_invariance_of_cosine() {
        let score_small = cosine_similarity(&[1.0, 2.0], &[2.0, 1.0]);
        let score_large = cosine_similarity(&[10.0, 20.0], &[200.0, 100.0]);
        assert!((score_small - score_large).abs() < 1e-5);
    }
}
