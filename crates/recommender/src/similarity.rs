//! Cosine similarity and the pairwise post similarity table.
//!
//! ## Algorithm
//! 1. Collect the post rows of the interaction matrix in id order
//! 2. For every unordered pair of distinct posts:
//!    - Take the union of user ids present in either row
//!    - Build two aligned rating vectors over that union (missing
//!      entries read as 0, so sparse rows are tolerated)
//!    - Compute their cosine similarity
//! 3. Key each score by a canonical `PostPair` so lookups are
//!    order-independent and each pair is computed exactly once
//!
//! The pair loop is O(P²) with O(U) work per pair, so the outer loop
//! runs on rayon.

use crate::matrix::InteractionMatrix;
use feed_data::PostId;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Cosine similarity between two equal-length rating vectors.
///
/// Degenerate inputs fail soft instead of erroring:
/// - mismatched lengths return 0.0
/// - a zero-norm vector on either side returns 0.0
///
/// Otherwise returns dot(a, b) / (‖a‖ · ‖b‖), a value in [-1, 1].
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|y| y * y).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Canonical key for an unordered pair of posts.
///
/// The lexicographically larger id is always stored first, so
/// `PostPair::new(a, b) == PostPair::new(b, a)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostPair(PostId, PostId);

impl PostPair {
    pub fn new(a: &str, b: &str) -> Self {
        if a >= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }
}

/// Precomputed cosine similarities for every distinct pair of posts
/// in one interaction matrix. Read-only once computed.
#[derive(Debug, Default)]
pub struct SimilarityTable {
    scores: HashMap<PostPair, f64>,
}

impl SimilarityTable {
    /// Compute similarities for all post pairs in the matrix.
    pub fn compute(matrix: &InteractionMatrix) -> Self {
        // Sort rows by post id so pair enumeration is deterministic
        let mut rows: Vec<_> = matrix.rows().collect();
        rows.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let scores = (0..rows.len())
            .into_par_iter()
            .fold(
                || HashMap::new(),
                |mut local_scores, i| {
                    let (post_a, row_a) = rows[i];
                    for &(post_b, row_b) in &rows[i + 1..] {
                        let sim = row_similarity(row_a, row_b);
                        local_scores.insert(PostPair::new(post_a, post_b), sim);
                    }
                    local_scores
                },
            )
            .reduce(
                || HashMap::new(),
                |mut acc, local_scores| {
                    acc.extend(local_scores);
                    acc
                },
            );

        debug!(posts = rows.len(), pairs = scores.len(), "Computed similarity table");
        Self { scores }
    }

    /// Similarity between two distinct posts, in either argument order.
    ///
    /// Pairs absent from the table score 0.0.
    pub fn get(&self, a: &str, b: &str) -> f64 {
        self.scores
            .get(&PostPair::new(a, b))
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Cosine similarity of two matrix rows over the union of their users.
fn row_similarity(row_a: &HashMap<String, f64>, row_b: &HashMap<String, f64>) -> f64 {
    let mut users: Vec<&str> = row_a.keys().chain(row_b.keys()).map(|u| u.as_str()).collect();
    users.sort_unstable();
    users.dedup();

    let vec_a: Vec<f64> = users.iter().map(|u| row_a.get(*u).copied().unwrap_or(0.0)).collect();
    let vec_b: Vec<f64> = users.iter().map(|u| row_b.get(*u).copied().unwrap_or(0.0)).collect();

    cosine_similarity(&vec_a, &vec_b)
}
