//! Item-based collaborative filtering over the interaction matrix.
//!
//! ## Algorithm
//! 1. Compute (or receive) the pairwise post similarity table
//! 2. For each candidate post — in the matrix, not liked by the target
//!    user, not authored by them — take the weighted average of its
//!    similarities to every post the user liked, weighted by the
//!    user's rating of that liked post
//! 3. Sort descending by predicted score and truncate to the cap
//!
//! Every degenerate case (no liked posts, no candidates, no similarity
//! signal) resolves to a zero score or an empty list, never an error.
//! Callers rely on always receiving a well-formed, possibly-empty list.

use crate::context::RecommendationContext;
use crate::matrix::InteractionMatrix;
use crate::similarity::SimilarityTable;
use feed_data::PostId;
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Default cap on the number of returned recommendations
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 5;

/// A candidate post with its predicted relevance score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPost {
    pub post_id: PostId,
    /// Signed prediction score; bounded by [-1, 1] for binary ratings
    pub score: f64,
}

/// Item-based collaborative filtering recommender.
///
/// Stateless between calls: each invocation works only on the matrix
/// and context it is handed, so concurrent calls for different users
/// are safe without locking.
#[derive(Debug, Clone)]
pub struct Recommender {
    max_recommendations: usize,
}

impl Recommender {
    pub fn new() -> Self {
        Self {
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
        }
    }

    /// Configure the recommendation cap (default: 5)
    pub fn with_max_recommendations(mut self, max: usize) -> Self {
        self.max_recommendations = max;
        self
    }

    /// One-shot entry point: compute the similarity table for this
    /// matrix, score all candidates, and return the ranked top N.
    #[instrument(skip(self, matrix, context), fields(user_id = %context.user_id))]
    pub fn generate(
        &self,
        matrix: &InteractionMatrix,
        context: &RecommendationContext,
    ) -> Vec<ScoredPost> {
        let similarities = SimilarityTable::compute(matrix);
        let scored = self.score_candidates(matrix, &similarities, context);
        self.rank(scored, self.max_recommendations)
    }

    /// Score every candidate post for the target user.
    ///
    /// Candidates are posts present in the matrix that the user has
    /// neither liked nor authored. The returned list is unsorted.
    pub fn score_candidates(
        &self,
        matrix: &InteractionMatrix,
        similarities: &SimilarityTable,
        context: &RecommendationContext,
    ) -> Vec<ScoredPost> {
        // Fix the summation order so scores are bit-for-bit reproducible
        let mut liked: Vec<&str> = context.liked_posts.iter().map(|s| s.as_str()).collect();
        liked.sort_unstable();

        let scored: Vec<ScoredPost> = matrix
            .post_ids()
            .filter(|post_id| {
                !context.liked_posts.contains(post_id.as_str())
                    && !context.authored_posts.contains(post_id.as_str())
            })
            .map(|candidate| ScoredPost {
                post_id: candidate.clone(),
                score: self.predict(matrix, similarities, &context.user_id, &liked, candidate),
            })
            .collect();

        debug!(
            user_id = %context.user_id,
            candidates = scored.len(),
            liked = context.liked_posts.len(),
            "Scored candidate posts"
        );
        scored
    }

    /// Sort scored posts descending by score and truncate.
    ///
    /// Ties on score break by post id ascending, making the output
    /// deterministic regardless of input order. The effective limit is
    /// never larger than the configured cap.
    pub fn rank(&self, mut scored: Vec<ScoredPost>, limit: usize) -> Vec<ScoredPost> {
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.post_id.cmp(&b.post_id))
        });
        scored.truncate(limit.min(self.max_recommendations));
        scored
    }

    /// Weighted average of the candidate's similarity to each liked
    /// post, weighted by the user's rating of the liked post.
    ///
    /// A zero denominator (no liked posts, or no similarity signal)
    /// yields a score of 0 rather than a division error.
    fn predict(
        &self,
        matrix: &InteractionMatrix,
        similarities: &SimilarityTable,
        user_id: &str,
        liked_posts: &[&str],
        candidate: &str,
    ) -> f64 {
        let mut weighted_sum = 0.0;
        let mut similarity_total = 0.0;

        for &liked in liked_posts {
            let sim = similarities.get(candidate, liked);
            let rating = matrix.rating(liked, user_id);
            weighted_sum += sim * rating;
            similarity_total += sim.abs();
        }

        if similarity_total == 0.0 {
            0.0
        } else {
            weighted_sum / similarity_total
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}
