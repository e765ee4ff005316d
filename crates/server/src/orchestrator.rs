//! # Recommendation Orchestrator
//!
//! This module coordinates the recommendation pipeline:
//! 1. Precompute the interaction matrix and similarity table for the
//!    loaded snapshot (once, at construction)
//! 2. Per request: build the target user's context
//! 3. Score all candidate posts (CPU-bound, on a blocking thread)
//! 4. Apply the filter pipeline
//! 5. Rank, truncate, and enrich with post metadata
//!
//! The pairwise similarity phase is O(P² · U), so it runs once per
//! snapshot and is shared (Arc) across every per-user request instead
//! of being recomputed per call. The engine itself stays cache-free.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use feed_data::{FeedIndex, PostCategory, PostId, UserId};
use pipeline::FilterPipeline;
use pipeline::filters::{AlreadyLikedFilter, MinimumLikesFilter, SelfAuthoredFilter};
use recommender::{
    InteractionMatrix, RecommendationContext, Recommender, ScoredPost, SimilarityTable,
    build_recommendation_context,
};

/// Minimum like count a post needs before the orchestrator surfaces it
const DEFAULT_MIN_LIKES: u32 = 1;

/// Final recommendation returned to the caller
#[derive(Debug, Clone)]
pub struct PostRecommendation {
    pub post_id: PostId,
    pub title: String,
    pub author_id: UserId,
    pub author_name: String,
    pub category: PostCategory,
    pub score: f64,
    pub explanation: String,
}

/// Main orchestrator that coordinates the recommendation pipeline
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    index: Arc<FeedIndex>,
    matrix: Arc<InteractionMatrix>,
    similarities: Arc<SimilarityTable>,
    recommender: Recommender,
    filter_pipeline: Arc<FilterPipeline>,
}

impl RecommendationOrchestrator {
    /// Create a new orchestrator over a loaded feed snapshot.
    ///
    /// Precomputes the interaction matrix and the full pairwise
    /// similarity table up front, so this is the expensive call;
    /// per-user requests afterwards only do the prediction phase.
    pub fn new(index: Arc<FeedIndex>) -> Self {
        let start = Instant::now();

        let matrix = Arc::new(InteractionMatrix::from_index(&index));
        let similarities = Arc::new(SimilarityTable::compute(&matrix));

        let filter_pipeline = Arc::new(
            FilterPipeline::new()
                .add_filter(AlreadyLikedFilter)
                .add_filter(SelfAuthoredFilter)
                .add_filter(MinimumLikesFilter::new(index.clone(), DEFAULT_MIN_LIKES)),
        );

        info!(
            posts = matrix.len(),
            pairs = similarities.len(),
            elapsed = ?start.elapsed(),
            "Precomputed similarity table for snapshot"
        );

        Self {
            index,
            matrix,
            similarities,
            recommender: Recommender::new(),
            filter_pipeline,
        }
    }

    /// Main entry point: get recommendations for a user.
    ///
    /// # Arguments
    /// * `user_id` - The user to generate recommendations for
    /// * `limit` - Number of recommendations to return; the engine's
    ///   own cap (5) still applies, so the effective limit is the
    ///   smaller of the two
    ///
    /// # Returns
    /// Vector of PostRecommendation sorted by score (highest first)
    pub async fn get_recommendations(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<PostRecommendation>> {
        let start_time = Instant::now();

        // Build user context
        let context = self.build_context(user_id)?;
        info!(
            user_id,
            liked = context.liked_posts.len(),
            authored = context.authored_posts.len(),
            "Built recommendation context"
        );

        // Score candidates on a blocking thread; scoring walks every
        // post in the matrix
        let scored = self.score_candidates(context.clone()).await?;
        info!(user_id, candidates = scored.len(), "Scored candidates");

        // Apply filters
        let filtered = self
            .filter_pipeline
            .apply(scored, &context)
            .context("Failed to apply filters")?;
        info!(user_id, remaining = filtered.len(), "Applied filters");

        // Rank, truncate, and enrich
        let recommendations = self.rank_and_select(filtered, &context, limit);
        info!(
            user_id,
            returned = recommendations.len(),
            elapsed = ?start_time.elapsed(),
            "Selected recommendations"
        );

        Ok(recommendations)
    }

    /// Build the target user's context from the snapshot
    fn build_context(&self, user_id: &str) -> Result<RecommendationContext> {
        build_recommendation_context(&self.index, user_id)
            .context("Failed to build recommendation context")
    }

    /// Run the prediction phase on a blocking thread
    async fn score_candidates(&self, context: RecommendationContext) -> Result<Vec<ScoredPost>> {
        let matrix = self.matrix.clone();
        let similarities = self.similarities.clone();
        let recommender = self.recommender.clone();

        let scored = tokio::task::spawn_blocking(move || {
            recommender.score_candidates(&matrix, &similarities, &context)
        })
        .await
        .context("Scoring task panicked")?;

        Ok(scored)
    }

    /// Rank filtered candidates and enrich the survivors with post
    /// metadata from the index
    fn rank_and_select(
        &self,
        filtered: Vec<ScoredPost>,
        context: &RecommendationContext,
        limit: usize,
    ) -> Vec<PostRecommendation> {
        let ranked = self.recommender.rank(filtered, limit);

        ranked
            .into_iter()
            .filter_map(|scored| {
                let post = self.index.get_post(&scored.post_id)?;
                let author_name = self
                    .index
                    .get_user(&post.author_id)
                    .map(|u| u.name.clone())
                    .unwrap_or_default();
                Some(PostRecommendation {
                    post_id: scored.post_id,
                    title: post.title.clone(),
                    author_id: post.author_id.clone(),
                    author_name,
                    category: post.category,
                    score: scored.score,
                    explanation: format!(
                        "Predicted affinity {:.2} from {} liked post(s)",
                        scored.score,
                        context.liked_posts.len()
                    ),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_data::{Post, User};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            graduation_year: None,
        }
    }

    fn post(id: &str, author: &str, title: &str, likers: &[&str]) -> Post {
        Post {
            id: id.to_string(),
            author_id: author.to_string(),
            title: title.to_string(),
            category: PostCategory::Event,
            likers: likers.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Small feed where u1 liked "seed"; "twin" shares both of seed's
    /// likers, "stranger" shares none, "mine" is u1's own post.
    fn build_test_index() -> Arc<FeedIndex> {
        let users = vec![
            user("u1", "Ada"),
            user("u2", "Grace"),
            user("u3", "Alan"),
        ];
        let posts = vec![
            post("seed", "u3", "Robotics Demo", &["u1", "u2"]),
            post("twin", "u3", "Hack Night", &["u2", "u3"]),
            post("stranger", "u2", "Chess Meetup", &["u3"]),
            post("mine", "u1", "My Study Group", &["u2"]),
        ];
        Arc::new(FeedIndex::from_records(users, posts).unwrap())
    }

    #[tokio::test]
    async fn test_recommendations_exclude_liked_and_authored() {
        let orchestrator = RecommendationOrchestrator::new(build_test_index());

        let recs = orchestrator.get_recommendations("u1", 5).await.unwrap();

        let ids: Vec<&str> = recs.iter().map(|r| r.post_id.as_str()).collect();
        assert!(!ids.contains(&"seed"), "liked post must not be recommended");
        assert!(!ids.contains(&"mine"), "own post must not be recommended");
        assert!(ids.contains(&"twin"));
    }

    #[tokio::test]
    async fn test_recommendations_are_ranked_and_enriched() {
        let orchestrator = RecommendationOrchestrator::new(build_test_index());

        let recs = orchestrator.get_recommendations("u1", 5).await.unwrap();

        // twin shares liker u2 with seed; stranger shares nobody
        assert_eq!(recs[0].post_id, "twin");
        assert_eq!(recs[0].title, "Hack Night");
        assert_eq!(recs[0].author_name, "Alan");
        assert_eq!(recs[0].category, PostCategory::Event);
        assert!(recs[0].score > 0.0);
        assert!(recs[0].explanation.contains("Predicted affinity"));

        // Scores are descending
        for pair in recs.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[tokio::test]
    async fn test_limit_is_respected() {
        let orchestrator = RecommendationOrchestrator::new(build_test_index());

        let recs = orchestrator.get_recommendations("u1", 1).await.unwrap();
        assert_eq!(recs.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_user_is_an_error() {
        let orchestrator = RecommendationOrchestrator::new(build_test_index());

        let result = orchestrator.get_recommendations("ghost", 5).await;
        assert!(result.is_err(), "Should fail for missing user");
    }

    #[tokio::test]
    async fn test_user_with_no_likes_gets_a_list_not_an_error() {
        let users = vec![user("u1", "Ada"), user("u2", "Grace")];
        let posts = vec![
            post("p1", "u2", "Event A", &["u2"]),
            post("p2", "u2", "Event B", &["u2"]),
        ];
        let index = Arc::new(FeedIndex::from_records(users, posts).unwrap());
        let orchestrator = RecommendationOrchestrator::new(index);

        let recs = orchestrator.get_recommendations("u1", 5).await.unwrap();

        // No like history: everything scores 0 but the list is well
        // formed and deterministic (post id ascending)
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].post_id, "p1");
        assert_eq!(recs[1].post_id, "p2");
        assert!(recs.iter().all(|r| r.score == 0.0));
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_the_snapshot() {
        let orchestrator = RecommendationOrchestrator::new(build_test_index());

        let (a, b) = tokio::join!(
            orchestrator.get_recommendations("u1", 5),
            orchestrator.get_recommendations("u2", 5),
        );

        assert!(a.is_ok());
        assert!(b.is_ok());
    }
}
