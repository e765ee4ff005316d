//! Filter to remove posts the user has already liked.
//!
//! The engine excludes liked posts during candidate extraction; this
//! filter keeps that guarantee even when candidates arrive from other
//! producers (cached results, merged sources).

use crate::traits::Filter;
use anyhow::Result;
use recommender::{RecommendationContext, ScoredPost};

/// Removes candidates that the user has already liked.
///
/// ## Algorithm
/// Uses the HashSet in RecommendationContext.liked_posts for O(1) lookups.
pub struct AlreadyLikedFilter;

impl Filter for AlreadyLikedFilter {
    fn name(&self) -> &str {
        "AlreadyLikedFilter"
    }

    fn apply(
        &self,
        candidates: Vec<ScoredPost>,
        context: &RecommendationContext,
    ) -> Result<Vec<ScoredPost>> {
        let filtered: Vec<ScoredPost> = candidates
            .into_iter()
            .filter(|candidate| !context.liked_posts.contains(candidate.post_id.as_str()))
            .collect();
        Ok(filtered)
    }
}
