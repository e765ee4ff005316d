//! Filter to remove the user's own posts.
//!
//! Recommending someone their own event back is never useful, so this
//! mirrors the engine's self-authored exclusion at the pipeline layer.

use crate::traits::Filter;
use anyhow::Result;
use recommender::{RecommendationContext, ScoredPost};

/// Removes candidates written by the target user.
pub struct SelfAuthoredFilter;

impl Filter for SelfAuthoredFilter {
    fn name(&self) -> &str {
        "SelfAuthoredFilter"
    }

    fn apply(
        &self,
        candidates: Vec<ScoredPost>,
        context: &RecommendationContext,
    ) -> Result<Vec<ScoredPost>> {
        let filtered: Vec<ScoredPost> = candidates
            .into_iter()
            .filter(|candidate| !context.authored_posts.contains(candidate.post_id.as_str()))
            .collect();
        Ok(filtered)
    }
}
