//! Filter to drop posts with too little engagement.
//!
//! Posts with only a handful of likes produce similarity scores that
//! are mostly noise, so the orchestrator can require a minimum like
//! count before a post is worth surfacing.

use crate::traits::Filter;
use anyhow::Result;
use feed_data::FeedIndex;
use recommender::{RecommendationContext, ScoredPost};
use std::sync::Arc;

/// Removes candidates whose like count is below a threshold.
///
/// Candidates missing from the index entirely are dropped too; they
/// cannot be enriched into a displayable recommendation anyway.
pub struct MinimumLikesFilter {
    index: Arc<FeedIndex>,
    min_likes: u32,
}

impl MinimumLikesFilter {
    pub fn new(index: Arc<FeedIndex>, min_likes: u32) -> Self {
        Self { index, min_likes }
    }
}

impl Filter for MinimumLikesFilter {
    fn name(&self) -> &str {
        "MinimumLikesFilter"
    }

    fn apply(
        &self,
        candidates: Vec<ScoredPost>,
        _context: &RecommendationContext,
    ) -> Result<Vec<ScoredPost>> {
        let filtered: Vec<ScoredPost> = candidates
            .into_iter()
            .filter(|candidate| {
                self.index
                    .get_post_stats(&candidate.post_id)
                    .map(|stats| stats.like_count >= self.min_likes)
                    .unwrap_or(false)
            })
            .collect();
        Ok(filtered)
    }
}
