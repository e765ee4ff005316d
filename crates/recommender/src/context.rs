//! Helper functions to build a RecommendationContext from a FeedIndex
//!
//! This module aggregates everything the scoring phase needs to know
//! about the target user up front, so candidate scoring never touches
//! the index again: the liked-post set and the self-authored set, both
//! as HashSets for O(1) exclusion checks.

use anyhow::{Result, anyhow};
use feed_data::{FeedIndex, PostId, UserId};
use std::collections::HashSet;

/// Per-request view of the target user for the recommender.
#[derive(Debug, Clone)]
pub struct RecommendationContext {
    pub user_id: UserId,
    /// Posts the user has already liked
    pub liked_posts: HashSet<PostId>,
    /// Posts the user wrote themselves (never recommended back)
    pub authored_posts: HashSet<PostId>,
}

impl RecommendationContext {
    /// Create an empty context for a user
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            liked_posts: HashSet::new(),
            authored_posts: HashSet::new(),
        }
    }
}

/// Build a RecommendationContext for a given user from a loaded snapshot
pub fn build_recommendation_context(index: &FeedIndex, user_id: &str) -> Result<RecommendationContext> {
    // Verify user exists
    let _user = index
        .get_user(user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;

    let mut context = RecommendationContext::new(user_id);

    for post_id in index.get_liked_posts(user_id) {
        context.liked_posts.insert(post_id.clone());
    }
    for post_id in index.get_authored_posts(user_id) {
        context.authored_posts.insert(post_id.clone());
    }

    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_data::{Post, PostCategory, User};

    fn test_index() -> FeedIndex {
        FeedIndex::from_records(
            vec![
                User {
                    id: "u1".to_string(),
                    name: "Ada".to_string(),
                    graduation_year: None,
                },
                User {
                    id: "u2".to_string(),
                    name: "Grace".to_string(),
                    graduation_year: None,
                },
            ],
            vec![
                Post {
                    id: "p1".to_string(),
                    author_id: "u1".to_string(),
                    title: "Study Group".to_string(),
                    category: PostCategory::Academic,
                    likers: vec!["u2".to_string()],
                },
                Post {
                    id: "p2".to_string(),
                    author_id: "u2".to_string(),
                    title: "Game Night".to_string(),
                    category: PostCategory::Social,
                    likers: vec!["u1".to_string()],
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_build_context_gathers_sets() {
        let index = test_index();
        let context = build_recommendation_context(&index, "u1").unwrap();

        assert_eq!(context.user_id, "u1");
        assert!(context.liked_posts.contains("p2"));
        assert!(!context.liked_posts.contains("p1"));
        assert!(context.authored_posts.contains("p1"));
        assert_eq!(context.liked_posts.len(), 1);
        assert_eq!(context.authored_posts.len(), 1);
    }

    #[test]
    fn test_build_context_unknown_user_fails() {
        let index = test_index();
        assert!(build_recommendation_context(&index, "missing").is_err());
    }
}
