//! Building a validated FeedIndex from snapshot records.
//!
//! Validation rules:
//! - duplicate user or post ids are hard errors
//! - a post whose author is unknown is a hard error
//! - a like from an unknown user is logged and dropped (stale likes
//!   survive account deletion in the upstream store)

use crate::error::{FeedLoadError, Result};
use crate::loader::{self, POSTS_FILE, USERS_FILE};
use crate::types::{FeedIndex, Post, PostStats, User};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::warn;

impl FeedIndex {
    /// Load a complete feed snapshot from a directory containing
    /// `users.json` and `posts.json`.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        let users = loader::load_users(&data_dir.join(USERS_FILE))?;
        let posts = loader::load_posts(&data_dir.join(POSTS_FILE))?;
        Self::from_records(users, posts)
    }

    /// Build a validated index from already-parsed records.
    pub fn from_records(users: Vec<User>, posts: Vec<Post>) -> Result<Self> {
        let mut index = FeedIndex::new();

        for user in users {
            if index.users.contains_key(&user.id) {
                return Err(FeedLoadError::DuplicateId {
                    entity: "user",
                    id: user.id,
                });
            }
            index.insert_user(user);
        }

        let known_users: HashSet<&str> = index.users.keys().map(|id| id.as_str()).collect();

        let mut clean_posts = Vec::with_capacity(posts.len());
        let mut seen_posts: HashSet<String> = HashSet::with_capacity(posts.len());
        for mut post in posts {
            if !seen_posts.insert(post.id.clone()) {
                return Err(FeedLoadError::DuplicateId {
                    entity: "post",
                    id: post.id,
                });
            }
            if !known_users.contains(post.author_id.as_str()) {
                return Err(FeedLoadError::MissingReference {
                    entity: "author",
                    id: post.author_id,
                });
            }

            // Drop likes from users missing in the snapshot
            let before = post.likers.len();
            post.likers.retain(|liker| known_users.contains(liker.as_str()));
            if post.likers.len() < before {
                warn!(
                    post_id = %post.id,
                    dropped = before - post.likers.len(),
                    "Dropped likes from unknown users"
                );
            }

            clean_posts.push(post);
        }
        drop(known_users);

        for post in clean_posts {
            index.insert_post(post);
        }

        index.post_stats = compute_post_stats(&index);

        Ok(index)
    }
}

/// Compute engagement statistics for every post in the index
fn compute_post_stats(index: &FeedIndex) -> HashMap<String, PostStats> {
    let user_count = index.users.len();

    index
        .posts
        .par_iter()
        .map(|(post_id, post)| {
            let like_count = post.likers.len() as u32;
            let engagement_rate = if user_count == 0 {
                0.0
            } else {
                like_count as f32 / user_count as f32
            };
            (
                post_id.clone(),
                PostStats {
                    like_count,
                    engagement_rate,
                },
            )
        })
        .collect()
}
