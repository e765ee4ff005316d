//! Core domain types for the campus feed.
//!
//! The upstream document store exposes opaque string document ids, so
//! both identifier aliases are `String` rather than integers. The
//! structs here carry only the fields the recommendation core and the
//! CLI surfaces actually need, decoupled from the richer persisted
//! schema.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user ids with post ids

/// Unique identifier for a user (opaque document id)
pub type UserId = String;

/// Unique identifier for a post (opaque document id)
pub type PostId = String;

// =============================================================================
// User-related Types
// =============================================================================

/// Represents a student or organization account in the feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Expected graduation year; organizations leave this unset
    #[serde(default)]
    pub graduation_year: Option<u16>,
}

// =============================================================================
// Post-related Types
// =============================================================================

/// Broad category a post belongs to, as tagged by its author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostCategory {
    Event,
    Club,
    Announcement,
    Fundraiser,
    Social,
    Academic,
    Sports,
    Other,
}

impl Default for PostCategory {
    fn default() -> Self {
        PostCategory::Other
    }
}

/// Represents a feed post (event, club announcement, etc.)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub title: String,
    #[serde(default)]
    pub category: PostCategory,
    /// Ids of users who liked this post.
    ///
    /// An absent or empty collection means the post has no likes yet.
    #[serde(default)]
    pub likers: Vec<UserId>,
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Precomputed engagement statistics for a post
///
/// Computed once when the snapshot is indexed, for fast lookups later
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PostStats {
    pub like_count: u32,
    /// Fraction of all known users that liked this post, in [0, 1]
    pub engagement_rate: f32,
}

// =============================================================================
// FeedIndex - The Core In-Memory Store
// =============================================================================

/// Main data structure that holds one feed snapshot and its indices.
///
/// This is the heart of the feed-data crate. It provides O(1) lookups
/// for users, posts, and like relationships through HashMap indices.
/// Once loaded it is read-only, so it can be shared across threads
/// behind an `Arc` without locking.
#[derive(Debug)]
pub struct FeedIndex {
    // Primary data stores
    pub(crate) users: HashMap<UserId, User>,
    pub(crate) posts: HashMap<PostId, Post>,

    // Like indices for fast lookups
    /// All posts each user has liked
    pub(crate) liked_by_user: HashMap<UserId, Vec<PostId>>,

    // Secondary indices for specialized queries
    /// Posts written by each author
    pub(crate) author_index: HashMap<UserId, Vec<PostId>>,
    /// Posts grouped by category
    pub(crate) category_index: HashMap<PostCategory, Vec<PostId>>,

    // Precomputed statistics
    pub(crate) post_stats: HashMap<PostId, PostStats>,
}

impl FeedIndex {
    /// Creates a new, empty FeedIndex
    pub fn new() -> Self {
        Self {
            users: HashMap::new(),
            posts: HashMap::new(),
            liked_by_user: HashMap::new(),
            author_index: HashMap::new(),
            category_index: HashMap::new(),
            post_stats: HashMap::new(),
        }
    }

    // Getters - these return references, never owned copies

    /// Get a user by id
    pub fn get_user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Get a post by id
    pub fn get_post(&self, id: &str) -> Option<&Post> {
        self.posts.get(id)
    }

    /// Get the ids of all posts a user has liked
    ///
    /// Returns an empty slice if the user has liked nothing
    pub fn get_liked_posts(&self, user_id: &str) -> &[PostId] {
        self.liked_by_user
            .get(user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get the ids of all posts written by an author
    pub fn get_authored_posts(&self, user_id: &str) -> &[PostId] {
        self.author_index
            .get(user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all posts in a specific category
    pub fn get_posts_in_category(&self, category: PostCategory) -> &[PostId] {
        self.category_index
            .get(&category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get precomputed engagement statistics for a post
    pub fn get_post_stats(&self, post_id: &str) -> Option<&PostStats> {
        self.post_stats.get(post_id)
    }

    /// Iterate over all users in the snapshot
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Iterate over all posts in the snapshot
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    // Mutators - used while a snapshot is being indexed

    /// Insert a user into the index
    pub fn insert_user(&mut self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Insert a post and update the like/author/category indices
    pub fn insert_post(&mut self, post: Post) {
        for liker in &post.likers {
            self.liked_by_user
                .entry(liker.clone())
                .or_insert_with(Vec::new)
                .push(post.id.clone());
        }

        self.author_index
            .entry(post.author_id.clone())
            .or_insert_with(Vec::new)
            .push(post.id.clone());

        self.category_index
            .entry(post.category)
            .or_insert_with(Vec::new)
            .push(post.id.clone());

        self.posts.insert(post.id.clone(), post);
    }

    /// Get counts for debugging/validation: (users, posts, likes)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_likes = self.posts.values().map(|p| p.likers.len()).sum();
        (self.users.len(), self.posts.len(), total_likes)
    }
}

impl Default for FeedIndex {
    fn default() -> Self {
        Self::new()
    }
}
