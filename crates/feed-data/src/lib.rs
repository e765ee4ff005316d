//! # Feed Data Crate
//!
//! This crate handles loading and indexing a campus feed snapshot.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (User, Post, PostStats, FeedIndex)
//! - **loader**: Parse JSON snapshot files into Rust structs
//! - **index**: Validate records and build efficient lookup indices
//! - **error**: Error types for snapshot loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use feed_data::FeedIndex;
//! use std::path::Path;
//!
//! // Load an exported snapshot (users.json + posts.json)
//! let index = FeedIndex::load_from_files(Path::new("data/snapshot"))?;
//!
//! // Query data
//! let user = index.get_user("u-42").unwrap();
//! let liked = index.get_liked_posts("u-42");
//!
//! println!("{} liked {} posts", user.name, liked.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod loader;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{FeedLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    PostId,
    // Core types
    User,
    Post,
    FeedIndex,
    PostStats,
    // Enums
    PostCategory,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_index_creation() {
        // Test that we can create an empty FeedIndex
        let index = FeedIndex::new();
        let (users, posts, likes) = index.counts();

        assert_eq!(users, 0);
        assert_eq!(posts, 0);
        assert_eq!(likes, 0);
    }

    #[test]
    fn test_insert_user() {
        let mut index = FeedIndex::new();

        let user = User {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            graduation_year: Some(2027),
        };

        index.insert_user(user.clone());

        let retrieved = index.get_user("u1").unwrap();
        assert_eq!(retrieved.id, "u1");
        assert_eq!(retrieved.graduation_year, Some(2027));
    }

    #[test]
    fn test_insert_post_updates_indices() {
        let mut index = FeedIndex::new();

        let post = Post {
            id: "p1".to_string(),
            author_id: "u1".to_string(),
            title: "Robotics Club Kickoff".to_string(),
            category: PostCategory::Club,
            likers: vec!["u2".to_string(), "u3".to_string()],
        };

        index.insert_post(post.clone());

        let retrieved = index.get_post("p1").unwrap();
        assert_eq!(retrieved.title, "Robotics Club Kickoff");
        assert_eq!(retrieved.likers.len(), 2);

        assert_eq!(index.get_liked_posts("u2"), &["p1".to_string()]);
        assert_eq!(index.get_liked_posts("u3"), &["p1".to_string()]);
        assert_eq!(index.get_authored_posts("u1"), &["p1".to_string()]);
        assert_eq!(index.get_posts_in_category(PostCategory::Club), &["p1".to_string()]);
    }

    #[test]
    fn test_empty_queries() {
        let index = FeedIndex::new();

        // Querying non-existent data should return None or empty slices
        assert!(index.get_user("missing").is_none());
        assert!(index.get_post("missing").is_none());
        assert!(index.get_liked_posts("missing").is_empty());
        assert!(index.get_authored_posts("missing").is_empty());
        assert!(index.get_posts_in_category(PostCategory::Sports).is_empty());
        assert!(index.get_post_stats("missing").is_none());
    }
}
