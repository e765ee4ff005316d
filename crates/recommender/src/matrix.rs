//! The post-by-user interaction matrix.
//!
//! Rows are posts, columns are users, and each cell holds the user's
//! rating of the post. Ratings are binary today (1.0 = liked, 0.0 =
//! not liked) but stored as `f64` so the prediction phase generalizes
//! to graded ratings later.

use feed_data::{FeedIndex, Post, PostId, UserId};
use std::collections::HashMap;

type Row = HashMap<UserId, f64>;

/// Dense post-by-user like matrix, built once per computation and
/// immutable during scoring.
///
/// Every post row built by [`InteractionMatrix::build`] contains an
/// entry for every known user, zero-filled. Rows supplied through
/// [`InteractionMatrix::from_rows`] may be sparse; a missing entry
/// reads as rating 0.
#[derive(Debug, Default)]
pub struct InteractionMatrix {
    rows: HashMap<PostId, Row>,
}

impl InteractionMatrix {
    /// Build the dense matrix from post records and the universe of
    /// user ids. Cost is O(P × U). Inputs are not mutated.
    pub fn build<'a, P, U>(posts: P, users: U) -> Self
    where
        P: IntoIterator<Item = &'a Post>,
        U: IntoIterator<Item = &'a str>,
    {
        let user_ids: Vec<&str> = users.into_iter().collect();

        let rows = posts
            .into_iter()
            .map(|post| {
                let row: Row = user_ids
                    .iter()
                    .map(|&user_id| {
                        let rating = if post.likers.iter().any(|liker| liker == user_id) {
                            1.0
                        } else {
                            0.0
                        };
                        (user_id.to_string(), rating)
                    })
                    .collect();
                (post.id.clone(), row)
            })
            .collect();

        Self { rows }
    }

    /// Build the matrix for everything in a loaded feed snapshot.
    pub fn from_index(index: &FeedIndex) -> Self {
        Self::build(index.posts(), index.users().map(|u| u.id.as_str()))
    }

    /// Construct a matrix from raw rows. Rows may cover different user
    /// sets; the similarity phase treats missing entries as rating 0.
    pub fn from_rows(rows: HashMap<PostId, Row>) -> Self {
        Self { rows }
    }

    /// A user's rating of a post. Missing posts or entries read as 0.
    pub fn rating(&self, post_id: &str, user_id: &str) -> f64 {
        self.rows
            .get(post_id)
            .and_then(|row| row.get(user_id))
            .copied()
            .unwrap_or(0.0)
    }

    /// Whether the matrix has a row for this post
    pub fn contains_post(&self, post_id: &str) -> bool {
        self.rows.contains_key(post_id)
    }

    /// Iterate over all post ids in the matrix
    pub fn post_ids(&self) -> impl Iterator<Item = &PostId> {
        self.rows.keys()
    }

    /// Iterate over (post id, row) pairs
    pub fn rows(&self) -> impl Iterator<Item = (&PostId, &Row)> {
        self.rows.iter()
    }

    /// Number of post rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_data::PostCategory;

    fn post(id: &str, likers: &[&str]) -> Post {
        Post {
            id: id.to_string(),
            author_id: "author".to_string(),
            title: format!("Post {}", id),
            category: PostCategory::Other,
            likers: likers.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_build_is_dense_and_zero_filled() {
        let posts = vec![post("p1", &["u1"]), post("p2", &[])];
        let matrix = InteractionMatrix::build(posts.iter(), ["u1", "u2"]);

        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.rating("p1", "u1"), 1.0);
        assert_eq!(matrix.rating("p1", "u2"), 0.0);
        // Post with no likers still has a full zero row
        assert_eq!(matrix.rating("p2", "u1"), 0.0);
        assert_eq!(matrix.rating("p2", "u2"), 0.0);

        // Every row covers every user
        for (_, row) in matrix.rows() {
            assert_eq!(row.len(), 2);
        }
    }

    #[test]
    fn test_likers_outside_user_universe_are_ignored() {
        let posts = vec![post("p1", &["ghost"])];
        let matrix = InteractionMatrix::build(posts.iter(), ["u1"]);

        assert_eq!(matrix.rating("p1", "u1"), 0.0);
        assert_eq!(matrix.rating("p1", "ghost"), 0.0);
    }

    #[test]
    fn test_missing_post_reads_as_zero() {
        let matrix = InteractionMatrix::build(std::iter::empty::<&Post>(), ["u1"]);
        assert_eq!(matrix.rating("nope", "u1"), 0.0);
        assert!(!matrix.contains_post("nope"));
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_from_rows_allows_sparse_rows() {
        let mut rows = HashMap::new();
        rows.insert(
            "p1".to_string(),
            [("u1".to_string(), 1.0)].into_iter().collect(),
        );
        let matrix = InteractionMatrix::from_rows(rows);

        assert_eq!(matrix.rating("p1", "u1"), 1.0);
        assert_eq!(matrix.rating("p1", "u2"), 0.0);
    }
}
