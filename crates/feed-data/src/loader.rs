//! Loader for feed snapshot files.
//!
//! A snapshot directory holds two JSON files exported from the hosted
//! document store:
//! - `users.json`: array of user records
//! - `posts.json`: array of post records (author, category, likers)
//!
//! The loader is strict about structure (malformed JSON and duplicate
//! ids are hard errors) but lenient about dangling like references,
//! which are logged and skipped during indexing.

use crate::error::{FeedLoadError, Result};
use crate::types::{Post, User};
use std::fs;
use std::path::Path;

/// File name for the user snapshot inside a data directory
pub const USERS_FILE: &str = "users.json";

/// File name for the post snapshot inside a data directory
pub const POSTS_FILE: &str = "posts.json";

fn read_snapshot_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(FeedLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// Parse the users.json file into user records
pub fn load_users(path: &Path) -> Result<Vec<User>> {
    let content = read_snapshot_file(path)?;
    serde_json::from_str(&content).map_err(|source| FeedLoadError::JsonError {
        file: path.display().to_string(),
        source,
    })
}

/// Parse the posts.json file into post records
pub fn load_posts(path: &Path) -> Result<Vec<Post>> {
    let content = read_snapshot_file(path)?;
    serde_json::from_str(&content).map_err(|source| FeedLoadError::JsonError {
        file: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PostCategory;
    use std::io::Write;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("feed-data-test-{}-{}", std::process::id(), name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_users_parses_records() {
        let path = write_temp(
            "users-ok.json",
            r#"[
                {"id": "u1", "name": "Ada", "graduation_year": 2027},
                {"id": "u2", "name": "Robotics Club"}
            ]"#,
        );

        let users = load_users(&path).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, "u1");
        assert_eq!(users[0].graduation_year, Some(2027));
        assert_eq!(users[1].graduation_year, None);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_posts_defaults_missing_fields() {
        let path = write_temp(
            "posts-ok.json",
            r#"[
                {"id": "p1", "author_id": "u1", "title": "Hack Night",
                 "category": "event", "likers": ["u2", "u3"]},
                {"id": "p2", "author_id": "u2", "title": "Bake Sale"}
            ]"#,
        );

        let posts = load_posts(&path).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].category, PostCategory::Event);
        assert_eq!(posts[0].likers, vec!["u2".to_string(), "u3".to_string()]);
        // Absent likers and category fall back to defaults
        assert_eq!(posts[1].category, PostCategory::Other);
        assert!(posts[1].likers.is_empty());

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_users_missing_file() {
        let path = Path::new("/nonexistent/users.json");
        let err = load_users(path).unwrap_err();
        assert!(matches!(err, FeedLoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_posts_rejects_malformed_json() {
        let path = write_temp("posts-bad.json", "{not json");
        let err = load_posts(&path).unwrap_err();
        assert!(matches!(err, FeedLoadError::JsonError { .. }));
        std::fs::remove_file(path).ok();
    }
}
