//! # Recommender Crate
//!
//! Item-based collaborative filtering for the campus feed.
//!
//! ## Components
//!
//! - **matrix**: dense post-by-user interaction matrix
//! - **similarity**: cosine similarity and the pairwise similarity table
//! - **context**: per-request view of the target user
//! - **recommend**: prediction scoring and ranked output
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::{InteractionMatrix, Recommender, build_recommendation_context};
//! use feed_data::FeedIndex;
//!
//! let index = FeedIndex::load_from_files("data/snapshot".as_ref())?;
//!
//! let matrix = InteractionMatrix::from_index(&index);
//! let context = build_recommendation_context(&index, "u-42")?;
//!
//! let recs = Recommender::new().generate(&matrix, &context);
//! for rec in recs {
//!     println!("{} ({:.3})", rec.post_id, rec.score);
//! }
//! ```
//!
//! The core is stateless and synchronous: it never touches I/O, never
//! caches between calls, and maps every degenerate input to a neutral
//! value instead of an error. Calls for different users can run in
//! parallel without coordination; callers serving many users should
//! compute the matrix and similarity table once per data snapshot and
//! reuse them (see the server crate's orchestrator).

// Public modules
pub mod context;
pub mod matrix;
pub mod recommend;
pub mod similarity;

// Re-export commonly used types
pub use context::{RecommendationContext, build_recommendation_context};
pub use matrix::InteractionMatrix;
pub use recommend::{DEFAULT_MAX_RECOMMENDATIONS, Recommender, ScoredPost};
pub use similarity::{PostPair, SimilarityTable, cosine_similarity};
