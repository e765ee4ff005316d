//! Filter implementations for scored feed candidates.

pub mod already_liked;
pub mod minimum_likes;
pub mod self_authored;

pub use already_liked::AlreadyLikedFilter;
pub use minimum_likes::MinimumLikesFilter;
pub use self_authored::SelfAuthoredFilter;
