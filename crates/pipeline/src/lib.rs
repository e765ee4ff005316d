//! Pipeline for filtering scored feed candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//!
//! ## Architecture
//! The engine already excludes liked and self-authored posts while
//! extracting candidates; the pipeline re-asserts those rules and adds
//! service-level policies (like-count floors) on top, so the
//! guarantees hold no matter where a candidate list came from.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FilterPipeline;
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(AlreadyLikedFilter)
//!     .add_filter(SelfAuthoredFilter)
//!     .add_filter(MinimumLikesFilter::new(index.clone(), 2));
//!
//! let filtered = pipeline.apply(candidates, &context)?;
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;
