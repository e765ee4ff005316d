//! Simple test harness for the recommendation orchestrator.
//!
//! This binary lets you test the end-to-end pipeline by requesting
//! recommendations for a specific user:
//!
//!   cargo run --package server -- <user-id> [data-dir]

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use feed_data::FeedIndex;
use server::RecommendationOrchestrator;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,recommender=debug,pipeline=debug")
        .init();

    info!("Starting recommendation test harness");

    let mut args = std::env::args().skip(1);
    let user_id = args
        .next()
        .ok_or_else(|| anyhow!("usage: server <user-id> [data-dir]"))?;
    let data_dir = args.next().unwrap_or_else(|| "data/snapshot".to_string());

    info!("Loading feed snapshot from {}...", data_dir);
    let index = Arc::new(
        FeedIndex::load_from_files(Path::new(&data_dir))
            .context("Failed to load feed snapshot")?,
    );
    let (users, posts, likes) = index.counts();
    info!("Snapshot loaded: {} users, {} posts, {} likes", users, posts, likes);

    let orchestrator = RecommendationOrchestrator::new(index);

    let limit = 5;
    info!("Getting recommendations for user {} (limit: {})", user_id, limit);
    let recommendations = orchestrator.get_recommendations(&user_id, limit).await?;

    info!("Received {} recommendations:", recommendations.len());
    for (i, rec) in recommendations.iter().enumerate() {
        info!(
            "{}. {} by {} - Score: {:.3} [{:?}]",
            i + 1,
            rec.title,
            rec.author_name,
            rec.score,
            rec.category
        );
        info!("   {}", rec.explanation);
    }

    Ok(())
}
