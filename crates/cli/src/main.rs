use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use feed_data::FeedIndex;
use server::{PostRecommendation, RecommendationOrchestrator};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// campus-recs - Campus feed recommendation engine
#[derive(Parser)]
#[command(name = "campus-recs")]
#[command(about = "Post recommendations for the campus feed using collaborative filtering", long_about = None)]
struct Cli {
    /// Path to a feed snapshot directory (users.json + posts.json)
    #[arg(short, long, default_value = "data/snapshot")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get post recommendations for a user
    Recommend {
        /// User id to get recommendations for
        #[arg(long)]
        user_id: String,

        /// Number of recommendations to return (capped at 5 by the engine)
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Show the explanation for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Show a user's profile and like history
    User {
        /// User id to display
        #[arg(long)]
        user_id: String,
    },

    /// Show a post and its engagement statistics
    Post {
        /// Post id to display
        #[arg(long)]
        post_id: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the feed snapshot
    println!("Loading feed snapshot from {}...", cli.data_dir.display());
    let start = Instant::now();
    let index = Arc::new(
        FeedIndex::load_from_files(&cli.data_dir).context("Failed to load feed snapshot")?,
    );
    let (users, posts, likes) = index.counts();
    println!(
        "{} Loaded {} users, {} posts, {} likes in {:?}",
        "✓".green(),
        users,
        posts,
        likes,
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            user_id,
            limit,
            explain,
        } => handle_recommend(index, user_id, limit, explain).await?,
        Commands::User { user_id } => handle_user(index, user_id)?,
        Commands::Post { post_id } => handle_post(index, post_id)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(index, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    index: Arc<FeedIndex>,
    user_id: String,
    limit: usize,
    explain: bool,
) -> Result<()> {
    // Check if user exists before paying for the similarity table
    let _user = index
        .get_user(&user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;

    let orchestrator = RecommendationOrchestrator::new(index);

    let start = Instant::now();
    let recommendations = orchestrator.get_recommendations(&user_id, limit).await?;
    println!(
        "{} Generated {} recommendations in {:?}\n",
        "✓".green(),
        recommendations.len(),
        start.elapsed()
    );

    print_recommendations(&recommendations, explain);
    Ok(())
}

/// Handle the 'user' command
fn handle_user(index: Arc<FeedIndex>, user_id: String) -> Result<()> {
    let user = index
        .get_user(&user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;

    print!("{}", format!("User: {} ({})\n", user.name, user.id).bold().blue());
    if let Some(year) = user.graduation_year {
        print!("{}Graduation year: {}\n", "• ".green(), year);
    }

    let liked = index.get_liked_posts(&user_id);
    let authored = index.get_authored_posts(&user_id);
    print!("{}Posts liked: {}\n", "• ".cyan(), liked.len());
    print!("{}Posts authored: {}\n", "• ".cyan(), authored.len());

    println!("Liked posts:");
    for post_id in liked.iter().take(10) {
        if let Some(post) = index.get_post(post_id) {
            println!("  - {} [{:?}]", post.title, post.category);
        }
    }

    println!("Authored posts:");
    for post_id in authored.iter().take(10) {
        if let Some(post) = index.get_post(post_id) {
            let likes = index
                .get_post_stats(post_id)
                .map(|s| s.like_count)
                .unwrap_or(0);
            println!("  - {} ({} likes)", post.title, likes);
        }
    }

    Ok(())
}

/// Handle the 'post' command
fn handle_post(index: Arc<FeedIndex>, post_id: String) -> Result<()> {
    let post = index
        .get_post(&post_id)
        .ok_or_else(|| anyhow!("Post {} not found", post_id))?;

    let author = index
        .get_user(&post.author_id)
        .map(|u| u.name.as_str())
        .unwrap_or("<unknown>");

    print!("{}", format!("Post: {} ({})\n", post.title, post.id).bold().blue());
    print!("{}Author: {}\n", "• ".green(), author);
    print!("{}Category: {:?}\n", "• ".green(), post.category);

    if let Some(stats) = index.get_post_stats(&post_id) {
        print!("{}Likes: {}\n", "• ".cyan(), stats.like_count);
        print!(
            "{}Engagement rate: {:.1}%\n",
            "• ".cyan(),
            stats.engagement_rate * 100.0
        );
    }

    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(index: Arc<FeedIndex>, requests: usize, concurrent: usize) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("Benchmark needs at least one request"));
    }
    if concurrent == 0 {
        return Err(anyhow!("Benchmark needs a concurrency of at least one"));
    }

    let orchestrator = RecommendationOrchestrator::new(index.clone());

    // Pick random users from the snapshot for each request
    let user_pool: Vec<String> = index.users().map(|u| u.id.clone()).collect();
    if user_pool.is_empty() {
        return Err(anyhow!("Snapshot contains no users to benchmark with"));
    }
    let user_ids: Vec<String> = (0..requests)
        .map(|_| user_pool[rand::random_range(0..user_pool.len())].clone())
        .collect();

    // Use tokio::spawn to make concurrent requests, with a semaphore
    // keeping at most `concurrent` of them in flight at once
    let semaphore = Arc::new(Semaphore::new(concurrent));
    let mut handles = vec![];
    for user_id in user_ids {
        let orchestrator = orchestrator.clone();
        let semaphore = semaphore.clone();
        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            // Start timing after the permit so latency measures the
            // request itself, not time spent queued
            let start = Instant::now();
            orchestrator.get_recommendations(&user_id, 5).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }

    let total_time: std::time::Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[((timings.len() as f32 * 0.95) as usize).min(timings.len() - 1)];
    let p99 = timings[((timings.len() as f32 * 0.99) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[PostRecommendation], explain: bool) {
    print!("{}", "Recommended posts:\n".bold().blue());
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} by {} [{:?}] - Score: {:.2}",
            (rank + 1).to_string().green(),
            rec.title,
            rec.author_name,
            rec.category,
            rec.score
        );
        if explain {
            println!("   Explanation: {}", rec.explanation);
        }
    }
}
