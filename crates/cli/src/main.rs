use anyhow::{anyhow, bail, Context, Result};
use catalog::{DataIndex, JsonRepository, SeedRepository, UserId};
use clap::{Parser, Subcommand};
use colored::Colorize;
use server::{EngineConfig, Recommendation, RecommendationOrchestrator};
use sources::RecommendationSource;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// shop-recs - Hybrid Product Recommendation Engine
#[derive(Parser)]
#[command(name = "shop-recs")]
#[command(about = "Product recommendations from collaborative and content-based filtering", long_about = None)]
struct Cli {
    /// Directory with items.json and users.json (built-in demo data when omitted)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Engine configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get product recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: UserId,

        /// Show which strategy proposed each item and its score
        #[arg(long)]
        explain: bool,

        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all users
    Users,

    /// Show a user's profile and history
    User {
        /// User ID to display
        #[arg(long)]
        user_id: UserId,
    },

    /// List the catalog
    Catalog {
        /// Only show items in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show how similar every other user is to this one
    Similar {
        #[arg(long)]
        user_id: UserId,
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
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let data_index = Arc::new(load_data_index(cli.data_dir.as_deref())?);
    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)
            .with_context(|| format!("Failed to load engine config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let orchestrator = RecommendationOrchestrator::with_config(data_index, config);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            user_id,
            explain,
            json,
        } => handle_recommend(&orchestrator, user_id, explain, json).await?,
        Commands::Users => handle_users(&orchestrator),
        Commands::User { user_id } => handle_user(&orchestrator, user_id)?,
        Commands::Catalog { category } => handle_catalog(&orchestrator, category.as_deref()),
        Commands::Similar { user_id } => handle_similar(&orchestrator, user_id)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(&orchestrator, requests, concurrent).await?,
    }

    Ok(())
}

fn load_data_index(data_dir: Option<&Path>) -> Result<DataIndex> {
    let start_time = Instant::now();
    let data_index = match data_dir {
        Some(dir) => {
            info!("Loading data from {}", dir.display());
            DataIndex::load_from(&JsonRepository::new(dir))
                .with_context(|| format!("Failed to load data from {}", dir.display()))?
        }
        None => {
            info!("No data directory given, using built-in demo data");
            DataIndex::load_from(&SeedRepository).context("Failed to load demo data")?
        }
    };

    let (users, items, purchases) = data_index.counts();
    info!(
        "Data ready in {:.2?}: {} users, {} items, {} purchases",
        start_time.elapsed(),
        users,
        items,
        purchases
    );
    Ok(data_index)
}

/// Handle the 'recommend' command
async fn handle_recommend(
    orchestrator: &RecommendationOrchestrator,
    user_id: UserId,
    explain: bool,
    json: bool,
) -> Result<()> {
    let recommendations = orchestrator.get_recommendations(user_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    let user = orchestrator
        .data_index()
        .get_user(user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;
    println!(
        "{}",
        format!("Recommendations for {}:", user.name).bold().blue()
    );
    print_recommendations(&recommendations, explain);
    Ok(())
}

/// Handle the 'users' command
fn handle_users(orchestrator: &RecommendationOrchestrator) {
    println!("{}", "Users:".bold().blue());
    for user in orchestrator.get_users() {
        println!(
            "{} {} ({} purchases)",
            user.id.to_string().green(),
            user.name,
            user.purchase_history.len()
        );
    }
}

/// Handle the 'user' command
fn handle_user(orchestrator: &RecommendationOrchestrator, user_id: UserId) -> Result<()> {
    let data_index = orchestrator.data_index();
    let user = data_index
        .get_user(user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;
    let context = orchestrator.build_user_context(user_id)?;

    println!("{}", format!("User {}: {}", user.id, user.name).bold().blue());

    println!("Purchase history:");
    for &item_id in &user.purchase_history {
        match data_index.get_item(item_id) {
            Some(item) => println!(
                "  {}{} {} [{}]",
                "• ".green(),
                item.image,
                item.name,
                item.category
            ),
            None => println!("  {}unknown item {}", "• ".yellow(), item_id),
        }
    }

    let browsed: Vec<String> = user
        .browsing_history
        .iter()
        .filter_map(|&id| data_index.get_item(id))
        .map(|item| item.name.clone())
        .collect();
    println!("Recently browsed: {}", browsed.join(", "));
    println!("Preferences: {}", user.preferences.join(", "));

    println!("Purchases by category:");
    for (category, count) in context.top_categories(usize::MAX) {
        println!("  {}{}: {}", "• ".cyan(), category, count);
    }
    Ok(())
}

/// Handle the 'catalog' command
fn handle_catalog(orchestrator: &RecommendationOrchestrator, category: Option<&str>) {
    let data_index = orchestrator.data_index();
    println!("{}", "Catalog:".bold().blue());
    for item in data_index.items() {
        if category.is_some_and(|c| !item.category.eq_ignore_ascii_case(c)) {
            continue;
        }
        println!(
            "{:>3}. {} {} [{}] {} - {:.1}★",
            item.id,
            item.image,
            item.name,
            item.category,
            format_price(item.price),
            item.rating
        );
    }
}

/// Handle the 'similar' command
fn handle_similar(orchestrator: &RecommendationOrchestrator, user_id: UserId) -> Result<()> {
    let neighbours = orchestrator.neighbours(user_id)?;
    println!(
        "{}",
        format!("Users similar to user {}:", user_id).bold().blue()
    );
    for (other_id, score) in neighbours {
        let name = orchestrator
            .data_index()
            .get_user(other_id)
            .map(|u| u.name.as_str())
            .unwrap_or("?");
        let line = format!("{} {} - Jaccard {:.3}", other_id, name, score);
        if score > 0.0 {
            println!("{}", line.green());
        } else {
            println!("{}", line.dimmed());
        }
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    orchestrator: &RecommendationOrchestrator,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    let user_ids: Vec<UserId> = orchestrator.get_users().iter().map(|u| u.id).collect();
    if user_ids.is_empty() || requests == 0 {
        bail!("Benchmark needs at least one user and one request");
    }

    let semaphore = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    let mut handles = vec![];
    for _ in 0..requests {
        let user_id = user_ids[rand::random::<u32>() as usize % user_ids.len()];
        let orchestrator = orchestrator.clone();
        let semaphore = semaphore.clone();
        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let start = Instant::now();
            orchestrator.get_recommendations(user_id).await?;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn format_price(minor_units: u32) -> String {
    format!("₹{}.{:02}", minor_units / 100, minor_units % 100)
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[Recommendation], explain: bool) {
    if recommendations.is_empty() {
        println!("No recommendations available");
        return;
    }

    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} {} [{}] {} - {:.1}★",
            (i + 1).to_string().green(),
            rec.image,
            rec.name,
            rec.category,
            format_price(rec.price),
            rec.rating
        );
        if explain {
            let source = match rec.source {
                RecommendationSource::Hybrid => rec.source.to_string().magenta(),
                RecommendationSource::Collaborative => rec.source.to_string().cyan(),
                RecommendationSource::ContentBased => rec.source.to_string().yellow(),
            };
            println!("   Source: {} - Score: {:.2}", source, rec.total_score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(2999), "₹29.99");
        assert_eq!(format_price(299), "₹2.99");
        assert_eq!(format_price(5), "₹0.05");
    }

    #[test]
    fn test_cli_parses_recommend() {
        let cli = Cli::try_parse_from(["shop-recs", "recommend", "--user-id", "2", "--explain"])
            .unwrap();
        assert!(cli.data_dir.is_none());
        match cli.command {
            Commands::Recommend {
                user_id,
                explain,
                json,
            } => {
                assert_eq!(user_id, 2);
                assert!(explain);
                assert!(!json);
            }
            _ => panic!("expected recommend command"),
        }
    }

    #[test]
    fn test_load_demo_data_without_dir() {
        let index = load_data_index(None).unwrap();
        assert_eq!(index.users().len(), 3);
    }

    #[test]
    fn test_load_bundled_data_dir() {
        let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data");
        let index = load_data_index(Some(&data_dir)).unwrap();
        assert_eq!(index.counts(), (4, 10, 12));
    }

    #[test]
    fn test_load_missing_data_dir_fails() {
        assert!(load_data_index(Some(Path::new("/no/such/data/dir"))).is_err());
    }
}
