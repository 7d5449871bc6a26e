//! Simple test harness for the recommendation orchestrator.
//!
//! Loads the built-in demo data and prints recommendations for every
//! user through the async entry point.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use catalog::{DataIndex, SeedRepository};
use server::RecommendationOrchestrator;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,sources=debug")
        .init();

    info!("Starting recommendation engine test harness");

    let data_index = Arc::new(DataIndex::load_from(&SeedRepository)?);
    let orchestrator = RecommendationOrchestrator::new(data_index);

    for user in orchestrator.get_users() {
        info!("Getting recommendations for {} (user {})", user.name, user.id);
        let recommendations = orchestrator.get_recommendations(user.id).await?;

        if recommendations.is_empty() {
            info!("   No recommendations available");
        }
        for (i, rec) in recommendations.iter().enumerate() {
            info!(
                "{}. {} {} [{}] - Score: {:.2} ({})",
                i + 1,
                rec.image,
                rec.name,
                rec.category,
                rec.total_score,
                rec.source
            );
        }
    }

    Ok(())
}
