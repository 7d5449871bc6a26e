//! Example: Generate candidates for a user
//!
//! Run with: cargo run --package sources --example generate_candidates
//!
//! This example shows how to:
//! 1. Load the built-in demo data
//! 2. Build a user context
//! 3. Generate collaborative and content-based candidates
//! 4. Display the results

use catalog::{DataIndex, SeedRepository};
use sources::{user_context::build_user_context, CollaborativeSource, ContentBasedSource};
use std::sync::Arc;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("=== Candidate Generation Example ===\n");

    let data_index = Arc::new(DataIndex::load_from(&SeedRepository)?);
    let collaborative = CollaborativeSource::new(data_index.clone());
    let content_based = ContentBasedSource::new(data_index.clone());

    for user in data_index.users() {
        let context = build_user_context(&data_index, user.id)?;
        println!("Target User: {} ({})", user.name, user.id);
        println!("  Purchases: {:?}", context.purchase_history);
        println!("  Categories: {:?}", context.top_categories(3));

        let start = Instant::now();
        let neighbours = collaborative.neighbours(&context);
        let item_ids = collaborative.get_candidates(&context);
        println!("  Neighbours: {:?}", neighbours);
        println!("  Collaborative candidates ({:?}): {:?}", start.elapsed(), item_ids);

        let start = Instant::now();
        let scored = content_based.get_candidates(&context);
        println!("  Content-based candidates ({:?}):", start.elapsed());
        for candidate in &scored {
            println!(
                "    {} {} [{}] score {:.2}",
                candidate.item.image, candidate.item.name, candidate.item.category, candidate.raw_score
            );
        }
        println!();
    }

    Ok(())
}
