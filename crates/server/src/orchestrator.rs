//! # Recommendation Orchestrator
//!
//! Coordinates one recommendation request:
//! 1. Look up the user (unknown id is a `UserNotFound` error)
//! 2. Build the user context
//! 3. Generate collaborative and content-based candidates
//! 4. Merge, rank and truncate
//! 5. Return the list with provenance tags
//!
//! `recommend` runs the two sources one after the other; the async
//! `get_recommendations` runs them concurrently on the blocking pool.
//! Both merge the same way and return identical rankings.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use catalog::{DataIndex, Item, ItemId, User, UserId};
use sources::user_context::context_for_user;
use sources::{CollaborativeSource, ContentBasedSource, RecommendationSource, ScoredItem, UserContext};

use crate::config::EngineConfig;
use crate::error::{RecommendError, Result};
use crate::merger::{merge_candidates, rank_and_select, resolve_items};

/// Final recommendation handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub price: u32,
    pub rating: f64,
    pub image: String,
    pub source: RecommendationSource,
    pub total_score: f64,
}

impl From<ScoredItem> for Recommendation {
    fn from(scored: ScoredItem) -> Self {
        let ScoredItem {
            item,
            source,
            total_score,
            ..
        } = scored;
        Self {
            id: item.id,
            name: item.name,
            category: item.category,
            price: item.price,
            rating: item.rating,
            image: item.image,
            source,
            total_score,
        }
    }
}

/// Main orchestrator that coordinates the recommendation pipeline
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    data_index: Arc<DataIndex>,
    collaborative: CollaborativeSource,
    content_based: ContentBasedSource,
    config: EngineConfig,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator with the default configuration
    pub fn new(data_index: Arc<DataIndex>) -> Self {
        Self::with_config(data_index, EngineConfig::default())
    }

    pub fn with_config(data_index: Arc<DataIndex>, config: EngineConfig) -> Self {
        let collaborative = CollaborativeSource::new(data_index.clone());
        let content_based =
            ContentBasedSource::new(data_index.clone()).with_limit(config.content_limit);
        Self {
            data_index,
            collaborative,
            content_based,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn data_index(&self) -> &DataIndex {
        &self.data_index
    }

    /// All users in registration order
    pub fn get_users(&self) -> &[User] {
        self.data_index.users()
    }

    /// The catalog in catalog order
    pub fn get_catalog(&self) -> &[Item] {
        self.data_index.items()
    }

    /// Synchronous entry point: ranked recommendations for a user
    pub fn recommend(&self, user_id: UserId) -> Result<Vec<Recommendation>> {
        let start_time = Instant::now();
        let context = self.build_user_context(user_id)?;

        let collaborative_ids = self.collaborative.get_candidates(&context);
        let content_based = self.content_based.get_candidates(&context);

        let recommendations = self.finish(collaborative_ids, content_based);
        info!(
            "Selected {} recommendations for user {} in {:.2?}",
            recommendations.len(),
            user_id,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Async entry point: same ranking as `recommend`, sources run in parallel
    pub async fn get_recommendations(&self, user_id: UserId) -> Result<Vec<Recommendation>> {
        let start_time = Instant::now();
        let context = self.build_user_context(user_id)?;
        info!("Built user context for user {}", user_id);

        let (collaborative_ids, content_based) =
            self.generate_candidates_parallel(&context).await?;

        let recommendations = self.finish(collaborative_ids, content_based);
        info!(
            "Total time to get {} recommendations for user {}: {:.2?}",
            recommendations.len(),
            user_id,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Every other user with their Jaccard similarity, best first
    pub fn neighbours(&self, user_id: UserId) -> Result<Vec<(UserId, f64)>> {
        let context = self.build_user_context(user_id)?;
        Ok(self.collaborative.neighbours(&context))
    }

    /// Resolved purchase context for a user
    pub fn build_user_context(&self, user_id: UserId) -> Result<UserContext> {
        let user = self
            .data_index
            .get_user(user_id)
            .ok_or(RecommendError::UserNotFound { user_id })?;
        Ok(context_for_user(user, |id| self.data_index.get_item(id)))
    }

    /// Generate candidates from both sources in parallel
    async fn generate_candidates_parallel(
        &self,
        context: &UserContext,
    ) -> Result<(Vec<ItemId>, Vec<ScoredItem>)> {
        let (collaborative_result, content_result) = tokio::join!(
            tokio::task::spawn_blocking({
                let collaborative = self.collaborative.clone();
                let context = context.clone();
                move || collaborative.get_candidates(&context)
            }),
            tokio::task::spawn_blocking({
                let content_based = self.content_based.clone();
                let context = context.clone();
                move || content_based.get_candidates(&context)
            })
        );

        let collaborative_ids = collaborative_result.map_err(|e| RecommendError::TaskFailed {
            source_name: "Collaborative".to_string(),
            reason: e.to_string(),
        })?;
        let content_based = content_result.map_err(|e| RecommendError::TaskFailed {
            source_name: "Content-based".to_string(),
            reason: e.to_string(),
        })?;
        Ok((collaborative_ids, content_based))
    }

    /// Resolve, merge, rank and convert
    fn finish(
        &self,
        collaborative_ids: Vec<ItemId>,
        content_based: Vec<ScoredItem>,
    ) -> Vec<Recommendation> {
        let collaborative = resolve_items(&collaborative_ids, |id| self.data_index.get_item(id));
        debug!(
            "Merging {} collaborative ({} unresolved) and {} content-based candidates",
            collaborative.len(),
            collaborative_ids.len() - collaborative.len(),
            content_based.len()
        );

        let merged = merge_candidates(collaborative, content_based, &self.config.weights);
        rank_and_select(merged, self.config.result_limit)
            .into_iter()
            .map(Recommendation::from)
            .collect()
    }
}
