//! Content-Based Source - category affinity
//!
//! Scores every item the user does not own by
//! `purchases in the item's category × item rating`, so categories the
//! user already buys in rank first and better-rated items win within a
//! category. Items in categories the user never bought score 0 but stay
//! in the pool as filler.

use crate::types::{RecommendationSource, ScoredItem, UserContext};
use crate::user_context::context_for_user;
use catalog::{DataIndex, Item, ItemId, User};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// How many candidates the content-based source returns by default
pub const DEFAULT_CONTENT_LIMIT: usize = 5;

/// Score unowned catalog items for a context and keep the best `limit`.
///
/// Ties keep catalog order.
pub fn score_unowned<'a>(
    context: &UserContext,
    catalog: impl IntoIterator<Item = &'a Item>,
    limit: usize,
) -> Vec<ScoredItem> {
    let mut scored: Vec<ScoredItem> = catalog
        .into_iter()
        .filter(|item| !context.owns(item.id))
        .map(|item| {
            let score = context.category_count(&item.category) as f64 * item.rating;
            ScoredItem::new(item.clone(), RecommendationSource::ContentBased, score)
        })
        .collect();

    // Stable sort, so equal scores stay in catalog order
    scored.sort_by(|a, b| {
        b.raw_score
            .partial_cmp(&a.raw_score)
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(limit);
    scored
}

/// Content-based candidates for `target` over a catalog slice
pub fn content_based_candidates(target: &User, catalog: &[Item], limit: usize) -> Vec<ScoredItem> {
    let by_id: HashMap<ItemId, &Item> = catalog.iter().map(|item| (item.id, item)).collect();
    let context = context_for_user(target, |id| by_id.get(&id).copied());
    score_unowned(&context, catalog, limit)
}

/// Content-based source over a shared DataIndex
#[derive(Clone)]
pub struct ContentBasedSource {
    data_index: Arc<DataIndex>,
    limit: usize,
}

impl ContentBasedSource {
    pub fn new(data_index: Arc<DataIndex>) -> Self {
        Self {
            data_index,
            limit: DEFAULT_CONTENT_LIMIT,
        }
    }

    /// Configure how many candidates to return (default: 5)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Generate scored candidates for a user
    #[instrument(skip(self, user_context), fields(user_id = user_context.user_id))]
    pub fn get_candidates(&self, user_context: &UserContext) -> Vec<ScoredItem> {
        debug!(
            "Scoring catalog for user {} ({} categories purchased)",
            user_context.user_id,
            user_context.category_counts.len()
        );
        let candidates = score_unowned(user_context, self.data_index.items(), self.limit);
        debug!("Generated {} content-based candidates", candidates.len());
        candidates
    }
}
