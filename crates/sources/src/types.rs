//! Shared types produced by the candidate sources.

use catalog::{Item, ItemId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Which strategy (or strategies) proposed an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationSource {
    /// Proposed by similar users' purchases
    Collaborative,
    /// Proposed by category affinity
    #[serde(rename = "Content-Based")]
    ContentBased,
    /// Proposed by both
    Hybrid,
}

impl fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecommendationSource::Collaborative => "Collaborative",
            RecommendationSource::ContentBased => "Content-Based",
            RecommendationSource::Hybrid => "Hybrid",
        };
        f.write_str(label)
    }
}

/// An item with its provenance and scores, valid for one request
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem {
    pub item: Item,
    pub source: RecommendationSource,
    /// Score assigned by the source that proposed the item
    pub raw_score: f64,
    /// Score used for the final ranking
    pub total_score: f64,
}

impl ScoredItem {
    /// Create a scored item whose total starts at the raw score
    pub fn new(item: Item, source: RecommendationSource, raw_score: f64) -> Self {
        Self {
            item,
            source,
            raw_score,
            total_score: raw_score,
        }
    }

    pub fn id(&self) -> ItemId {
        self.item.id
    }
}

/// Everything the sources need to know about the target user,
/// gathered once per request.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub user_id: UserId,
    /// Purchases in history order, duplicates removed
    pub purchase_history: Vec<ItemId>,
    /// Same ids as `purchase_history`, for O(1) ownership checks
    pub owned_items: HashSet<ItemId>,
    /// Purchases per category, counting only ids found in the catalog
    pub category_counts: HashMap<String, u32>,
    /// Purchased ids that did not resolve in the catalog
    pub unresolved_items: Vec<ItemId>,
}

impl UserContext {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    pub fn owns(&self, item_id: ItemId) -> bool {
        self.owned_items.contains(&item_id)
    }

    /// Purchase count for a category, 0 if the user never bought in it
    pub fn category_count(&self, category: &str) -> u32 {
        self.category_counts.get(category).copied().unwrap_or(0)
    }

    /// Top-N categories by purchase count, ties broken alphabetically
    pub fn top_categories(&self, n: usize) -> Vec<(&str, u32)> {
        let mut categories: Vec<(&str, u32)> = self
            .category_counts
            .iter()
            .map(|(category, &count)| (category.as_str(), count))
            .collect();
        categories.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        categories.truncate(n);
        categories
    }
}
