//! Hybrid merge of the two candidate sources.
//!
//! Each source contributes a flat weight to an item's total; an item
//! proposed by both is tagged `Hybrid` and gets the sum, so it always
//! outranks single-source items. Ties keep insertion order, and
//! collaborative items are inserted first.

use crate::config::{EngineConfig, SourceWeights};
use catalog::{Item, ItemId, User};
use sources::{collaborative_candidates, content_based_candidates, RecommendationSource, ScoredItem};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Resolve collaborative item ids, dropping ids missing from the catalog
pub fn resolve_items<'a, F>(item_ids: &[ItemId], resolve: F) -> Vec<Item>
where
    F: Fn(ItemId) -> Option<&'a Item>,
{
    item_ids
        .iter()
        .filter_map(|&id| resolve(id).cloned())
        .collect()
}

/// Merge both sources by item id, in insertion order
pub fn merge_candidates(
    collaborative: Vec<Item>,
    content_based: Vec<ScoredItem>,
    weights: &SourceWeights,
) -> Vec<ScoredItem> {
    let mut merged: Vec<ScoredItem> = Vec::with_capacity(collaborative.len() + content_based.len());
    let mut positions: HashMap<ItemId, usize> = HashMap::new();

    for item in collaborative {
        if positions.contains_key(&item.id) {
            continue;
        }
        positions.insert(item.id, merged.len());
        merged.push(ScoredItem::new(
            item,
            RecommendationSource::Collaborative,
            weights.collaborative,
        ));
    }

    for candidate in content_based {
        match positions.get(&candidate.id()) {
            Some(&pos) => {
                let existing = &mut merged[pos];
                existing.source = RecommendationSource::Hybrid;
                existing.total_score += weights.content_based;
            }
            None => {
                positions.insert(candidate.id(), merged.len());
                merged.push(ScoredItem {
                    total_score: weights.content_based,
                    ..candidate
                });
            }
        }
    }

    merged
}

/// Sort by total score (stable) and keep the first `limit`
pub fn rank_and_select(mut merged: Vec<ScoredItem>, limit: usize) -> Vec<ScoredItem> {
    merged.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(Ordering::Equal)
    });
    merged.truncate(limit);
    merged
}

/// Full hybrid recommendation for `target` over plain slices
pub fn recommend(
    target: &User,
    all_users: &[User],
    catalog: &[Item],
    config: &EngineConfig,
) -> Vec<ScoredItem> {
    let by_id: HashMap<ItemId, &Item> = catalog.iter().map(|item| (item.id, item)).collect();

    let collaborative_ids = collaborative_candidates(target, all_users);
    let collaborative = resolve_items(&collaborative_ids, |id| by_id.get(&id).copied());
    let content_based = content_based_candidates(target, catalog, config.content_limit);

    let merged = merge_candidates(collaborative, content_based, &config.weights);
    rank_and_select(merged, config.result_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::seed::{seed_items, seed_users};

    fn item(id: ItemId) -> Item {
        Item {
            id,
            name: format!("Item {}", id),
            category: "Electronics".to_string(),
            price: 1000,
            rating: 4.0,
            image: String::new(),
        }
    }

    fn content(id: ItemId, raw: f64) -> ScoredItem {
        ScoredItem::new(item(id), RecommendationSource::ContentBased, raw)
    }

    fn ids(scored: &[ScoredItem]) -> Vec<ItemId> {
        scored.iter().map(|s| s.id()).collect()
    }

    #[test]
    fn test_merge_tags_and_scores() {
        let weights = SourceWeights::default();
        let merged = merge_candidates(
            vec![item(4), item(8)],
            vec![content(4, 13.8), content(9, 13.8), content(3, 0.0)],
            &weights,
        );

        assert_eq!(ids(&merged), vec![4, 8, 9, 3]);

        assert_eq!(merged[0].source, RecommendationSource::Hybrid);
        assert!((merged[0].total_score - 1.0).abs() < 1e-6);
        // Hybrid keeps the collaborative raw score
        assert!((merged[0].raw_score - 0.6).abs() < 1e-6);

        assert_eq!(merged[1].source, RecommendationSource::Collaborative);
        assert!((merged[1].total_score - 0.6).abs() < 1e-6);

        assert_eq!(merged[2].source, RecommendationSource::ContentBased);
        assert!((merged[2].total_score - 0.4).abs() < 1e-6);
        assert!((merged[2].raw_score - 13.8).abs() < 1e-4);
    }

    #[test]
    fn test_merge_handles_empty_inputs() {
        let weights = SourceWeights::default();

        assert!(merge_candidates(vec![], vec![], &weights).is_empty());
        assert_eq!(merge_candidates(vec![item(1)], vec![], &weights).len(), 1);
        assert_eq!(merge_candidates(vec![], vec![content(2, 1.0)], &weights).len(), 1);
    }

    #[test]
    fn test_rank_puts_hybrid_first_and_keeps_insertion_order_on_ties() {
        let weights = SourceWeights::default();
        let merged = merge_candidates(
            vec![item(1), item(2), item(3)],
            vec![content(5, 9.0), content(3, 8.0), content(6, 7.0)],
            &weights,
        );

        let ranked = rank_and_select(merged, 6);
        // 3 is hybrid, then collaborative 1, 2, then content 5, 6
        assert_eq!(ids(&ranked), vec![3, 1, 2, 5, 6]);
    }

    #[test]
    fn test_rank_truncates_and_is_non_increasing() {
        let weights = SourceWeights::default();
        let merged = merge_candidates(
            (1..=5).map(item).collect(),
            (6..=10).map(|id| content(id, 1.0)).collect(),
            &weights,
        );

        let ranked = rank_and_select(merged, 6);
        assert_eq!(ids(&ranked), vec![1, 2, 3, 4, 5, 6]);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].total_score >= w[1].total_score));
    }

    #[test]
    fn test_custom_weights() {
        let weights = SourceWeights::new(0.2, 0.5);
        let merged = merge_candidates(vec![item(1)], vec![content(2, 3.0)], &weights);
        let ranked = rank_and_select(merged, 6);

        // Content-based now outranks collaborative
        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn test_resolve_items_drops_unknown_ids() {
        let catalog = seed_items();
        let resolved = resolve_items(&[4, 404, 8], |id| catalog.iter().find(|i| i.id == id));
        assert_eq!(resolved.iter().map(|i| i.id).collect::<Vec<_>>(), vec![4, 8]);
    }

    #[test]
    fn test_recommend_seed_user_without_neighbours() {
        let users = seed_users();
        let catalog = seed_items();

        let recs = recommend(&users[0], &users, &catalog, &EngineConfig::default());

        assert_eq!(ids(&recs), vec![4, 9, 8, 3, 5]);
        assert!(recs
            .iter()
            .all(|r| r.source == RecommendationSource::ContentBased));
    }
}
