//! Collaborative Source - user-to-user filtering
//!
//! "Users who bought what you bought also bought..."
//!
//! ## Algorithm
//! 1. Compute Jaccard similarity against every other user
//! 2. Stable sort users by similarity, highest first
//! 3. Walk the sorted users with similarity > 0 and collect their
//!    purchases the target does not own, first occurrence wins
//!
//! The output is an ordered list of item ids: the most similar user's
//! items come first, each user's items in their purchase order.

use crate::similarity::{jaccard_similarity, purchase_set};
use crate::types::UserContext;
use catalog::{DataIndex, ItemId, User, UserId};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Another user and how similar they are to the target
#[derive(Debug, Clone, Copy)]
pub struct Neighbour<'a> {
    pub user: &'a User,
    pub similarity: f64,
}

/// Score every user except `target_id` and sort them by similarity.
///
/// Ties keep registration order.
pub fn rank_neighbours<'a>(
    target_id: UserId,
    target_purchases: &HashSet<ItemId>,
    users: &'a [User],
) -> Vec<Neighbour<'a>> {
    // Order-preserving parallel map
    let mut neighbours: Vec<Neighbour<'a>> = users
        .par_iter()
        .filter(|user| user.id != target_id)
        .map(|user| Neighbour {
            user,
            similarity: jaccard_similarity(target_purchases, &purchase_set(user)),
        })
        .collect();

    neighbours.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    neighbours
}

/// Collect unowned purchases of neighbours with positive similarity
pub fn candidates_from_neighbours(
    neighbours: &[Neighbour<'_>],
    owned: &HashSet<ItemId>,
) -> Vec<ItemId> {
    let mut seen: HashSet<ItemId> = HashSet::new();
    let mut candidates = Vec::new();

    for neighbour in neighbours.iter().filter(|n| n.similarity > 0.0) {
        for &item_id in &neighbour.user.purchase_history {
            if !owned.contains(&item_id) && seen.insert(item_id) {
                candidates.push(item_id);
            }
        }
    }
    candidates
}

/// Collaborative candidates for `target` among `all_users`
pub fn collaborative_candidates(target: &User, all_users: &[User]) -> Vec<ItemId> {
    let owned = purchase_set(target);
    let neighbours = rank_neighbours(target.id, &owned, all_users);
    candidates_from_neighbours(&neighbours, &owned)
}

/// Collaborative source over a shared DataIndex
#[derive(Clone)]
pub struct CollaborativeSource {
    /// Shared reference to the data index (read-only, so no Mutex needed)
    data_index: Arc<DataIndex>,
}

impl CollaborativeSource {
    pub fn new(data_index: Arc<DataIndex>) -> Self {
        Self { data_index }
    }

    /// Generate candidate item ids for a user
    #[instrument(skip(self, user_context), fields(user_id = user_context.user_id))]
    pub fn get_candidates(&self, user_context: &UserContext) -> Vec<ItemId> {
        let neighbours = rank_neighbours(
            user_context.user_id,
            &user_context.owned_items,
            self.data_index.users(),
        );
        let similar = neighbours.iter().filter(|n| n.similarity > 0.0).count();
        debug!("Found {} similar users", similar);

        let candidates = candidates_from_neighbours(&neighbours, &user_context.owned_items);
        debug!("Generated {} collaborative candidates", candidates.len());
        candidates
    }

    /// Every other user with their similarity to the target, best first
    pub fn neighbours(&self, user_context: &UserContext) -> Vec<(UserId, f64)> {
        rank_neighbours(
            user_context.user_id,
            &user_context.owned_items,
            self.data_index.users(),
        )
        .into_iter()
        .map(|n| (n.user.id, n.similarity))
        .collect()
    }
}
