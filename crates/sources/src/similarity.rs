//! User-to-user similarity over purchase histories.
//!
//! Similarity is the Jaccard coefficient of the two sets of purchased
//! item ids: `|A ∩ B| / |A ∪ B|`. It is id-based, so two users who buy
//! in the same category but never the same item score 0.

use catalog::{ItemId, User};
use std::collections::HashSet;

/// Distinct purchased ids of a user
pub fn purchase_set(user: &User) -> HashSet<ItemId> {
    user.purchase_history.iter().copied().collect()
}

/// Jaccard coefficient of two id sets, 0.0 when both are empty
pub fn jaccard_similarity(a: &HashSet<ItemId>, b: &HashSet<ItemId>) -> f64 {
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Similarity of two users' purchase histories, in [0, 1]
pub fn similarity(a: &User, b: &User) -> f64 {
    jaccard_similarity(&purchase_set(a), &purchase_set(b))
}
