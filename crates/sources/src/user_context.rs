//! Helper functions to build UserContext
//!
//! The context is the resolved view of one user's purchases: which ids
//! they own and how many purchases fall into each category.

use crate::types::UserContext;
use anyhow::{anyhow, Result};
use catalog::{DataIndex, Item, ItemId, User, UserId};

/// Build a UserContext from the DataIndex for a given user
///
/// Fails if the user does not exist. Purchased ids that are missing
/// from the catalog still count as owned but add nothing to the
/// category tally.
pub fn build_user_context(data_index: &DataIndex, user_id: UserId) -> Result<UserContext> {
    let user = data_index
        .get_user(user_id)
        .ok_or_else(|| anyhow!("User {} not found", user_id))?;

    Ok(context_for_user(user, |id| data_index.get_item(id)))
}

/// Build a UserContext using any item lookup
pub fn context_for_user<'a, F>(user: &User, resolve: F) -> UserContext
where
    F: Fn(ItemId) -> Option<&'a Item>,
{
    let mut context = UserContext::new(user.id);

    for &item_id in &user.purchase_history {
        // Duplicates collapse
        if !context.owned_items.insert(item_id) {
            continue;
        }
        context.purchase_history.push(item_id);

        match resolve(item_id) {
            Some(item) => {
                *context
                    .category_counts
                    .entry(item.category.clone())
                    .or_insert(0) += 1;
            }
            None => context.unresolved_items.push(item_id),
        }
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::SeedRepository;

    fn seed_index() -> DataIndex {
        DataIndex::load_from(&SeedRepository).unwrap()
    }

    #[test]
    fn test_build_user_context_basic() {
        let index = seed_index();
        let context = build_user_context(&index, 1).unwrap();

        assert_eq!(context.user_id, 1);
        assert_eq!(context.purchase_history, vec![1, 2, 7]);
        assert!(context.owns(1));
        assert!(context.owns(7));
        assert!(!context.owns(4));
    }

    #[test]
    fn test_category_counts() {
        let index = seed_index();

        let context = build_user_context(&index, 1).unwrap();
        assert_eq!(context.category_count("Electronics"), 3);
        assert_eq!(context.category_count("Accessories"), 0);

        let context = build_user_context(&index, 2).unwrap();
        assert_eq!(context.category_count("Accessories"), 3);
    }

    #[test]
    fn test_unresolved_items_skipped_in_tally() {
        let mut index = seed_index();
        index.insert_user(User {
            id: 10,
            name: "Stale".to_string(),
            purchase_history: vec![1, 404, 3],
            browsing_history: vec![],
            preferences: vec![],
        });

        let context = build_user_context(&index, 10).unwrap();
        assert!(context.owns(404));
        assert_eq!(context.unresolved_items, vec![404]);
        assert_eq!(context.category_count("Electronics"), 1);
        assert_eq!(context.category_count("Accessories"), 1);
    }

    #[test]
    fn test_duplicate_purchases_collapse() {
        let mut index = seed_index();
        index.insert_user(User {
            id: 11,
            name: "Repeat Buyer".to_string(),
            purchase_history: vec![2, 2, 4],
            browsing_history: vec![],
            preferences: vec![],
        });

        let context = build_user_context(&index, 11).unwrap();
        assert_eq!(context.purchase_history, vec![2, 4]);
        assert_eq!(context.category_count("Electronics"), 2);
    }

    #[test]
    fn test_top_categories() {
        let mut index = seed_index();
        index.insert_user(User {
            id: 12,
            name: "Mixed".to_string(),
            purchase_history: vec![1, 3, 2],
            browsing_history: vec![],
            preferences: vec![],
        });

        let context = build_user_context(&index, 12).unwrap();
        assert_eq!(
            context.top_categories(2),
            vec![("Electronics", 2), ("Accessories", 1)]
        );
    }

    #[test]
    fn test_user_not_found() {
        let index = DataIndex::new();
        assert!(build_user_context(&index, 999).is_err());
    }

    #[test]
    fn test_user_with_no_purchases() {
        let mut index = DataIndex::new();
        index.insert_user(User {
            id: 1,
            name: "Fresh".to_string(),
            purchase_history: vec![],
            browsing_history: vec![5],
            preferences: vec!["Electronics".to_string()],
        });

        let context = build_user_context(&index, 1).unwrap();
        assert!(context.purchase_history.is_empty());
        assert!(context.category_counts.is_empty());
    }
}
