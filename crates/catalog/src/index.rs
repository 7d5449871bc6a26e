//! DataIndex building and validation.
//!
//! - Insert items and users from a repository
//! - Build the category secondary index
//! - Validate ratings and categories
//! - Report history entries that point at unknown items

use crate::error::{CatalogError, Result};
use crate::repository::{CatalogRepository, JsonRepository};
use crate::types::*;
use std::path::Path;
use tracing::{info, warn};

impl DataIndex {
    /// Load and index everything a repository provides
    ///
    /// Steps:
    /// 1. Load items and users
    /// 2. Insert them in order
    /// 3. Build the category index
    /// 4. Validate
    pub fn load_from<R: CatalogRepository + ?Sized>(repository: &R) -> Result<Self> {
        let (items, users) = repository.load_all()?;
        info!(
            "Loaded {} items and {} users from {} repository",
            items.len(),
            users.len(),
            repository.name()
        );

        let index = Self::from_parts(items, users);
        index.validate()?;

        let dangling = index.dangling_references();
        if !dangling.is_empty() {
            warn!(
                "{} history entries reference items missing from the catalog; they will be ignored",
                dangling.len()
            );
        }
        Ok(index)
    }

    /// Load `items.json` and `users.json` from a directory
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        Self::load_from(&JsonRepository::new(data_dir))
    }

    /// Build an index from already-loaded collections without validation
    pub fn from_parts(items: Vec<Item>, users: Vec<User>) -> Self {
        let mut index = DataIndex::new();
        for item in items {
            index.insert_item(item);
        }
        for user in users {
            index.insert_user(user);
        }
        index.build_secondary_indices();
        index
    }

    /// Rebuild the category index from the current items
    pub fn build_secondary_indices(&mut self) {
        self.category_index.clear();
        for item in &self.items {
            self.category_index
                .entry(item.category.clone())
                .or_default()
                .push(item.id);
        }
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - All ratings are within 0.0 - 5.0
    /// - No item has an empty category
    ///
    /// Dangling history references are tolerated (see `dangling_references`).
    pub fn validate(&self) -> Result<()> {
        for item in &self.items {
            if !(0.0..=5.0).contains(&item.rating) {
                return Err(CatalogError::InvalidValue {
                    field: "rating".to_string(),
                    value: item.rating.to_string(),
                });
            }
            if item.category.trim().is_empty() {
                return Err(CatalogError::ValidationError(format!(
                    "item {} has an empty category",
                    item.id
                )));
            }
        }
        Ok(())
    }

    /// (user, item) pairs where a purchase or browse entry is not in the catalog
    pub fn dangling_references(&self) -> Vec<(UserId, ItemId)> {
        self.users
            .iter()
            .flat_map(|user| {
                user.purchase_history
                    .iter()
                    .chain(&user.browsing_history)
                    .filter(|&&id| !self.item_positions.contains_key(&id))
                    .map(move |&id| (user.id, id))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SeedRepository;

    fn item(id: ItemId, category: &str, rating: f64) -> Item {
        Item {
            id,
            name: format!("Item {}", id),
            category: category.to_string(),
            price: 100,
            rating,
            image: String::new(),
        }
    }

    #[test]
    fn test_load_seed_data() {
        let index = DataIndex::load_from(&SeedRepository).unwrap();
        let (users, items, purchases) = index.counts();

        assert_eq!(users, 3);
        assert_eq!(items, 10);
        assert_eq!(purchases, 8);
        assert!(index.dangling_references().is_empty());
    }

    #[test]
    fn test_category_index_keeps_catalog_order() {
        let index = DataIndex::load_from(&SeedRepository).unwrap();

        assert_eq!(index.get_items_by_category("Accessories"), &[3, 5, 6, 10]);
        assert_eq!(
            index.get_items_by_category("Electronics"),
            &[1, 2, 4, 7, 8, 9]
        );
        assert_eq!(index.categories(), vec!["Electronics", "Accessories"]);
    }

    #[test]
    fn test_validate_rejects_out_of_range_rating() {
        let index = DataIndex::from_parts(vec![item(1, "Electronics", 5.5)], vec![]);
        assert!(matches!(
            index.validate(),
            Err(CatalogError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_category() {
        let index = DataIndex::from_parts(vec![item(1, "  ", 4.0)], vec![]);
        assert!(matches!(
            index.validate(),
            Err(CatalogError::ValidationError(_))
        ));
    }

    #[test]
    fn test_dangling_references_are_reported_not_rejected() {
        let users = vec![User {
            id: 1,
            name: "Stale".to_string(),
            purchase_history: vec![1, 42],
            browsing_history: vec![99],
            preferences: vec![],
        }];
        let index = DataIndex::from_parts(vec![item(1, "Electronics", 4.0)], users);

        assert!(index.validate().is_ok());
        assert_eq!(index.dangling_references(), vec![(1, 42), (1, 99)]);
    }
}
