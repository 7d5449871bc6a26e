//! # Catalog Crate
//!
//! Holds the product catalog and the user profile store that the
//! recommenders read from.
//!
//! ## Main Components
//!
//! - **types**: Domain types (Item, User, DataIndex)
//! - **repository**: Where the data comes from (`CatalogRepository`)
//! - **parser**: JSON file parsing
//! - **seed**: Built-in demo data
//! - **index**: Building and validating the `DataIndex`
//! - **error**: Error types for loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{DataIndex, SeedRepository};
//!
//! let index = DataIndex::load_from(&SeedRepository)?;
//! let user = index.get_user(1).unwrap();
//! println!("{} bought {} items", user.name, user.purchase_history.len());
//! ```

pub mod error;
pub mod index;
pub mod parser;
pub mod repository;
pub mod seed;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use repository::{CatalogRepository, JsonRepository, SeedRepository};
pub use types::{DataIndex, Item, ItemId, User, UserId};

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item(id: ItemId) -> Item {
        Item {
            id,
            name: "Wireless Mouse".to_string(),
            category: "Electronics".to_string(),
            price: 899,
            rating: 4.3,
            image: "🖱️".to_string(),
        }
    }

    #[test]
    fn test_data_index_creation() {
        let index = DataIndex::new();
        let (users, items, purchases) = index.counts();

        assert_eq!(users, 0);
        assert_eq!(items, 0);
        assert_eq!(purchases, 0);
    }

    #[test]
    fn test_insert_item() {
        let mut index = DataIndex::new();
        index.insert_item(sample_item(8));

        let retrieved = index.get_item(8).unwrap();
        assert_eq!(retrieved.name, "Wireless Mouse");
        assert_eq!(retrieved.price, 899);
    }

    #[test]
    fn test_insert_existing_id_replaces_in_place() {
        let mut index = DataIndex::new();
        index.insert_item(sample_item(1));
        index.insert_item(sample_item(2));

        let mut updated = sample_item(1);
        updated.price = 10;
        index.insert_item(updated);

        assert_eq!(index.items().len(), 2);
        assert_eq!(index.items()[0].id, 1);
        assert_eq!(index.items()[0].price, 10);
    }

    #[test]
    fn test_insert_user_keeps_registration_order() {
        let mut index = DataIndex::new();
        for id in [3, 1, 2] {
            index.insert_user(User {
                id,
                name: format!("User {}", id),
                purchase_history: vec![],
                browsing_history: vec![],
                preferences: vec![],
            });
        }

        let ids: Vec<UserId> = index.users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(index.get_user(1).unwrap().name, "User 1");
    }

    #[test]
    fn test_empty_queries() {
        let index = DataIndex::new();

        assert!(index.get_user(999).is_none());
        assert!(index.get_item(999).is_none());
        assert!(index.get_items_by_category("Electronics").is_empty());
        assert!(index.categories().is_empty());
    }
}
