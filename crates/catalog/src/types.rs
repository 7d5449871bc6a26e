//! Core domain types for the product catalog and user profiles.
//!
//! Both collections are read-only once loaded. Their order matters:
//! recommenders break score ties by catalog order (items) and
//! registration order (users), so `DataIndex` keeps the records in a
//! `Vec` and indexes positions by id.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a catalog item
pub type ItemId = u32;

/// Unique identifier for a user
pub type UserId = u32;

// =============================================================================
// Catalog Types
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    /// Low-cardinality category label, e.g. "Electronics"
    pub category: String,
    /// Price in minor currency units
    pub price: u32,
    /// Average rating from 0.0 to 5.0
    pub rating: f64,
    /// Display glyph for the presentation layer
    #[serde(default)]
    pub image: String,
}

// =============================================================================
// User Types
// =============================================================================

/// A user profile with interaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Purchased item ids in insertion order
    #[serde(default)]
    pub purchase_history: Vec<ItemId>,
    /// Browsed item ids. Informational only, never scored.
    #[serde(default)]
    pub browsing_history: Vec<ItemId>,
    /// Declared category preferences. Informational only, never scored.
    #[serde(default)]
    pub preferences: Vec<String>,
}

// =============================================================================
// DataIndex - The In-Memory Store
// =============================================================================

/// Holds the catalog and the user profile store with id lookups.
#[derive(Debug, Clone)]
pub struct DataIndex {
    // Primary data stores, in load order
    pub(crate) items: Vec<Item>,
    pub(crate) users: Vec<User>,

    // Position lookups
    pub(crate) item_positions: HashMap<ItemId, usize>,
    pub(crate) user_positions: HashMap<UserId, usize>,

    /// Items grouped by category, in catalog order
    pub(crate) category_index: HashMap<String, Vec<ItemId>>,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            users: Vec::new(),
            item_positions: HashMap::new(),
            user_positions: HashMap::new(),
            category_index: HashMap::new(),
        }
    }

    /// Get an item by id
    pub fn get_item(&self, id: ItemId) -> Option<&Item> {
        self.item_positions.get(&id).map(|&pos| &self.items[pos])
    }

    /// Get a user by id
    pub fn get_user(&self, id: UserId) -> Option<&User> {
        self.user_positions.get(&id).map(|&pos| &self.users[pos])
    }

    /// All items in catalog order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// All users in registration order
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Get all items in a category, in catalog order
    ///
    /// Returns an empty slice for unknown categories, or when
    /// `build_secondary_indices` has not been run yet.
    pub fn get_items_by_category(&self, category: &str) -> &[ItemId] {
        self.category_index
            .get(category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct categories in order of first appearance in the catalog
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.category.as_str()) {
                seen.push(item.category.as_str());
            }
        }
        seen
    }

    /// Insert an item. An existing id is replaced in place.
    pub fn insert_item(&mut self, item: Item) {
        match self.item_positions.get(&item.id) {
            Some(&pos) => self.items[pos] = item,
            None => {
                self.item_positions.insert(item.id, self.items.len());
                self.items.push(item);
            }
        }
    }

    /// Insert a user. An existing id is replaced in place.
    pub fn insert_user(&mut self, user: User) {
        match self.user_positions.get(&user.id) {
            Some(&pos) => self.users[pos] = user,
            None => {
                self.user_positions.insert(user.id, self.users.len());
                self.users.push(user);
            }
        }
    }

    /// Get counts for debugging/validation: (users, items, purchases)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_purchases = self.users.iter().map(|u| u.purchase_history.len()).sum();
        (self.users.len(), self.items.len(), total_purchases)
    }
}

impl Default for DataIndex {
    fn default() -> Self {
        Self::new()
    }
}
