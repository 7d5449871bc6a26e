//! Built-in demo data set: ten products across two categories and
//! three users.

use crate::types::{Item, User};

fn item(id: u32, name: &str, category: &str, price: u32, rating: f64, image: &str) -> Item {
    Item {
        id,
        name: name.to_string(),
        category: category.to_string(),
        price,
        rating,
        image: image.to_string(),
    }
}

fn user(id: u32, name: &str, purchases: &[u32], browsed: &[u32], preferences: &[&str]) -> User {
    User {
        id,
        name: name.to_string(),
        purchase_history: purchases.to_vec(),
        browsing_history: browsed.to_vec(),
        preferences: preferences.iter().map(|p| p.to_string()).collect(),
    }
}

/// The demo catalog in catalog order
pub fn seed_items() -> Vec<Item> {
    vec![
        item(1, "Wireless Headphones", "Electronics", 2999, 4.5, "🎧"),
        item(2, "Smart Watch", "Electronics", 5999, 4.7, "⌚"),
        item(3, "Laptop Backpack", "Accessories", 1499, 4.3, "🎒"),
        item(4, "Bluetooth Speaker", "Electronics", 1999, 4.6, "🔊"),
        item(5, "Phone Case", "Accessories", 499, 4.2, "📱"),
        item(6, "USB-C Cable", "Accessories", 299, 4.4, "🔌"),
        item(7, "Portable Charger", "Electronics", 1299, 4.5, "🔋"),
        item(8, "Wireless Mouse", "Electronics", 899, 4.3, "🖱️"),
        item(9, "Keyboard", "Electronics", 2499, 4.6, "⌨️"),
        item(10, "Laptop Stand", "Accessories", 1799, 4.4, "💻"),
    ]
}

/// The demo users in registration order
pub fn seed_users() -> Vec<User> {
    vec![
        user(1, "Rahul Sharma", &[1, 2, 7], &[4, 8, 9], &["Electronics"]),
        user(2, "Priya Patel", &[3, 5, 6], &[1, 2, 10], &["Accessories", "Electronics"]),
        user(3, "Amit Kumar", &[8, 9], &[2, 4, 7], &["Electronics"]),
    ]
}
