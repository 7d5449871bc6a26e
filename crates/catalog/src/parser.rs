//! Parser for the JSON data files.
//!
//! - items.json: array of `Item` objects
//! - users.json: array of `User` objects
//!
//! Both files are plain JSON arrays; the order of the array is the
//! catalog order (items) or registration order (users).

use crate::error::{CatalogError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Read a file and deserialize it as a JSON array of `T`
fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path)?;
    parse_json_array(&content, &file_label(path))
}

fn parse_json_array<T: DeserializeOwned>(content: &str, file: &str) -> Result<Vec<T>> {
    serde_json::from_str(content).map_err(|e| CatalogError::ParseError {
        file: file.to_string(),
        reason: e.to_string(),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reject the first id that appears twice
fn ensure_unique_ids(ids: impl Iterator<Item = u32>, entity: &str) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                entity: entity.to_string(),
                id,
            });
        }
    }
    Ok(())
}

/// Parse the items.json file
pub fn parse_items(path: &Path) -> Result<Vec<Item>> {
    let items: Vec<Item> = read_json_array(path)?;
    ensure_unique_ids(items.iter().map(|i| i.id), "item")?;
    Ok(items)
}

/// Parse the users.json file
pub fn parse_users(path: &Path) -> Result<Vec<User>> {
    let users: Vec<User> = read_json_array(path)?;
    ensure_unique_ids(users.iter().map(|u| u.id), "user")?;
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_defaults_image() {
        let items: Vec<Item> = parse_json_array(
            r#"[{"id": 1, "name": "Keyboard", "category": "Electronics", "price": 2499, "rating": 4.6}]"#,
            "items.json",
        )
        .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price, 2499);
        assert!(items[0].image.is_empty());
    }

    #[test]
    fn test_parse_user_defaults_histories() {
        let users: Vec<User> =
            parse_json_array(r#"[{"id": 7, "name": "New User"}]"#, "users.json").unwrap();

        assert_eq!(users[0].id, 7);
        assert!(users[0].purchase_history.is_empty());
        assert!(users[0].browsing_history.is_empty());
        assert!(users[0].preferences.is_empty());
    }

    #[test]
    fn test_parse_error_names_file() {
        let result: Result<Vec<Item>> = parse_json_array("{not json", "items.json");
        match result {
            Err(CatalogError::ParseError { file, .. }) => assert_eq!(file, "items.json"),
            other => panic!("expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ensure_unique_ids([1, 2, 1].into_iter(), "item");
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateId { id: 1, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = parse_items(Path::new("/definitely/not/here/items.json"));
        assert!(matches!(result, Err(CatalogError::FileNotFound { .. })));
    }
}
