//! Repository abstraction over where catalog and user data come from.
//!
//! Scoring code only ever sees a `DataIndex`; swapping the built-in seed
//! data for files (or a real store) means implementing
//! `CatalogRepository` and nothing else.

use crate::error::Result;
use crate::parser;
use crate::seed;
use crate::types::{Item, User};
use std::path::{Path, PathBuf};

/// Source of the item catalog and the user profile store
pub trait CatalogRepository: Send + Sync {
    /// Returns the name of this repository (for logging)
    fn name(&self) -> &str;

    /// Load all items in catalog order
    fn load_items(&self) -> Result<Vec<Item>>;

    /// Load all users in registration order
    fn load_users(&self) -> Result<Vec<User>>;

    /// Load both collections. Implementations may override this to
    /// load them concurrently.
    fn load_all(&self) -> Result<(Vec<Item>, Vec<User>)> {
        Ok((self.load_items()?, self.load_users()?))
    }
}

/// The built-in demo data set
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedRepository;

impl CatalogRepository for SeedRepository {
    fn name(&self) -> &str {
        "seed"
    }

    fn load_items(&self) -> Result<Vec<Item>> {
        Ok(seed::seed_items())
    }

    fn load_users(&self) -> Result<Vec<User>> {
        Ok(seed::seed_users())
    }
}

/// Reads `items.json` and `users.json` from a directory
#[derive(Debug, Clone)]
pub struct JsonRepository {
    data_dir: PathBuf,
}

impl JsonRepository {
    pub const ITEMS_FILE: &'static str = "items.json";
    pub const USERS_FILE: &'static str = "users.json";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl CatalogRepository for JsonRepository {
    fn name(&self) -> &str {
        "json"
    }

    fn load_items(&self) -> Result<Vec<Item>> {
        parser::parse_items(&self.data_dir.join(Self::ITEMS_FILE))
    }

    fn load_users(&self) -> Result<Vec<User>> {
        parser::parse_users(&self.data_dir.join(Self::USERS_FILE))
    }

    fn load_all(&self) -> Result<(Vec<Item>, Vec<User>)> {
        // Parse both files in parallel
        let (items, users) = rayon::join(|| self.load_items(), || self.load_users());
        Ok((items?, users?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_seed_repository() {
        let (items, users) = SeedRepository.load_all().unwrap();
        assert_eq!(items.len(), 10);
        assert_eq!(users.len(), 3);
        assert_eq!(users[0].purchase_history, vec![1, 2, 7]);
    }

    #[test]
    fn test_json_repository_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(JsonRepository::ITEMS_FILE),
            serde_json::to_string(&seed::seed_items()).unwrap(),
        )
        .unwrap();
        fs::write(
            dir.path().join(JsonRepository::USERS_FILE),
            serde_json::to_string(&seed::seed_users()).unwrap(),
        )
        .unwrap();

        let repo = JsonRepository::new(dir.path());
        let (items, users) = repo.load_all().unwrap();

        assert_eq!(items, seed::seed_items());
        assert_eq!(users, seed::seed_users());
    }

    #[test]
    fn test_json_repository_missing_users_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(JsonRepository::ITEMS_FILE), "[]").unwrap();

        let repo = JsonRepository::new(dir.path());
        assert!(repo.load_all().is_err());
    }
}
