//! # Sources Crate
//!
//! Candidate generation for product recommendations.
//!
//! ## Components
//!
//! ### Similarity
//! Jaccard similarity between two users' purchase sets.
//!
//! ### Collaborative Source
//! "Users who bought what you bought also bought...": walks the other
//! users from most to least similar and collects their purchases.
//!
//! ### Content-Based Source
//! Scores unowned items by how often the user bought in the item's
//! category, weighted by the item's rating.
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{DataIndex, SeedRepository};
//! use sources::{user_context::build_user_context, CollaborativeSource, ContentBasedSource};
//! use std::sync::Arc;
//!
//! let data_index = Arc::new(DataIndex::load_from(&SeedRepository)?);
//! let context = build_user_context(&data_index, 1)?;
//!
//! let collaborative = CollaborativeSource::new(data_index.clone());
//! let content_based = ContentBasedSource::new(data_index.clone());
//!
//! let item_ids = collaborative.get_candidates(&context);
//! let scored = content_based.get_candidates(&context);
//! ```
//!
//! Both sources only read the `DataIndex`, so they can run in parallel.

pub mod collaborative;
pub mod content_based;
pub mod similarity;
pub mod types;
pub mod user_context;

// Re-export commonly used types
pub use collaborative::{collaborative_candidates, CollaborativeSource};
pub use content_based::{content_based_candidates, ContentBasedSource, DEFAULT_CONTENT_LIMIT};
pub use similarity::similarity;
pub use types::{RecommendationSource, ScoredItem, UserContext};
