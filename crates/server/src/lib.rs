//! Server crate for the hybrid recommendation engine.
//!
//! This crate contains the hybrid merger and the orchestrator that
//! coordinates the candidate sources for one request.

pub mod config;
pub mod error;
pub mod merger;
pub mod orchestrator;

pub use config::{EngineConfig, SourceWeights};
pub use error::RecommendError;
pub use merger::recommend;
pub use orchestrator::{Recommendation, RecommendationOrchestrator};
