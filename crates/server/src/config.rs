//! Engine configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```json
//! { "weights": { "collaborative": 0.7 }, "result_limit": 10 }
//! ```

use crate::error::{RecommendError, Result};
use serde::{Deserialize, Serialize};
use sources::DEFAULT_CONTENT_LIMIT;
use std::fs;
use std::path::Path;

/// Flat score each source contributes to an item's total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceWeights {
    #[serde(default = "default_collaborative_weight")]
    pub collaborative: f64,

    #[serde(default = "default_content_based_weight")]
    pub content_based: f64,
}

fn default_collaborative_weight() -> f64 {
    0.6
}

fn default_content_based_weight() -> f64 {
    0.4
}

impl SourceWeights {
    pub fn new(collaborative: f64, content_based: f64) -> Self {
        Self {
            collaborative,
            content_based,
        }
    }

    /// Total for an item proposed by both sources
    pub fn hybrid(&self) -> f64 {
        self.collaborative + self.content_based
    }
}

impl Default for SourceWeights {
    fn default() -> Self {
        Self::new(default_collaborative_weight(), default_content_based_weight())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub weights: SourceWeights,

    /// Candidates kept from the content-based source before merging
    #[serde(default = "default_content_limit")]
    pub content_limit: usize,

    /// Length cap of the final list
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

fn default_content_limit() -> usize {
    DEFAULT_CONTENT_LIMIT
}

fn default_result_limit() -> usize {
    6
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: SourceWeights::default(),
            content_limit: default_content_limit(),
            result_limit: default_result_limit(),
        }
    }
}

impl EngineConfig {
    /// Load a config from a JSON file and validate it
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let config_error = |reason: String| RecommendError::Config {
            path: path.display().to_string(),
            reason,
        };
        let content = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config: Self =
            serde_json::from_str(&content).map_err(|e| config_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_weights(mut self, weights: SourceWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_content_limit(mut self, limit: usize) -> Self {
        self.content_limit = limit;
        self
    }

    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    /// Weights must be finite and non-negative
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in [
            ("collaborative", self.weights.collaborative),
            ("content_based", self.weights.content_based),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(RecommendError::InvalidConfig(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }
}
