//! Error types for the catalog crate.
//!
//! Loading is the only fallible part of the catalog: once a `DataIndex`
//! is built, lookups return `Option`s and never fail.

use thiserror::Error;

/// Errors that can occur while loading or validating catalog data
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Data file could not be found
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A data file was not valid JSON for the expected shape
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// The same id appeared twice in one collection
    #[error("Duplicate {entity} id {id}")]
    DuplicateId { entity: String, id: u32 },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
