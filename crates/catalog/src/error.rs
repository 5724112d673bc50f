//! Error types for catalog loading and parsing.

use thiserror::Error;

/// Errors that can occur while loading or validating a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error occurred while reading the catalog file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Catalog JSON couldn't be parsed
    #[error("Failed to parse catalog JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Two items in the catalog share an identifier
    #[error("Duplicate item id in catalog: {id}")]
    DuplicateItem { id: String },

    /// A field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
