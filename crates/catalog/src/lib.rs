//! # Catalog Crate
//!
//! Domain types and the static content catalog for the recommendation
//! engine.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MediaItem, MediaKind, UserAction,
//!   UserInteraction)
//! - **loader**: Parse catalog JSON files and enum-valued strings
//! - **catalog**: Indexed in-memory catalog with id and genre lookups
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! // Load a catalog file, or fall back to the built-in set
//! let catalog = Catalog::load_from_file(Path::new("data/catalog.json"))?;
//!
//! let item = catalog.get("101").unwrap();
//! println!("{} ({}) - {:?}", item.title, item.year, item.genres);
//! ```

// Public modules
pub mod catalog;
pub mod error;
pub mod loader;
pub mod types;

// Re-export commonly used types for convenience
pub use catalog::Catalog;
pub use error::{CatalogError, Result};
pub use types::{ItemId, MediaItem, MediaKind, UserAction, UserInteraction};
