//! # Providers Crate
//!
//! Content sources for the recommendation engine.
//!
//! ## Components
//!
//! ### ContentProvider port
//! The async trait every content source implements:
//! - Popular content feed (generic, taste-agnostic)
//! - Personalized suggestions (driven by genre preferences and history)
//!
//! ### CatalogProvider
//! A local implementation over the static catalog. Real deployments plug
//! remote providers into the same port; the engine cannot tell the
//! difference, which is exactly the point.
//!
//! ## Example Usage
//!
//! ```ignore
//! use providers::{CatalogProvider, ContentProvider};
//! use catalog::Catalog;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::builtin());
//! let provider = CatalogProvider::new(catalog);
//!
//! let popular = provider.fetch_popular_content().await?;
//! let personal = provider
//!     .fetch_personalized_suggestions(&prefs, &history, &[])
//!     .await?;
//! ```

// Public modules
pub mod error;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use error::{ProviderError, ProviderResult};
pub use local::CatalogProvider;
pub use traits::ContentProvider;
