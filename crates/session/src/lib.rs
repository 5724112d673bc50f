//! # Session Crate
//!
//! The stateful layer around the pure engine: persistence of profile,
//! history, and quota under fixed storage keys, and the orchestration of
//! provider fetches into recommendation slates.
//!
//! ## Example Usage
//!
//! ```ignore
//! use session::{FileStore, SwipeSession};
//! use providers::CatalogProvider;
//! use catalog::{Catalog, UserAction};
//! use std::sync::Arc;
//!
//! let store = FileStore::open(".indicai")?;
//! let mut session = SwipeSession::load(store);
//!
//! let catalog = Arc::new(Catalog::builtin());
//! let provider = CatalogProvider::new(catalog.clone());
//!
//! let slate = session.discover(&provider, &catalog, 20).await;
//! session.swipe(&slate[0].id, UserAction::Like, &slate)?;
//! ```

pub mod session;
pub mod store;

// Re-export the session surface
pub use session::SwipeSession;
pub use store::{
    DAILY_CHOICES_KEY, FileStore, HISTORY_KEY, KeyValueStore, MemoryStore, PREFERENCES_KEY,
    StoreError,
};

// Engine projections callers commonly need alongside the session
pub use engine::{DAILY_CHOICE_LIMIT, InteractionStats};
