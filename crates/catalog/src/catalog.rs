//! The Catalog - an indexed, in-memory set of media items.
//!
//! The catalog is the static content set available without any live
//! provider: the fallback sampler draws from it and the local provider
//! serves it. It provides O(1) id lookups and a genre index built once
//! at construction.

use crate::error::{CatalogError, Result};
use crate::loader;
use crate::types::{ItemId, MediaItem};
use std::collections::HashMap;
use std::path::Path;

/// Built-in catalog shipped with the binary, used when no catalog file is
/// supplied. Mirrors the seeded content set of the original application.
const BUILTIN_CATALOG_JSON: &str = include_str!("../data/builtin.json");

/// An indexed collection of media items.
///
/// Items keep their file order in `items`; `by_id` and `genre_index` are
/// secondary indices built at construction. Methods return references -
/// the catalog owns the data for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<MediaItem>,
    by_id: HashMap<ItemId, usize>,
    genre_index: HashMap<String, Vec<ItemId>>,
}

impl Catalog {
    /// Build a catalog from a list of items.
    ///
    /// # Errors
    /// Returns `CatalogError::DuplicateItem` if two items share an id -
    /// identifiers are the engine's only handle on items, so collisions
    /// would make exclusion sets ambiguous.
    pub fn from_items(items: Vec<MediaItem>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(items.len());
        let mut genre_index: HashMap<String, Vec<ItemId>> = HashMap::new();

        for (position, item) in items.iter().enumerate() {
            if by_id.insert(item.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateItem {
                    id: item.id.clone(),
                });
            }
            for genre in &item.genres {
                genre_index
                    .entry(genre.clone())
                    .or_default()
                    .push(item.id.clone());
            }
        }

        Ok(Self {
            items,
            by_id,
            genre_index,
        })
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_items(loader::parse_items_json(json)?)
    }

    /// Load a catalog from a JSON file on disk.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        Self::from_items(loader::load_items(path)?)
    }

    /// The catalog compiled into the binary.
    ///
    /// The built-in data is validated by a test, so a parse failure here is
    /// a build defect rather than a runtime condition.
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_CATALOG_JSON)
            .expect("built-in catalog is valid")
    }

    /// Get an item by id.
    pub fn get(&self, id: &str) -> Option<&MediaItem> {
        self.by_id.get(id).map(|&position| &self.items[position])
    }

    /// All items, in file order.
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Ids of all items tagged with a genre.
    ///
    /// Returns an empty slice for unknown genres.
    pub fn items_with_genre(&self, genre: &str) -> &[ItemId] {
        self.genre_index
            .get(genre)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
