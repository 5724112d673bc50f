//! Parsing for catalog files and enum-valued fields.
//!
//! Catalogs are plain JSON arrays of media items. This module handles
//! reading them from disk and parsing user-facing enum values (actions,
//! media kinds) from strings via the `FromStr` trait.

use crate::error::{CatalogError, Result};
use crate::types::{MediaItem, MediaKind, UserAction};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

/// Parse a catalog from a JSON string.
///
/// The expected format is a JSON array of media items:
///
/// ```json
/// [
///   { "id": "1", "kind": "movie", "title": "Heat", "rating": 8.3,
///     "year": 1995, "genres": ["Crime", "Drama"] }
/// ]
/// ```
pub fn parse_items_json(json: &str) -> Result<Vec<MediaItem>> {
    let items: Vec<MediaItem> = serde_json::from_str(json)?;
    Ok(items)
}

/// Load catalog items from a JSON file on disk.
pub fn load_items(path: &Path) -> Result<Vec<MediaItem>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let items: Vec<MediaItem> = serde_json::from_reader(reader)?;
    Ok(items)
}

impl FromStr for UserAction {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "like" => Ok(UserAction::Like),
            "dislike" => Ok(UserAction::Dislike),
            "superlike" => Ok(UserAction::Superlike),
            "skip" => Ok(UserAction::Skip),
            _ => Err(CatalogError::InvalidValue {
                field: "action".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for MediaKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "movie" => Ok(MediaKind::Movie),
            "series" => Ok(MediaKind::Series),
            "book" => Ok(MediaKind::Book),
            "music" => Ok(MediaKind::Music),
            _ => Err(CatalogError::InvalidValue {
                field: "kind".to_string(),
                value: s.to_string(),
            }),
        }
    }
}
