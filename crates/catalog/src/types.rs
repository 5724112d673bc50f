//! Core domain types for media content and user interactions.
//!
//! This module defines the fundamental data structures used throughout the
//! system:
//! - Type alias for item identifiers (ItemId)
//! - Enums for fixed sets of values (MediaKind, UserAction)
//! - MediaItem as an immutable value object produced by content providers
//! - UserInteraction as the record of a single swipe

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a media item.
///
/// Identifiers are provider-assigned strings (e.g., "58841"), so unlike a
/// numeric database key they are opaque to the engine.
pub type ItemId = String;

// =============================================================================
// Media Types
// =============================================================================

/// The kind of media an item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
    Book,
    Music,
}

/// A single piece of media content.
///
/// Items are immutable value objects: the engine filters and re-scores them
/// but never mutates them. `user_rating` carries a judgment made before the
/// item reached the engine (e.g., seeded catalog data); `None` means unjudged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: ItemId,
    pub kind: MediaKind,
    pub title: String,
    /// Aggregate rating on the provider's scale (e.g., 0.0-10.0)
    pub rating: f32,
    pub year: u16,
    /// Ordered genre tags; ordering comes from the provider
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<UserAction>,
}

// =============================================================================
// Interaction Types
// =============================================================================

/// The resolved action behind a swipe gesture.
///
/// Gesture-to-action mapping (left/right/up) is a presentation concern; the
/// engine only ever sees the resolved action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserAction {
    Like,
    Dislike,
    Superlike,
    Skip,
}

impl UserAction {
    /// Whether this action judges the item (skip leaves it unjudged).
    pub fn is_rating(self) -> bool {
        !matches!(self, UserAction::Skip)
    }
}

/// A single recorded swipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInteraction {
    pub item_id: ItemId,
    pub action: UserAction,
    /// Wall-clock seconds; used only for ordering and trimming
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_serde_lowercase() {
        let json = serde_json::to_string(&UserAction::Superlike).unwrap();
        assert_eq!(json, "\"superlike\"");

        let action: UserAction = serde_json::from_str("\"dislike\"").unwrap();
        assert_eq!(action, UserAction::Dislike);
    }

    #[test]
    fn test_skip_is_not_a_rating() {
        assert!(UserAction::Like.is_rating());
        assert!(UserAction::Dislike.is_rating());
        assert!(UserAction::Superlike.is_rating());
        assert!(!UserAction::Skip.is_rating());
    }

    #[test]
    fn test_item_optional_fields_default_absent() {
        let json = r#"{
            "id": "58841",
            "kind": "movie",
            "title": "Heat",
            "rating": 8.3,
            "year": 1995,
            "genres": ["Crime", "Drama"]
        }"#;

        let item: MediaItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "58841");
        assert_eq!(item.kind, MediaKind::Movie);
        assert!(item.cast.is_none());
        assert!(item.user_rating.is_none());
    }
}
