//! Bounded log of swipe interactions, most recent first.

use catalog::{UserAction, UserInteraction};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Maximum number of interactions retained.
pub const MAX_HISTORY: usize = 1000;

/// Aggregate interaction counts for the profile screen.
///
/// A superlike counts as a like; skips are excluded from the like ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionStats {
    pub likes: usize,
    pub dislikes: usize,
    pub skips: usize,
    pub total_interactions: usize,
    pub like_ratio: f32,
}

/// Ordered interaction log, newest first, trimmed at 1000 entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionHistory {
    entries: Vec<UserInteraction>,
}

impl InteractionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an interaction at the front of the log; the oldest entry is
    /// evicted once the log exceeds 1000 entries.
    pub fn record(&mut self, interaction: UserInteraction) {
        self.entries.insert(0, interaction);
        self.entries.truncate(MAX_HISTORY);
    }

    /// All interactions, most recent first.
    pub fn interactions(&self) -> &[UserInteraction] {
        &self.entries
    }

    /// The most recent interaction, if any.
    pub fn latest(&self) -> Option<&UserInteraction> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of items the user has judged (like/dislike/superlike).
    ///
    /// Skipped items are deliberately absent: a skip leaves the item
    /// unjudged and eligible to reappear on a later day.
    pub fn rated_item_ids(&self) -> HashSet<&str> {
        self.entries
            .iter()
            .filter(|interaction| interaction.action.is_rating())
            .map(|interaction| interaction.item_id.as_str())
            .collect()
    }

    /// Aggregate counts over the retained window.
    pub fn stats(&self) -> InteractionStats {
        let likes = self
            .entries
            .iter()
            .filter(|i| matches!(i.action, UserAction::Like | UserAction::Superlike))
            .count();
        let dislikes = self
            .entries
            .iter()
            .filter(|i| i.action == UserAction::Dislike)
            .count();
        let skips = self
            .entries
            .iter()
            .filter(|i| i.action == UserAction::Skip)
            .count();

        let like_ratio = if likes > 0 {
            likes as f32 / (likes + dislikes) as f32
        } else {
            0.0
        };

        InteractionStats {
            likes,
            dislikes,
            skips,
            total_interactions: likes + dislikes + skips,
            like_ratio,
        }
    }
}
