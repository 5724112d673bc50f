//! The weighted genre-preference profile.
//!
//! Every swipe folds into this profile: liked genres gain weight, disliked
//! genres lose it, and the strongest interests crowd out the weakest once
//! the profile is full. The fold is a pure function - the same profile and
//! interaction always produce the same result - which keeps the update
//! logic trivially testable.
//!
//! ## Algorithm
//! 1. Look up the interacted item in the candidate pool
//! 2. Apply the action's weight delta to each of the item's genres
//!    (like +1, superlike +2, dislike -1, skip: no change)
//! 3. Drop entries whose weight fell to zero or below
//! 4. If more than 15 genres remain, evict lowest weight first
//!    (ties: earliest inserted goes first)

use catalog::{MediaItem, UserAction, UserInteraction};
use serde::{Deserialize, Serialize};

/// Maximum number of genres tracked at once.
pub const MAX_TRACKED_GENRES: usize = 15;

/// A single tracked genre and its accumulated weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreWeight {
    pub genre: String,
    pub weight: i32,
}

/// Weighted genre-interest map, bounded at 15 genres.
///
/// Entries are stored in insertion order rather than in a hash map so that
/// eviction tie-breaks are deterministic. Stored weights are always
/// positive; an entry that would drop to zero is removed instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceProfile {
    entries: Vec<GenreWeight>,
}

impl PreferenceProfile {
    /// Create an empty profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a profile from a set of genres (onboarding).
    ///
    /// Duplicates are dropped, order is preserved, and the result is capped
    /// at 15 genres, each starting at weight 1.
    pub fn seed<I>(genres: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut profile = Self::new();
        for genre in genres {
            if profile.entries.len() == MAX_TRACKED_GENRES {
                break;
            }
            if profile.weight(&genre) == 0 {
                profile.entries.push(GenreWeight { genre, weight: 1 });
            }
        }
        profile
    }

    /// The stored weight for a genre, 0 if untracked.
    pub fn weight(&self, genre: &str) -> i32 {
        self.entries
            .iter()
            .find(|entry| entry.genre == genre)
            .map(|entry| entry.weight)
            .unwrap_or(0)
    }

    /// Number of tracked genres.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracked entries in insertion order.
    pub fn entries(&self) -> &[GenreWeight] {
        &self.entries
    }

    /// The top `n` genres by weight, strongest first.
    ///
    /// Equal weights keep insertion order (the sort is stable), so the
    /// projection is deterministic.
    pub fn top_genres(&self, n: usize) -> Vec<String> {
        let mut ranked: Vec<&GenreWeight> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.weight.cmp(&a.weight));
        ranked
            .into_iter()
            .take(n)
            .map(|entry| entry.genre.clone())
            .collect()
    }

    /// All tracked genres, strongest first.
    pub fn ranked_genres(&self) -> Vec<String> {
        self.top_genres(self.entries.len())
    }

    /// Fold one interaction into the profile, returning the updated profile.
    ///
    /// Pure: `self` is untouched. A skip, or an interaction whose item is
    /// not in `candidate_pool`, returns a profile equal to the input.
    ///
    /// # Arguments
    /// * `interaction` - the recorded swipe
    /// * `candidate_pool` - the items currently on screen; the interacted
    ///   item's genres are looked up here
    pub fn apply(
        &self,
        interaction: &UserInteraction,
        candidate_pool: &[MediaItem],
    ) -> PreferenceProfile {
        let delta = match interaction.action {
            UserAction::Like => 1,
            UserAction::Superlike => 2,
            UserAction::Dislike => -1,
            UserAction::Skip => return self.clone(),
        };

        let Some(item) = candidate_pool
            .iter()
            .find(|item| item.id == interaction.item_id)
        else {
            // No genres to fold without the item
            return self.clone();
        };

        let mut next = self.clone();
        for genre in &item.genres {
            next.adjust(genre, delta);
        }
        next.entries.retain(|entry| entry.weight > 0);
        next.evict_overflow();
        next
    }

    /// Add `delta` to a genre's weight, creating the entry when a positive
    /// delta targets an untracked genre. Decrements of untracked genres do
    /// nothing - the map never holds non-positive weights.
    fn adjust(&mut self, genre: &str, delta: i32) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.genre == genre) {
            entry.weight += delta;
        } else if delta > 0 {
            self.entries.push(GenreWeight {
                genre: genre.to_string(),
                weight: delta,
            });
        }
    }

    /// Evict lowest-weight entries until at most 15 genres remain.
    ///
    /// `min_by_key` returns the first minimum, so ties evict the
    /// earliest-inserted entry.
    fn evict_overflow(&mut self) {
        while self.entries.len() > MAX_TRACKED_GENRES {
            let victim = self
                .entries
                .iter()
                .enumerate()
                .min_by_key(|(_, entry)| entry.weight)
                .map(|(index, _)| index);
            if let Some(index) = victim {
                self.entries.remove(index);
            }
        }
    }
}
