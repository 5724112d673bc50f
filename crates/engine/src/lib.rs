//! # Engine Crate
//!
//! The pure core of the recommendation engine.
//!
//! ## Components
//!
//! - **profile**: weighted genre-preference profile (at most 15 genres),
//!   updated by a pure fold over swipe interactions
//! - **history**: bounded interaction log, most recent first
//! - **quota**: calendar-day choice quota (20 distinct items per day)
//! - **aggregator**: merge, dedupe, score, rank, and truncate provider
//!   candidates
//! - **sampler**: quota-aware random sampling over the static catalog for
//!   the provider-failure fallback
//!
//! Everything here is synchronous and side-effect-free: each function maps
//! immutable snapshots of its inputs to a new value. Fetching, persistence,
//! and clock access live in the session layer, which makes these components
//! trivially testable in isolation.
//!
//! ## Example Usage
//!
//! ```ignore
//! use engine::{PreferenceProfile, InteractionHistory, DailyQuota, recommend};
//!
//! let profile = profile.apply(&interaction, &pool);
//! history.record(interaction);
//! quota.record_choice(&item_id, today);
//!
//! let slate = recommend(
//!     &profile,
//!     &history,
//!     quota.chosen(today),
//!     quota.remaining(today),
//!     sources,
//! )?;
//! ```

// Public modules
pub mod aggregator;
pub mod history;
pub mod profile;
pub mod quota;
pub mod sampler;

// Re-export commonly used types and functions
pub use aggregator::{RecommendationCandidate, SourceOutcome, rank, recommend, score_item};
pub use history::{InteractionHistory, InteractionStats, MAX_HISTORY};
pub use profile::{GenreWeight, MAX_TRACKED_GENRES, PreferenceProfile};
pub use quota::{DAILY_CHOICE_LIMIT, DailyQuota};
pub use sampler::sample;

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{MediaItem, MediaKind, UserAction, UserInteraction};
    use chrono::NaiveDate;

    fn item(id: &str, rating: f32, genres: &[&str]) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            kind: MediaKind::Movie,
            title: format!("Item {}", id),
            rating,
            year: 2000,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            cast: None,
            director: None,
            description: None,
            user_rating: None,
        }
    }

    /// Swipe, fold, and recommend end to end using only the pure core.
    #[test]
    fn test_swipe_to_recommendation_flow() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let pool = vec![
            item("1", 8.0, &["Crime", "Drama"]),
            item("2", 7.0, &["Comedy"]),
        ];

        let mut profile = PreferenceProfile::new();
        let mut history = InteractionHistory::new();
        let mut quota = DailyQuota::new(today);

        let swipe = UserInteraction {
            item_id: "1".to_string(),
            action: UserAction::Superlike,
            timestamp: 1,
        };
        profile = profile.apply(&swipe, &pool);
        history.record(swipe);
        assert!(quota.record_choice("1", today));

        let sources: Vec<SourceOutcome> = vec![Ok(vec![
            item("1", 8.0, &["Crime", "Drama"]), // judged, must not reappear
            item("3", 6.0, &["Crime"]),
            item("4", 9.0, &["Comedy"]),
        ])];

        let remaining = quota.remaining(today);
        let slate = recommend(&profile, &history, quota.chosen(today), remaining, sources)
            .unwrap();

        let ids: Vec<&str> = slate.iter().map(|i| i.id.as_str()).collect();
        // "1" is excluded; "4" rates higher but "3" matches the Crime
        // weight (2 + 6.0 = 8.0 vs 9.0) - popular still wins here
        assert_eq!(ids, ["4", "3"]);
        assert_eq!(remaining, DAILY_CHOICE_LIMIT - 1);
    }
}
