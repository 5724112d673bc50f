//! The content provider port.
//!
//! Providers are the engine's only window onto live content - a remote
//! popularity feed, an AI suggestion service, or the local catalog stand-in.
//! The engine consumes this trait; it never implements transport itself.

use crate::error::ProviderResult;
use catalog::{MediaItem, UserInteraction};

/// Trait for content providers.
///
/// ## Design Note
/// - `Send + Sync` so a provider can be shared across tasks
/// - Both fetches are async: real implementations cross a network boundary
/// - Failures are always `ProviderError`; callers keep a fallback path
#[async_trait::async_trait]
pub trait ContentProvider: Send + Sync {
    /// Returns the name of this provider (for logging/debugging)
    fn name(&self) -> &str;

    /// Fetch generally popular content, best first.
    async fn fetch_popular_content(&self) -> ProviderResult<Vec<MediaItem>>;

    /// Fetch suggestions tailored to a taste profile.
    ///
    /// # Arguments
    /// * `genre_preferences` - preferred genre labels, strongest first
    /// * `history` - recent interactions, most recent first
    /// * `candidate_pool` - items the caller already holds; providers may
    ///   re-rank these instead of fetching fresh content
    async fn fetch_personalized_suggestions(
        &self,
        genre_preferences: &[String],
        history: &[UserInteraction],
        candidate_pool: &[MediaItem],
    ) -> ProviderResult<Vec<MediaItem>>;
}
