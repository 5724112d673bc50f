//! Catalog-backed provider.
//!
//! Serves the static catalog through the provider port so the discover
//! flow can run without any live upstream - in the CLI demo, in tests,
//! and as seeded content on first launch.
//!
//! ## Strategies
//! - Popular: rating-descending over the whole catalog
//! - Personalized: genre-overlap filter against the preference list,
//!   rating-descending within the matches

use crate::error::ProviderResult;
use crate::traits::ContentProvider;
use catalog::{Catalog, MediaItem, UserInteraction};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Serves catalog items through the `ContentProvider` port.
pub struct CatalogProvider {
    /// Shared reference to the catalog (read-only, so no lock needed)
    catalog: Arc<Catalog>,

    /// Maximum number of items returned per fetch
    page_size: usize,
}

impl CatalogProvider {
    /// Create a new catalog provider.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            page_size: 50,
        }
    }

    /// Configure the maximum page size (default: 50)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    fn ranked_by_rating(&self, mut items: Vec<MediaItem>) -> Vec<MediaItem> {
        items.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        items.truncate(self.page_size);
        items
    }
}

#[async_trait::async_trait]
impl ContentProvider for CatalogProvider {
    fn name(&self) -> &str {
        "CatalogProvider"
    }

    #[instrument(skip(self))]
    async fn fetch_popular_content(&self) -> ProviderResult<Vec<MediaItem>> {
        let items = self.ranked_by_rating(self.catalog.items().to_vec());
        debug!("Serving {} popular items from catalog", items.len());
        Ok(items)
    }

    #[instrument(skip(self, _history, candidate_pool))]
    async fn fetch_personalized_suggestions(
        &self,
        genre_preferences: &[String],
        _history: &[UserInteraction],
        candidate_pool: &[MediaItem],
    ) -> ProviderResult<Vec<MediaItem>> {
        // Re-rank the caller's pool when one is supplied, otherwise draw
        // from the catalog.
        let pool: Vec<MediaItem> = if candidate_pool.is_empty() {
            self.catalog.items().to_vec()
        } else {
            candidate_pool.to_vec()
        };

        // With no stated preferences there is nothing to match against;
        // popularity ranking is the cold-start answer.
        if genre_preferences.is_empty() {
            return Ok(self.ranked_by_rating(pool));
        }

        let matches: Vec<MediaItem> = pool
            .into_iter()
            .filter(|item| {
                item.genres
                    .iter()
                    .any(|genre| genre_preferences.contains(genre))
            })
            .collect();

        debug!(
            "Matched {} items against {} preferred genres",
            matches.len(),
            genre_preferences.len()
        );
        Ok(self.ranked_by_rating(matches))
    }
}
