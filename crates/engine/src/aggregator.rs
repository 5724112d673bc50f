//! Merging, scoring, and ranking of provider candidates.
//!
//! The aggregator takes the already-awaited outcome of each content source
//! and turns it into the ranked slate the UI presents. It is a synchronous
//! pure function: fetching (and its concurrency) belongs to the caller.
//!
//! ## Algorithm
//! 1. Quota short-circuit: zero remaining choices yields an empty slate
//!    before sources are even inspected
//! 2. Concatenate source results in priority order (personalized feed
//!    ahead of the popular feed); a source failure drops that source, all
//!    sources failing is a `ProviderError`
//! 3. Deduplicate by item id - first occurrence wins, preserving priority
//! 4. Exclude items already chosen today, items carrying a prior rating,
//!    and items the history records as judged
//! 5. Score: sum of profile weights over the item's genres, plus the
//!    item's own rating. Items matching no tracked genre still qualify
//! 6. Stable sort by score desc, then rating desc, then merge order
//! 7. Truncate to the remaining quota

use crate::history::InteractionHistory;
use crate::profile::PreferenceProfile;
use catalog::{ItemId, MediaItem};
use providers::{ProviderError, ProviderResult};
use std::collections::HashSet;
use tracing::{debug, warn};

/// The outcome of one content source, as resolved by the caller.
pub type SourceOutcome = ProviderResult<Vec<MediaItem>>;

/// A media item paired with its computed match score.
///
/// Transient: candidates exist only between scoring and ranking and are
/// never persisted.
#[derive(Debug, Clone)]
pub struct RecommendationCandidate {
    pub item: MediaItem,
    pub score: f32,
}

/// Score one item against the profile.
///
/// The profile term is the sum of stored weights over the item's genres;
/// untracked genres contribute zero, so cold-start items compete on their
/// own rating.
pub fn score_item(profile: &PreferenceProfile, item: &MediaItem) -> f32 {
    let genre_term: i32 = item.genres.iter().map(|genre| profile.weight(genre)).sum();
    genre_term as f32 + item.rating
}

/// Score and rank a merged candidate list, best first.
///
/// The sort is stable: equal (score, rating) pairs keep their merge order.
pub fn rank(profile: &PreferenceProfile, items: Vec<MediaItem>) -> Vec<RecommendationCandidate> {
    let mut candidates: Vec<RecommendationCandidate> = items
        .into_iter()
        .map(|item| {
            let score = score_item(profile, &item);
            RecommendationCandidate { item, score }
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.item
                    .rating
                    .partial_cmp(&a.item.rating)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });
    candidates
}

/// Merge source outcomes into a ranked, quota-bounded recommendation list.
///
/// # Arguments
/// * `profile` - current genre weights
/// * `history` - interaction log; judged items are excluded
/// * `chosen_ids` - items already chosen today
/// * `remaining_quota` - how many items the caller may still present
/// * `sources` - per-source outcomes, highest priority first
///
/// # Errors
/// `ProviderError::Unavailable` when every source failed. Fallback is the
/// caller's explicit choice - nothing is sampled here.
pub fn recommend(
    profile: &PreferenceProfile,
    history: &InteractionHistory,
    chosen_ids: &HashSet<ItemId>,
    remaining_quota: usize,
    sources: Vec<SourceOutcome>,
) -> ProviderResult<Vec<MediaItem>> {
    if remaining_quota == 0 {
        debug!("Daily quota exhausted, skipping recommendation");
        return Ok(Vec::new());
    }

    let source_count = sources.len();
    let mut merged: Vec<MediaItem> = Vec::new();
    let mut failures = 0;
    for (priority, outcome) in sources.into_iter().enumerate() {
        match outcome {
            Ok(items) => {
                debug!("Source {} contributed {} candidates", priority, items.len());
                merged.extend(items);
            }
            Err(error) => {
                warn!("Source {} failed: {}", priority, error);
                failures += 1;
            }
        }
    }
    if source_count > 0 && failures == source_count {
        return Err(ProviderError::Unavailable(format!(
            "all {} content sources failed",
            source_count
        )));
    }

    // Dedupe by id, first occurrence wins (retain preserves order)
    let mut seen: HashSet<ItemId> = HashSet::with_capacity(merged.len());
    merged.retain(|item| seen.insert(item.id.clone()));

    // Drop everything the user has already dealt with
    let rated = history.rated_item_ids();
    merged.retain(|item| {
        !chosen_ids.contains(&item.id)
            && item.user_rating.is_none()
            && !rated.contains(item.id.as_str())
    });

    let mut ranked = rank(profile, merged);
    ranked.truncate(remaining_quota);

    debug!("Returning {} recommendations", ranked.len());
    Ok(ranked.into_iter().map(|candidate| candidate.item).collect())
}
