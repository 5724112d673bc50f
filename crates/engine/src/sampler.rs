//! Quota-aware random sampling over the static catalog.
//!
//! When every live source is down, the discover flow still needs cards to
//! show. The sampler draws an unbiased sample without replacement from the
//! catalog items the user hasn't dealt with yet, via a partial
//! Fisher-Yates shuffle: only the first `draw` positions are shuffled, and
//! every eligible item has equal probability of landing in them.
//!
//! The generator is injected, so tests seed a `StdRng` and production
//! passes `rand::rng()`.

use catalog::{ItemId, MediaItem};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use tracing::debug;

/// Draw a random selection of unchosen, unrated catalog items.
///
/// The draw size is `min(target_count, remaining_quota, eligible)`. An
/// empty catalog - or one the user has fully worked through - yields an
/// empty result, never an error.
///
/// # Arguments
/// * `catalog_items` - the static fallback content set
/// * `chosen_ids` - items already chosen today
/// * `already_rated` - items the user has judged on any day
/// * `target_count` - how many items the caller wants
/// * `remaining_quota` - how many the caller may still present today
/// * `rng` - the random source
pub fn sample<R: Rng + ?Sized>(
    catalog_items: &[MediaItem],
    chosen_ids: &HashSet<ItemId>,
    already_rated: &HashSet<ItemId>,
    target_count: usize,
    remaining_quota: usize,
    rng: &mut R,
) -> Vec<MediaItem> {
    let mut eligible: Vec<&MediaItem> = catalog_items
        .iter()
        .filter(|item| {
            !chosen_ids.contains(&item.id)
                && !already_rated.contains(&item.id)
                && item.user_rating.is_none()
        })
        .collect();

    let eligible_count = eligible.len();
    let draw = target_count.min(remaining_quota).min(eligible_count);
    if draw == 0 {
        return Vec::new();
    }

    let (drawn, _rest) = eligible.partial_shuffle(rng, draw);
    debug!("Sampled {} of {} eligible catalog items", draw, eligible_count);
    drawn.iter().map(|item| (*item).clone()).collect()
}
