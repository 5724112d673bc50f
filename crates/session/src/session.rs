//! # The swipe session
//!
//! `SwipeSession` is the explicit context object that coordinates the
//! whole engine:
//! 1. Load profile, history, and quota from the persistence port
//! 2. Fold each swipe into all three, then persist
//! 3. Serve recommendation slates: quota check, concurrent provider
//!    fetches, aggregation, and the sampling fallback when providers fail
//!
//! It replaces the original application's implicit module-level state:
//! every dependency (store, providers, fallback catalog) is injected, so
//! parallel test instances never share anything.

use crate::store::{
    DAILY_CHOICES_KEY, HISTORY_KEY, KeyValueStore, PREFERENCES_KEY, StoreError, read_state,
    write_state,
};
use catalog::{Catalog, ItemId, MediaItem, UserAction, UserInteraction};
use chrono::{Local, NaiveDate, Utc};
use engine::{DailyQuota, InteractionHistory, InteractionStats, PreferenceProfile};
use providers::{ContentProvider, ProviderError, ProviderResult};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, instrument, warn};

/// Deadline for each provider fetch; expiry counts as a provider failure.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// A single user's swipe session: state + persistence + orchestration.
pub struct SwipeSession<S: KeyValueStore> {
    store: S,
    profile: PreferenceProfile,
    history: InteractionHistory,
    quota: DailyQuota,
}

impl<S: KeyValueStore> SwipeSession<S> {
    /// Load a session from the store.
    ///
    /// Absent keys start from defaults. Corrupt state resets that piece to
    /// its default with a warning - a parse failure must never abort
    /// startup.
    pub fn load(store: S) -> Self {
        let profile = load_or_default(&store, PREFERENCES_KEY);
        let history = load_or_default(&store, HISTORY_KEY);
        let quota = load_or_default(&store, DAILY_CHOICES_KEY);
        Self {
            store,
            profile,
            history,
            quota,
        }
    }

    /// Tear the session down and hand the store back, e.g. to reload.
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn profile(&self) -> &PreferenceProfile {
        &self.profile
    }

    pub fn history(&self) -> &InteractionHistory {
        &self.history
    }

    /// Aggregate interaction counts for the profile screen.
    pub fn stats(&self) -> InteractionStats {
        self.history.stats()
    }

    /// Choices left today.
    pub fn remaining_choices(&mut self) -> usize {
        self.quota.remaining(today())
    }

    /// True once today's 20 choices are used up.
    pub fn is_daily_limit_reached(&mut self) -> bool {
        self.quota.is_exhausted(today())
    }

    /// Record a swipe that happened "now".
    ///
    /// Convenience over [`record_interaction`](Self::record_interaction)
    /// for callers that don't supply their own timestamps.
    pub fn swipe(
        &mut self,
        item_id: &str,
        action: UserAction,
        candidate_pool: &[MediaItem],
    ) -> Result<bool, StoreError> {
        self.record_interaction(
            UserInteraction {
                item_id: item_id.to_string(),
                action,
                timestamp: Utc::now().timestamp(),
            },
            candidate_pool,
        )
    }

    /// Fold one interaction into profile, history, and quota, then persist.
    ///
    /// Every action - including skip - consumes quota. Returns whether the
    /// choice was counted (`false` once the daily limit is reached).
    pub fn record_interaction(
        &mut self,
        interaction: UserInteraction,
        candidate_pool: &[MediaItem],
    ) -> Result<bool, StoreError> {
        self.profile = self.profile.apply(&interaction, candidate_pool);
        let counted = self.quota.record_choice(&interaction.item_id, today());
        self.history.record(interaction);
        self.persist()?;
        Ok(counted)
    }

    /// Seed the profile from onboarding picks: each picked item's genres
    /// start at weight 1, deduplicated and capped at 15.
    pub fn seed_preferences(&mut self, picked: &[MediaItem]) -> Result<(), StoreError> {
        let genres = picked.iter().flat_map(|item| item.genres.iter().cloned());
        self.profile = PreferenceProfile::seed(genres);
        self.persist()
    }

    /// Produce the next discover slate.
    ///
    /// Fetches the personalized and popular feeds concurrently (the
    /// personalized feed ranks first on score ties), aggregates them
    /// against the current profile and quota, and falls back to sampling
    /// the static catalog when every source fails. An exhausted quota
    /// yields an empty slate without touching the providers - that is an
    /// informational state, not an error.
    #[instrument(skip(self, provider, fallback_catalog))]
    pub async fn discover(
        &mut self,
        provider: &dyn ContentProvider,
        fallback_catalog: &Catalog,
        limit: usize,
    ) -> Vec<MediaItem> {
        let now = today();
        if self.quota.is_exhausted(now) {
            info!("Daily limit of 20 choices reached, serving nothing until tomorrow");
            return Vec::new();
        }
        let remaining = self.quota.remaining(now);

        let preferences = self.profile.ranked_genres();
        let (personalized, popular) = tokio::join!(
            timeout(
                PROVIDER_TIMEOUT,
                provider.fetch_personalized_suggestions(
                    &preferences,
                    self.history.interactions(),
                    &[],
                ),
            ),
            timeout(PROVIDER_TIMEOUT, provider.fetch_popular_content()),
        );
        let sources = vec![flatten_timeout(personalized), flatten_timeout(popular)];

        match engine::recommend(
            &self.profile,
            &self.history,
            self.quota.chosen(now),
            remaining.min(limit),
            sources,
        ) {
            Ok(slate) => {
                info!("Serving {} recommendations", slate.len());
                slate
            }
            Err(error) => {
                warn!("All sources failed ({}), sampling the fallback catalog", error);
                let rated: HashSet<ItemId> = self
                    .history
                    .rated_item_ids()
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                engine::sample(
                    fallback_catalog.items(),
                    self.quota.chosen(now),
                    &rated,
                    limit,
                    remaining,
                    &mut rand::rng(),
                )
            }
        }
    }

    /// Currently trending content: the popular feed, best-rated first.
    pub async fn trending(
        &self,
        provider: &dyn ContentProvider,
        limit: usize,
    ) -> ProviderResult<Vec<MediaItem>> {
        let fetched = timeout(PROVIDER_TIMEOUT, provider.fetch_popular_content()).await;
        let mut items = flatten_timeout(fetched)?;
        items.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        items.truncate(limit);
        Ok(items)
    }

    /// Write all three state pieces back to the store.
    fn persist(&mut self) -> Result<(), StoreError> {
        write_state(&mut self.store, PREFERENCES_KEY, &self.profile)?;
        write_state(&mut self.store, HISTORY_KEY, &self.history)?;
        write_state(&mut self.store, DAILY_CHOICES_KEY, &self.quota)?;
        Ok(())
    }
}

/// The device-local calendar date scoping the quota.
fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Load one state piece, resetting to default on absence or corruption.
fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore,
{
    match read_state(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(error) => {
            warn!("Resetting '{}' to default: {}", key, error);
            T::default()
        }
    }
}

/// Collapse a timed-out fetch into the provider error taxonomy.
fn flatten_timeout<T>(
    result: Result<ProviderResult<T>, tokio::time::error::Elapsed>,
) -> ProviderResult<T> {
    match result {
        Ok(outcome) => outcome,
        Err(_) => Err(ProviderError::Timeout(PROVIDER_TIMEOUT)),
    }
}
