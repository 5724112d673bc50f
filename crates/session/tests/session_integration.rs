//! Integration tests for the session layer.
//!
//! These exercise the full loop a device session runs: load state, swipe,
//! persist, reload, and serve discover slates - including the fallback
//! path when every provider is down.

use catalog::{Catalog, MediaItem, MediaKind, UserAction, UserInteraction};
use providers::{ContentProvider, ProviderError, ProviderResult};
use session::{
    DAILY_CHOICE_LIMIT, MemoryStore, PREFERENCES_KEY, SwipeSession,
    KeyValueStore,
};
use std::collections::HashSet;

// ============================================================================
// Test Fixtures
// ============================================================================

fn item(id: &str, rating: f32, genres: &[&str]) -> MediaItem {
    MediaItem {
        id: id.to_string(),
        kind: MediaKind::Movie,
        title: format!("Item {}", id),
        rating,
        year: 2010,
        genres: genres.iter().map(|g| g.to_string()).collect(),
        cast: None,
        director: None,
        description: None,
        user_rating: None,
    }
}

fn fallback_catalog(n: usize) -> Catalog {
    let items: Vec<MediaItem> = (0..n)
        .map(|i| item(&format!("c{}", i), 7.0, &["Drama"]))
        .collect();
    Catalog::from_items(items).unwrap()
}

/// Provider serving fixed lists.
struct StubProvider {
    popular: Vec<MediaItem>,
    personalized: Vec<MediaItem>,
}

#[async_trait::async_trait]
impl ContentProvider for StubProvider {
    fn name(&self) -> &str {
        "StubProvider"
    }

    async fn fetch_popular_content(&self) -> ProviderResult<Vec<MediaItem>> {
        Ok(self.popular.clone())
    }

    async fn fetch_personalized_suggestions(
        &self,
        _genre_preferences: &[String],
        _history: &[UserInteraction],
        _candidate_pool: &[MediaItem],
    ) -> ProviderResult<Vec<MediaItem>> {
        Ok(self.personalized.clone())
    }
}

/// Provider where every fetch fails.
struct DownProvider;

#[async_trait::async_trait]
impl ContentProvider for DownProvider {
    fn name(&self) -> &str {
        "DownProvider"
    }

    async fn fetch_popular_content(&self) -> ProviderResult<Vec<MediaItem>> {
        Err(ProviderError::Unavailable("connection refused".to_string()))
    }

    async fn fetch_personalized_suggestions(
        &self,
        _genre_preferences: &[String],
        _history: &[UserInteraction],
        _candidate_pool: &[MediaItem],
    ) -> ProviderResult<Vec<MediaItem>> {
        Err(ProviderError::Unavailable("connection refused".to_string()))
    }
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_state_survives_a_reload() {
    let mut session = SwipeSession::load(MemoryStore::new());
    let pool = vec![item("1", 8.0, &["Crime", "Drama"])];
    session.swipe("1", UserAction::Superlike, &pool).unwrap();
    session.swipe("2", UserAction::Skip, &pool).unwrap();

    // Reload from the same backing store
    let store = session.into_store();
    let mut reloaded = SwipeSession::load(store);

    assert_eq!(reloaded.profile().weight("Crime"), 2);
    assert_eq!(reloaded.profile().weight("Drama"), 2);
    assert_eq!(reloaded.history().len(), 2);
    assert_eq!(reloaded.history().latest().unwrap().item_id, "2");
    assert_eq!(reloaded.remaining_choices(), DAILY_CHOICE_LIMIT - 2);
}

#[test]
fn test_corrupt_profile_resets_but_history_survives() {
    // Seed valid state through a session, then corrupt one key
    let mut session = SwipeSession::load(MemoryStore::new());
    let pool = vec![item("1", 8.0, &["Crime"])];
    session.swipe("1", UserAction::Like, &pool).unwrap();

    let mut store = session.into_store();
    store.write(PREFERENCES_KEY, "{ definitely not json").unwrap();

    let reloaded = SwipeSession::load(store);
    assert!(reloaded.profile().is_empty(), "corrupt profile resets");
    assert_eq!(reloaded.history().len(), 1, "valid history is kept");
}

// ============================================================================
// Quota flow
// ============================================================================

#[test]
fn test_twenty_choices_exhaust_the_day() {
    let mut session = SwipeSession::load(MemoryStore::new());
    let pool: Vec<MediaItem> = (0..30)
        .map(|i| item(&i.to_string(), 7.0, &["Drama"]))
        .collect();

    for i in 0..DAILY_CHOICE_LIMIT {
        let counted = session
            .swipe(&i.to_string(), UserAction::Like, &pool)
            .unwrap();
        assert!(counted);
    }

    assert!(session.is_daily_limit_reached());
    assert_eq!(session.remaining_choices(), 0);

    // The 21st swipe still lands in history but is not counted
    let counted = session.swipe("20", UserAction::Like, &pool).unwrap();
    assert!(!counted);
    assert_eq!(session.history().len(), DAILY_CHOICE_LIMIT + 1);
}

#[test]
fn test_skip_consumes_quota() {
    let mut session = SwipeSession::load(MemoryStore::new());
    let pool = vec![item("1", 7.0, &["Drama"])];

    session.swipe("1", UserAction::Skip, &pool).unwrap();

    assert_eq!(session.remaining_choices(), DAILY_CHOICE_LIMIT - 1);
    assert!(session.profile().is_empty(), "skip never shifts the profile");
}

// ============================================================================
// Discover
// ============================================================================

#[tokio::test]
async fn test_discover_merges_personalized_ahead_of_popular() {
    let mut session = SwipeSession::load(MemoryStore::new());
    let provider = StubProvider {
        // Same score for both feeds' items; the personalized copy of "B"
        // is the one that survives deduplication
        popular: vec![item("B", 8.0, &["Drama"]), item("C", 7.0, &["Drama"])],
        personalized: vec![item("A", 8.0, &["Drama"]), item("B", 8.0, &["Drama"])],
    };
    let catalog = fallback_catalog(5);

    let slate = session.discover(&provider, &catalog, 20).await;

    let ids: Vec<&str> = slate.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["A", "B", "C"]);
}

#[tokio::test]
async fn test_discover_excludes_judged_items() {
    let mut session = SwipeSession::load(MemoryStore::new());
    let pool = vec![item("A", 8.0, &["Drama"]), item("B", 7.0, &["Drama"])];
    session.swipe("A", UserAction::Dislike, &pool).unwrap();

    let provider = StubProvider {
        popular: pool.clone(),
        personalized: vec![],
    };
    let catalog = fallback_catalog(5);

    let slate = session.discover(&provider, &catalog, 20).await;

    let ids: Vec<&str> = slate.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["B"]);
}

#[tokio::test]
async fn test_discover_exhausted_quota_is_an_empty_slate() {
    let mut session = SwipeSession::load(MemoryStore::new());
    let pool: Vec<MediaItem> = (0..DAILY_CHOICE_LIMIT)
        .map(|i| item(&i.to_string(), 7.0, &["Drama"]))
        .collect();
    for i in 0..DAILY_CHOICE_LIMIT {
        session.swipe(&i.to_string(), UserAction::Like, &pool).unwrap();
    }

    let provider = StubProvider {
        popular: vec![item("fresh", 9.0, &["Drama"])],
        personalized: vec![],
    };
    let catalog = fallback_catalog(5);

    let slate = session.discover(&provider, &catalog, 20).await;
    assert!(slate.is_empty());
}

#[tokio::test]
async fn test_discover_falls_back_to_catalog_sampling() {
    let mut session = SwipeSession::load(MemoryStore::new());
    let catalog = fallback_catalog(30);

    let slate = session.discover(&DownProvider, &catalog, 50).await;

    assert_eq!(slate.len(), DAILY_CHOICE_LIMIT, "draw capped by quota");
    let ids: HashSet<&str> = slate.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids.len(), DAILY_CHOICE_LIMIT, "sample has no duplicates");
    for id in ids {
        assert!(catalog.get(id).is_some(), "samples come from the catalog");
    }
}

#[tokio::test]
async fn test_fallback_respects_prior_judgments() {
    let mut session = SwipeSession::load(MemoryStore::new());
    let catalog = fallback_catalog(10);
    let pool = catalog.items().to_vec();

    session.swipe("c0", UserAction::Dislike, &pool).unwrap();
    session.swipe("c1", UserAction::Skip, &pool).unwrap();

    let slate = session.discover(&DownProvider, &catalog, 50).await;

    let ids: HashSet<&str> = slate.iter().map(|i| i.id.as_str()).collect();
    assert!(!ids.contains("c0"), "rated item is out");
    assert!(!ids.contains("c1"), "chosen-today item is out");
    assert_eq!(slate.len(), 8);
}

// ============================================================================
// Projections & onboarding
// ============================================================================

#[test]
fn test_stats_projection() {
    let mut session = SwipeSession::load(MemoryStore::new());
    let pool = vec![
        item("1", 7.0, &["Drama"]),
        item("2", 7.0, &["Drama"]),
        item("3", 7.0, &["Drama"]),
    ];
    session.swipe("1", UserAction::Like, &pool).unwrap();
    session.swipe("2", UserAction::Superlike, &pool).unwrap();
    session.swipe("3", UserAction::Skip, &pool).unwrap();

    let stats = session.stats();
    assert_eq!(stats.likes, 2);
    assert_eq!(stats.skips, 1);
    assert_eq!(stats.total_interactions, 3);
    assert_eq!(stats.like_ratio, 1.0);
}

#[test]
fn test_seed_preferences_from_onboarding_picks() {
    let mut session = SwipeSession::load(MemoryStore::new());
    let picks = vec![
        item("1", 8.0, &["Crime", "Drama"]),
        item("2", 8.0, &["Drama", "Jazz"]),
    ];

    session.seed_preferences(&picks).unwrap();

    let profile = session.profile();
    assert_eq!(profile.len(), 3);
    assert_eq!(profile.weight("Crime"), 1);
    assert_eq!(profile.weight("Drama"), 1, "duplicates collapse to one entry");
    assert_eq!(profile.weight("Jazz"), 1);
}

#[tokio::test]
async fn test_trending_is_rating_descending() {
    let session = SwipeSession::load(MemoryStore::new());
    let provider = StubProvider {
        popular: vec![
            item("low", 5.0, &["Drama"]),
            item("high", 9.5, &["Drama"]),
            item("mid", 7.0, &["Drama"]),
        ],
        personalized: vec![],
    };

    let trending = session.trending(&provider, 2).await.unwrap();
    let ids: Vec<&str> = trending.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["high", "mid"]);
}
