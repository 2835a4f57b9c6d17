//! Behavioral tests for ProfileService
//!
//! Every operation is exercised through the in-memory mock store so the
//! tests cover the same read-modify-write paths the PostgreSQL adapter
//! sees in production.

use std::collections::BTreeMap;
use std::sync::Arc;

use core_kernel::PlayerId;
use domain_profile::{
    GameCompletedEvent, LeaderboardUpdatedEvent, MockProfileStore, PlayerProfile, PreferenceValue,
    ProfileError, ProfileService, RecordingStatsPublisher,
};

fn service(store: MockProfileStore) -> ProfileService {
    ProfileService::new(Arc::new(store), Arc::new(RecordingStatsPublisher::new()))
}

fn preference_map(entries: &[(&str, PreferenceValue)]) -> BTreeMap<String, PreferenceValue> {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

// ============================================================================
// Profile lifecycle
// ============================================================================

#[tokio::test]
async fn test_create_profile_uses_defaults() {
    let service = service(MockProfileStore::new());
    let player_id = PlayerId::new();

    let profile = service.create_profile(player_id).await.unwrap();

    assert_eq!(profile.player_id, player_id);
    assert_eq!(profile.wallet, 150);
    assert_eq!(profile.games_played, 0);
    assert_eq!(profile.games_won, 0);
    assert_eq!(profile.leaderboard_position, 0);
    assert_eq!(
        profile.preferences.get("default_game"),
        Some(&"regular".into())
    );
    assert_eq!(
        profile.preferences.get("notifications"),
        Some(&PreferenceValue::Bool(true))
    );
}

#[tokio::test]
async fn test_duplicate_create_fails_with_already_exists() {
    let service = service(MockProfileStore::new());
    let player_id = PlayerId::new();

    service.create_profile(player_id).await.unwrap();
    let second = service.create_profile(player_id).await;

    assert!(matches!(second, Err(ProfileError::AlreadyExists)));
    // exactly one Active record survives
    let profile = service.get_profile(player_id).await.unwrap();
    assert_eq!(profile.wallet, 150);
}

#[tokio::test]
async fn test_concurrent_duplicate_creates_yield_one_record() {
    let store = Arc::new(MockProfileStore::new());
    let service = ProfileService::new(store.clone(), Arc::new(RecordingStatsPublisher::new()));
    let player_id = PlayerId::new();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(
            async move { service.create_profile(player_id).await },
        ));
    }

    let mut created = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(ProfileError::AlreadyExists) => rejected += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(rejected, 7);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_get_profile_not_found() {
    let service = service(MockProfileStore::new());
    let result = service.get_profile(PlayerId::new()).await;
    assert!(matches!(result, Err(ProfileError::NotFound)));
}

#[tokio::test]
async fn test_delete_profile_is_permanent() {
    let service = service(MockProfileStore::new());
    let player_id = PlayerId::new();

    service.create_profile(player_id).await.unwrap();
    service.delete_profile(player_id).await.unwrap();

    assert!(matches!(
        service.get_profile(player_id).await,
        Err(ProfileError::NotFound)
    ));
    // deleting again fails: NonExistent is terminal
    assert!(matches!(
        service.delete_profile(player_id).await,
        Err(ProfileError::NotFound)
    ));
}

// ============================================================================
// Preferences
// ============================================================================

#[tokio::test]
async fn test_update_preferences_merges_and_persists() {
    let service = service(MockProfileStore::new());
    let player_id = PlayerId::new();
    service.create_profile(player_id).await.unwrap();

    let merged = service
        .update_preferences(
            player_id,
            preference_map(&[
                ("sounds", PreferenceValue::Bool(false)),
                ("num_of_players", PreferenceValue::Int(4)),
            ]),
        )
        .await
        .unwrap();

    // overridden, added, and untouched keys
    assert_eq!(merged.get("sounds"), Some(&PreferenceValue::Bool(false)));
    assert_eq!(merged.get("num_of_players"), Some(&PreferenceValue::Int(4)));
    assert_eq!(merged.get("music"), Some(&PreferenceValue::Bool(true)));

    let stored = service.get_preferences(player_id).await.unwrap();
    assert_eq!(stored, merged);
}

#[tokio::test]
async fn test_update_preferences_rejects_unknown_key_without_partial_merge() {
    let service = service(MockProfileStore::new());
    let player_id = PlayerId::new();
    service.create_profile(player_id).await.unwrap();
    let before = service.get_preferences(player_id).await.unwrap();

    let result = service
        .update_preferences(
            player_id,
            preference_map(&[
                ("sounds", PreferenceValue::Bool(false)),
                ("theme", "dark".into()),
            ]),
        )
        .await;

    assert!(matches!(result, Err(ProfileError::InvalidPreference(_))));
    let after = service.get_preferences(player_id).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_update_preferences_rejects_empty_update() {
    let service = service(MockProfileStore::new());
    let player_id = PlayerId::new();
    service.create_profile(player_id).await.unwrap();

    let result = service.update_preferences(player_id, BTreeMap::new()).await;
    assert!(matches!(result, Err(ProfileError::InvalidPreference(_))));
}

#[tokio::test]
async fn test_update_preferences_not_found() {
    let service = service(MockProfileStore::new());
    let result = service
        .update_preferences(
            PlayerId::new(),
            preference_map(&[("sounds", PreferenceValue::Bool(false))]),
        )
        .await;
    assert!(matches!(result, Err(ProfileError::NotFound)));
}

#[tokio::test]
async fn test_game_preferences_returns_filtered_subset() {
    let service = service(MockProfileStore::new());
    let player_id = PlayerId::new();
    service.create_profile(player_id).await.unwrap();
    service
        .update_preferences(
            player_id,
            preference_map(&[("language", "en".into()), ("num_of_players", PreferenceValue::Int(2))]),
        )
        .await
        .unwrap();

    let game = service.get_game_preferences(player_id).await.unwrap();

    assert_eq!(game.len(), 3);
    assert_eq!(game.get("default_game"), Some(&"regular".into()));
    assert_eq!(game.get("language"), Some(&"en".into()));
    assert_eq!(game.get("num_of_players"), Some(&PreferenceValue::Int(2)));
    assert!(game.get("notifications").is_none());
}

// ============================================================================
// Wallet
// ============================================================================

#[tokio::test]
async fn test_wallet_scenario_from_default_balance() {
    let service = service(MockProfileStore::new());
    let player_id = PlayerId::new();
    service.create_profile(player_id).await.unwrap();

    let balance = service.adjust_wallet(player_id, 50).await.unwrap();
    assert_eq!(balance, 200);
    assert_eq!(service.get_wallet(player_id).await.unwrap(), 200);

    let overdraft = service.adjust_wallet(player_id, -250).await;
    assert!(matches!(overdraft, Err(ProfileError::InsufficientFunds)));
    assert_eq!(service.get_wallet(player_id).await.unwrap(), 200);
}

#[tokio::test]
async fn test_wallet_can_reach_exactly_zero() {
    let service = service(MockProfileStore::new());
    let player_id = PlayerId::new();
    service.create_profile(player_id).await.unwrap();

    assert_eq!(service.adjust_wallet(player_id, -150).await.unwrap(), 0);
    assert_eq!(service.get_wallet(player_id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_wallet_operations_on_missing_profile() {
    let service = service(MockProfileStore::new());
    let player_id = PlayerId::new();

    assert!(matches!(
        service.adjust_wallet(player_id, 10).await,
        Err(ProfileError::NotFound)
    ));
    assert!(matches!(
        service.get_wallet(player_id).await,
        Err(ProfileError::NotFound)
    ));
}

// ============================================================================
// Event handlers
// ============================================================================

#[tokio::test]
async fn test_game_completed_updates_stats_and_publishes_win_rate() {
    let mut profile = PlayerProfile::new(PlayerId::new());
    profile.games_played = 5;
    profile.games_won = 2;
    let player_id = profile.player_id;

    let store = MockProfileStore::with_profiles(vec![profile]).await;
    let publisher = Arc::new(RecordingStatsPublisher::new());
    let service = ProfileService::new(Arc::new(store), publisher.clone());

    service
        .handle_game_completed(GameCompletedEvent {
            player_id,
            won: true,
        })
        .await
        .unwrap();

    let updated = service.get_profile(player_id).await.unwrap();
    assert_eq!(updated.games_played, 6);
    assert_eq!(updated.games_won, 3);

    let published = publisher.published().await;
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].player_id, player_id);
    assert!((published[0].win_rate - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_game_completed_loss_only_increments_played() {
    let service = service(MockProfileStore::new());
    let player_id = PlayerId::new();
    service.create_profile(player_id).await.unwrap();

    service
        .handle_game_completed(GameCompletedEvent {
            player_id,
            won: false,
        })
        .await
        .unwrap();

    let profile = service.get_profile(player_id).await.unwrap();
    assert_eq!(profile.games_played, 1);
    assert_eq!(profile.games_won, 0);
}

#[tokio::test]
async fn test_game_completed_swallows_egress_failure() {
    let store = Arc::new(MockProfileStore::new());
    let service = ProfileService::new(store, Arc::new(RecordingStatsPublisher::failing()));
    let player_id = PlayerId::new();
    service.create_profile(player_id).await.unwrap();

    // the operation succeeds and the stat update stays persisted
    service
        .handle_game_completed(GameCompletedEvent {
            player_id,
            won: true,
        })
        .await
        .unwrap();

    let profile = service.get_profile(player_id).await.unwrap();
    assert_eq!(profile.games_played, 1);
    assert_eq!(profile.games_won, 1);
}

#[tokio::test]
async fn test_game_completed_missing_profile() {
    let service = service(MockProfileStore::new());
    let result = service
        .handle_game_completed(GameCompletedEvent {
            player_id: PlayerId::new(),
            won: true,
        })
        .await;
    assert!(matches!(result, Err(ProfileError::NotFound)));
}

#[tokio::test]
async fn test_leaderboard_updated_replaces_position() {
    let service = service(MockProfileStore::new());
    let player_id = PlayerId::new();
    service.create_profile(player_id).await.unwrap();

    service
        .handle_leaderboard_updated(LeaderboardUpdatedEvent {
            player_id,
            new_position: 12,
        })
        .await
        .unwrap();

    let profile = service.get_profile(player_id).await.unwrap();
    assert_eq!(profile.leaderboard_position, 12);
}

#[tokio::test]
async fn test_leaderboard_updated_missing_profile() {
    let service = service(MockProfileStore::new());
    let result = service
        .handle_leaderboard_updated(LeaderboardUpdatedEvent {
            player_id: PlayerId::new(),
            new_position: 3,
        })
        .await;
    assert!(matches!(result, Err(ProfileError::NotFound)));
}

// ============================================================================
// Duplicate event delivery (at-least-once, no dedup)
// ============================================================================

#[tokio::test]
async fn test_duplicate_game_completed_double_counts() {
    let service = service(MockProfileStore::new());
    let player_id = PlayerId::new();
    service.create_profile(player_id).await.unwrap();

    let event = GameCompletedEvent {
        player_id,
        won: true,
    };
    service.handle_game_completed(event.clone()).await.unwrap();
    service.handle_game_completed(event).await.unwrap();

    let profile = service.get_profile(player_id).await.unwrap();
    assert_eq!(profile.games_played, 2);
    assert_eq!(profile.games_won, 2);
}
