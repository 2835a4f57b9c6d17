//! Profile domain service
//!
//! `ProfileService` owns every state-transition rule of the profile
//! lifecycle. HTTP handlers resolve the target identity from the
//! authenticated principal and event handlers from the event payload;
//! both call into the same operations here, so the invariants are
//! enforced regardless of the caller.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{error, info};

use core_kernel::PlayerId;

use crate::error::ProfileError;
use crate::events::{GameCompletedEvent, LeaderboardUpdatedEvent, PlayerStatsMessage};
use crate::ports::{ProfileStore, StatsPublisher};
use crate::preferences::{PreferenceValue, Preferences};
use crate::profile::PlayerProfile;

/// Application service for player profiles
///
/// Reads and writes exclusively through the [`ProfileStore`] port and
/// publishes derived statistics through the [`StatsPublisher`] port.
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
    stats: Arc<dyn StatsPublisher>,
}

impl ProfileService {
    /// Creates a new profile service over the given ports
    pub fn new(store: Arc<dyn ProfileStore>, stats: Arc<dyn StatsPublisher>) -> Self {
        Self { store, stats }
    }

    /// Creates a profile for an identity that does not have one yet
    ///
    /// The existence check and insert are a single atomic store operation,
    /// so concurrent duplicate creates for the same identity resolve to
    /// exactly one Active record; every other caller gets `AlreadyExists`.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::AlreadyExists` if a record is already Active.
    pub async fn create_profile(&self, player_id: PlayerId) -> Result<PlayerProfile, ProfileError> {
        info!(%player_id, "Creating profile");

        let profile = PlayerProfile::new(player_id);
        let inserted = match self.store.insert_if_absent(&profile).await {
            Ok(inserted) => inserted,
            // a racing insert surfaces as a unique-key conflict
            Err(err) if err.is_conflict() => false,
            Err(err) => return Err(err.into()),
        };

        if !inserted {
            return Err(ProfileError::AlreadyExists);
        }

        info!(%player_id, "Profile created");
        Ok(profile)
    }

    /// Returns the full profile snapshot for an identity
    pub async fn get_profile(&self, player_id: PlayerId) -> Result<PlayerProfile, ProfileError> {
        self.fetch(player_id).await
    }

    /// Permanently removes the profile for an identity
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if no Active record exists.
    pub async fn delete_profile(&self, player_id: PlayerId) -> Result<(), ProfileError> {
        info!(%player_id, "Deleting profile");

        self.fetch(player_id).await?;
        self.store.delete(player_id).await?;

        info!(%player_id, "Profile deleted");
        Ok(())
    }

    /// Returns the stored preference mapping
    pub async fn get_preferences(&self, player_id: PlayerId) -> Result<Preferences, ProfileError> {
        Ok(self.fetch(player_id).await?.preferences)
    }

    /// Returns the game-setup subset of the stored preferences
    pub async fn get_game_preferences(
        &self,
        player_id: PlayerId,
    ) -> Result<Preferences, ProfileError> {
        Ok(self.fetch(player_id).await?.preferences.game_preferences())
    }

    /// Merges an incoming preference mapping into the stored preferences
    ///
    /// The update is validated as a whole before anything is applied: an
    /// empty mapping or any key outside the whitelist rejects the entire
    /// update and leaves the stored preferences unchanged.
    ///
    /// # Errors
    ///
    /// `InvalidPreference` on an empty or non-whitelisted update,
    /// `NotFound` if the profile does not exist.
    pub async fn update_preferences(
        &self,
        player_id: PlayerId,
        incoming: BTreeMap<String, PreferenceValue>,
    ) -> Result<Preferences, ProfileError> {
        if incoming.is_empty() {
            return Err(ProfileError::InvalidPreference(
                "Preferences cannot be empty".to_string(),
            ));
        }

        info!(%player_id, count = incoming.len(), "Updating preferences");

        let mut profile = self.fetch(player_id).await?;
        profile.merge_preferences(&incoming)?;
        self.store.put(&profile).await?;

        Ok(profile.preferences)
    }

    /// Applies a signed adjustment to the wallet and returns the new balance
    ///
    /// # Errors
    ///
    /// `InsufficientFunds` if the adjustment would drive the balance below
    /// zero (the stored balance is untouched), `NotFound` if the profile
    /// does not exist.
    pub async fn adjust_wallet(
        &self,
        player_id: PlayerId,
        change_amount: i64,
    ) -> Result<i64, ProfileError> {
        info!(%player_id, change_amount, "Adjusting wallet");

        let mut profile = self.fetch(player_id).await?;
        let new_balance = profile.adjust_wallet(change_amount)?;
        self.store.put(&profile).await?;

        Ok(new_balance)
    }

    /// Returns the current wallet balance
    pub async fn get_wallet(&self, player_id: PlayerId) -> Result<i64, ProfileError> {
        Ok(self.fetch(player_id).await?.wallet)
    }

    /// Applies a game-completed event to the player's statistics
    ///
    /// After the statistic update is persisted, the derived win rate is
    /// published to the event egress. Egress failure is logged and
    /// swallowed - the persisted update is never rolled back.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if the profile does not exist.
    pub async fn handle_game_completed(
        &self,
        event: GameCompletedEvent,
    ) -> Result<(), ProfileError> {
        info!(player_id = %event.player_id, won = event.won, "Handling game completed event");

        let mut profile = self.fetch(event.player_id).await?;
        profile.record_game(event.won);
        self.store.put(&profile).await?;

        let message = PlayerStatsMessage {
            player_id: profile.player_id,
            win_rate: profile.win_rate(),
        };
        if let Err(err) = self.stats.publish(&message).await {
            error!(player_id = %event.player_id, error = %err, "Failed to publish player stats");
        }

        Ok(())
    }

    /// Applies a leaderboard-updated event to the player's position
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` if the profile does not exist.
    pub async fn handle_leaderboard_updated(
        &self,
        event: LeaderboardUpdatedEvent,
    ) -> Result<(), ProfileError> {
        info!(
            player_id = %event.player_id,
            new_position = event.new_position,
            "Handling leaderboard updated event"
        );

        let mut profile = self.fetch(event.player_id).await?;
        profile.set_leaderboard_position(event.new_position);
        self.store.put(&profile).await?;

        Ok(())
    }

    /// Reports the health of the underlying store, for readiness probes
    pub async fn store_health(&self) -> core_kernel::HealthCheckResult {
        self.store.health_check().await
    }

    async fn fetch(&self, player_id: PlayerId) -> Result<PlayerProfile, ProfileError> {
        self.store
            .get(player_id)
            .await?
            .ok_or(ProfileError::NotFound)
    }
}
