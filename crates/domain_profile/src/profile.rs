//! Player profile entity
//!
//! The profile is the single durable aggregate of this service, keyed by
//! the player identity. State transitions live here as methods so the
//! invariants (wallet never negative, whitelisted preferences only) hold
//! no matter which caller triggers them.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::PlayerId;

use crate::error::ProfileError;
use crate::preferences::{PreferenceValue, Preferences};

/// A player's durable profile record
///
/// Lifecycle: NonExistent -> Active -> (deleted -> NonExistent). There is
/// no soft delete and no other state. The domain service is the sole
/// writer; the store never mutates a record independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    /// Unique, immutable player identity (also the token subject)
    pub player_id: PlayerId,
    /// Whitelisted preference mapping
    pub preferences: Preferences,
    /// Total games played
    pub games_played: u32,
    /// Total games won
    pub games_won: u32,
    /// Current leaderboard position (0 = unranked)
    pub leaderboard_position: u32,
    /// Accumulated play time in seconds
    pub time_played_secs: u64,
    /// Virtual-currency balance, never persisted negative
    pub wallet: i64,
    /// When this profile was created
    pub created_at: DateTime<Utc>,
    /// When this profile was last updated
    pub updated_at: DateTime<Utc>,
}

impl PlayerProfile {
    /// Balance granted to a newly created profile
    pub const STARTING_WALLET: i64 = 150;

    /// Creates a new Active profile with the default preference set and
    /// starting wallet balance
    pub fn new(player_id: PlayerId) -> Self {
        let now = Utc::now();
        Self {
            player_id,
            preferences: Preferences::defaults(),
            games_played: 0,
            games_won: 0,
            leaderboard_position: 0,
            time_played_secs: 0,
            wallet: Self::STARTING_WALLET,
            created_at: now,
            updated_at: now,
        }
    }

    /// Records a completed game, incrementing the played counter and, on a
    /// win, the won counter
    pub fn record_game(&mut self, won: bool) {
        self.games_played += 1;
        if won {
            self.games_won += 1;
        }
        self.touch();
    }

    /// Win rate derived from the current counters, as a fraction in [0, 1]
    ///
    /// A profile that has never played reports 0.0 rather than dividing
    /// by zero.
    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            f64::from(self.games_won) / f64::from(self.games_played)
        }
    }

    /// Replaces the leaderboard position with an externally computed one
    pub fn set_leaderboard_position(&mut self, position: u32) {
        self.leaderboard_position = position;
        self.touch();
    }

    /// Applies a signed wallet adjustment atomically
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InsufficientFunds` if the adjustment would
    /// drive the balance below zero; the balance is left unchanged.
    pub fn adjust_wallet(&mut self, change_amount: i64) -> Result<i64, ProfileError> {
        let new_balance = self.wallet + change_amount;
        if new_balance < 0 {
            return Err(ProfileError::InsufficientFunds);
        }
        self.wallet = new_balance;
        self.touch();
        Ok(new_balance)
    }

    /// Merges an incoming preference mapping into the stored preferences
    ///
    /// Delegates validation and union-with-override semantics to
    /// [`Preferences::merged_with`]; a rejected update leaves the stored
    /// mapping untouched.
    pub fn merge_preferences(
        &mut self,
        incoming: &BTreeMap<String, PreferenceValue>,
    ) -> Result<&Preferences, ProfileError> {
        self.preferences = self.preferences.merged_with(incoming)?;
        self.touch();
        Ok(&self.preferences)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
