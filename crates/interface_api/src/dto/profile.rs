//! Profile DTOs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use domain_profile::{PlayerProfile, PreferenceValue, Preferences};

/// Full profile snapshot returned to the owning player
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub preferences: BTreeMap<String, PreferenceValue>,
    pub games_played: u32,
    pub games_won: u32,
    pub leaderboard_position: u32,
    pub time_played_secs: u64,
    pub wallet: i64,
}

impl From<PlayerProfile> for ProfileResponse {
    fn from(profile: PlayerProfile) -> Self {
        Self {
            preferences: profile.preferences.into_map(),
            games_played: profile.games_played,
            games_won: profile.games_won,
            leaderboard_position: profile.leaderboard_position,
            time_played_secs: profile.time_played_secs,
            wallet: profile.wallet,
        }
    }
}

/// Preference mapping wrapper
#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub preferences: BTreeMap<String, PreferenceValue>,
}

impl From<Preferences> for PreferencesResponse {
    fn from(preferences: Preferences) -> Self {
        Self {
            preferences: preferences.into_map(),
        }
    }
}

/// Signed wallet adjustment
#[derive(Debug, Deserialize)]
pub struct AdjustWalletRequest {
    pub change_amount: i64,
}

/// Wallet balance, with the applied change echoed back on adjustments
#[derive(Debug, Serialize)]
pub struct WalletResponse {
    pub balance: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_amount: Option<i64>,
}

/// Plain confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
