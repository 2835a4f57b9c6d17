//! Domain events for the player profile
//!
//! Inbound events are delivered by the message transport and flow directly
//! into the domain service, bypassing the authentication gate (they are not
//! user-initiated). Delivery is at-least-once with no ordering guarantee
//! across different players; a duplicate delivery is applied again.

use serde::{Deserialize, Serialize};

use core_kernel::PlayerId;

/// A game this player participated in has finished
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameCompletedEvent {
    /// Identity of the player whose statistics should be updated
    pub player_id: PlayerId,
    /// Whether the player won the game
    pub won: bool,
}

/// The leaderboard service computed a new position for this player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardUpdatedEvent {
    /// Identity of the player whose position changed
    pub player_id: PlayerId,
    /// The new leaderboard position (0 = unranked)
    pub new_position: u32,
}

/// Derived statistics published to the event egress after each completed
/// game, keyed by player identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatsMessage {
    /// Identity of the player the statistic belongs to
    pub player_id: PlayerId,
    /// games_won / games_played at the time of publication
    pub win_rate: f64,
}
