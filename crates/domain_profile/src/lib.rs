//! Player Profile Domain
//!
//! This crate is the business-rule core of the player profile service.
//! It owns every state-transition rule for a profile:
//!
//! - **Lifecycle**: a profile is created exactly once per player identity,
//!   lives as a single Active record, and is removed permanently on delete.
//! - **Preferences**: a whitelisted key/value mapping with atomic
//!   union-with-override merge semantics. Unknown keys reject the whole
//!   update; nothing is silently dropped.
//! - **Wallet**: an integer virtual-currency balance that is never allowed
//!   below zero. Adjustments apply in full or not at all.
//! - **Game statistics**: updated by inbound domain events (game completed,
//!   leaderboard updated); a derived win-rate statistic is published to the
//!   event egress after each completed game.
//!
//! The domain reads and writes through the [`ProfileStore`] port and emits
//! derived statistics through the [`StatsPublisher`] port, so the same
//! invariants hold no matter which caller (HTTP request or event consumer)
//! triggers an operation.

pub mod error;
pub mod events;
pub mod ports;
pub mod preferences;
pub mod profile;
pub mod service;

pub use error::ProfileError;
pub use events::{GameCompletedEvent, LeaderboardUpdatedEvent, PlayerStatsMessage};
pub use ports::{LoggingStatsPublisher, ProfileStore, StatsPublisher};
pub use preferences::{PreferenceValue, Preferences, GAME_PREFERENCE_KEYS, VALID_PREFERENCE_KEYS};
pub use profile::PlayerProfile;
pub use service::ProfileService;

#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{MockProfileStore, RecordingStatsPublisher};
