//! Profile Domain Ports
//!
//! This module defines the port interfaces the profile domain needs from
//! its collaborators, enabling swappable implementations:
//!
//! - [`ProfileStore`]: durable keyed storage for profile records. The
//!   internal adapter lives in `infra_db` (PostgreSQL); an in-memory mock
//!   is provided for tests.
//! - [`StatsPublisher`]: the event egress that carries derived statistics
//!   out of the service. Best-effort from the domain's perspective.
//!
//! All coordination is delegated to the store's per-key atomicity. In
//! particular [`ProfileStore::insert_if_absent`] must be atomic with
//! respect to concurrent inserts for the same identity - this is what
//! closes the create-profile check-then-act race.

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PlayerId, PortError};

use crate::events::PlayerStatsMessage;
use crate::profile::PlayerProfile;

/// Durable keyed storage for player profiles
///
/// The store never mutates a record independently; the domain service is
/// the sole writer. Absence is a normal outcome (`Ok(None)`), never an
/// error - infrastructure failures must come back as `Err` so the service
/// can distinguish "not found" from "store unreachable".
#[async_trait]
pub trait ProfileStore: DomainPort + HealthCheckable {
    /// Retrieves the profile for an identity, if one exists
    async fn get(&self, player_id: PlayerId) -> Result<Option<PlayerProfile>, PortError>;

    /// Persists a profile, replacing any existing record for the identity
    async fn put(&self, profile: &PlayerProfile) -> Result<(), PortError>;

    /// Removes the record for an identity permanently
    async fn delete(&self, player_id: PlayerId) -> Result<(), PortError>;

    /// Inserts the profile only if no record exists for its identity
    ///
    /// Returns `Ok(false)` when a record was already present. Must be
    /// atomic under concurrent duplicate inserts: exactly one caller
    /// observes `true`.
    async fn insert_if_absent(&self, profile: &PlayerProfile) -> Result<bool, PortError>;
}

/// Event egress for derived player statistics
///
/// Publishing is fire-and-forget from the domain service's perspective:
/// a delivery failure is logged and swallowed, never rolled back into the
/// already-persisted statistic update.
#[async_trait]
pub trait StatsPublisher: DomainPort {
    /// Publishes a derived-stats message keyed by player identity
    async fn publish(&self, message: &PlayerStatsMessage) -> Result<(), PortError>;
}

/// Egress adapter that emits the stats message to the structured log
///
/// Used when no message-bus transport is wired in; the bus itself is an
/// external collaborator of this core.
#[derive(Debug, Clone, Default)]
pub struct LoggingStatsPublisher;

impl LoggingStatsPublisher {
    pub fn new() -> Self {
        Self
    }
}

impl DomainPort for LoggingStatsPublisher {}

#[async_trait]
impl StatsPublisher for LoggingStatsPublisher {
    async fn publish(&self, message: &PlayerStatsMessage) -> Result<(), PortError> {
        tracing::info!(
            player_id = %message.player_id,
            win_rate = message.win_rate,
            "Publishing player stats"
        );
        Ok(())
    }
}

#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of ProfileStore
    #[derive(Debug, Default)]
    pub struct MockProfileStore {
        profiles: Arc<RwLock<HashMap<PlayerId, PlayerProfile>>>,
    }

    impl MockProfileStore {
        /// Creates an empty mock store
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates the store with profiles for testing
        pub async fn with_profiles(profiles: Vec<PlayerProfile>) -> Self {
            let store = Self::new();
            {
                let mut guard = store.profiles.write().await;
                for profile in profiles {
                    guard.insert(profile.player_id, profile);
                }
            }
            store
        }

        /// Number of records currently stored
        pub async fn len(&self) -> usize {
            self.profiles.read().await.len()
        }
    }

    impl DomainPort for MockProfileStore {}

    #[async_trait]
    impl HealthCheckable for MockProfileStore {
        async fn health_check(&self) -> core_kernel::HealthCheckResult {
            core_kernel::HealthCheckResult {
                adapter_id: "mock-profile-store".to_string(),
                status: core_kernel::AdapterHealth::Healthy,
                message: None,
                checked_at: chrono::Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ProfileStore for MockProfileStore {
        async fn get(&self, player_id: PlayerId) -> Result<Option<PlayerProfile>, PortError> {
            Ok(self.profiles.read().await.get(&player_id).cloned())
        }

        async fn put(&self, profile: &PlayerProfile) -> Result<(), PortError> {
            self.profiles
                .write()
                .await
                .insert(profile.player_id, profile.clone());
            Ok(())
        }

        async fn delete(&self, player_id: PlayerId) -> Result<(), PortError> {
            self.profiles.write().await.remove(&player_id);
            Ok(())
        }

        async fn insert_if_absent(&self, profile: &PlayerProfile) -> Result<bool, PortError> {
            // single write lock covers the existence check and the insert
            let mut guard = self.profiles.write().await;
            if guard.contains_key(&profile.player_id) {
                return Ok(false);
            }
            guard.insert(profile.player_id, profile.clone());
            Ok(true)
        }
    }

    /// Egress mock that records every published message
    #[derive(Debug, Default)]
    pub struct RecordingStatsPublisher {
        messages: Arc<RwLock<Vec<PlayerStatsMessage>>>,
        fail: bool,
    }

    impl RecordingStatsPublisher {
        /// Creates a publisher that accepts every message
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a publisher whose deliveries always fail
        pub fn failing() -> Self {
            Self {
                messages: Arc::default(),
                fail: true,
            }
        }

        /// Messages successfully published so far
        pub async fn published(&self) -> Vec<PlayerStatsMessage> {
            self.messages.read().await.clone()
        }
    }

    impl DomainPort for RecordingStatsPublisher {}

    #[async_trait]
    impl StatsPublisher for RecordingStatsPublisher {
        async fn publish(&self, message: &PlayerStatsMessage) -> Result<(), PortError> {
            if self.fail {
                return Err(PortError::connection("stats egress unavailable"));
            }
            self.messages.write().await.push(message.clone());
            Ok(())
        }
    }
}
