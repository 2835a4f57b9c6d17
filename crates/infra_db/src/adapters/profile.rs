//! PostgreSQL Profile Store Adapter
//!
//! Implements the `ProfileStore` port on a single `player_profiles` table.
//! The table's primary key on `player_id` is what makes
//! `insert_if_absent` atomic under concurrent duplicate creates: the
//! insert uses `ON CONFLICT DO NOTHING`, so exactly one writer sees a row
//! inserted and every other one observes zero affected rows.
//!
//! Preferences persist as JSONB; a record whose stored mapping cannot be
//! deserialized back surfaces as a transformation error, never as
//! "not found".

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PlayerId, PortError,
};
use domain_profile::{PlayerProfile, Preferences, ProfileStore};

use crate::error::DatabaseError;

/// PostgreSQL-backed implementation of the ProfileStore port
#[derive(Debug, Clone)]
pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    /// Creates a new profile store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape of the `player_profiles` table
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    player_id: Uuid,
    preferences: serde_json::Value,
    games_played: i32,
    games_won: i32,
    leaderboard_position: i32,
    time_played: i64,
    wallet: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_domain(self) -> Result<PlayerProfile, DatabaseError> {
        let preferences: Preferences = serde_json::from_value(self.preferences)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        Ok(PlayerProfile {
            player_id: PlayerId::from_uuid(self.player_id),
            preferences,
            games_played: to_counter(self.games_played)?,
            games_won: to_counter(self.games_won)?,
            leaderboard_position: to_counter(self.leaderboard_position)?,
            time_played_secs: u64::try_from(self.time_played)
                .map_err(|e| DatabaseError::SerializationError(e.to_string()))?,
            wallet: self.wallet,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn to_counter(value: i32) -> Result<u32, DatabaseError> {
    u32::try_from(value).map_err(|e| DatabaseError::SerializationError(e.to_string()))
}

fn from_counter(value: u32) -> Result<i32, DatabaseError> {
    i32::try_from(value).map_err(|e| DatabaseError::SerializationError(e.to_string()))
}

/// Bind values shared by the insert and upsert statements
struct ProfileBinds {
    preferences: serde_json::Value,
    games_played: i32,
    games_won: i32,
    leaderboard_position: i32,
    time_played: i64,
}

fn binds_for(profile: &PlayerProfile) -> Result<ProfileBinds, DatabaseError> {
    Ok(ProfileBinds {
        preferences: serde_json::to_value(&profile.preferences)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?,
        games_played: from_counter(profile.games_played)?,
        games_won: from_counter(profile.games_won)?,
        leaderboard_position: from_counter(profile.leaderboard_position)?,
        time_played: i64::try_from(profile.time_played_secs)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?,
    })
}

impl DomainPort for PostgresProfileStore {}

#[async_trait]
impl HealthCheckable for PostgresProfileStore {
    async fn health_check(&self) -> HealthCheckResult {
        let status = match sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
        {
            Ok(_) => AdapterHealth::Healthy,
            Err(_) => AdapterHealth::Unhealthy,
        };

        HealthCheckResult {
            adapter_id: "postgres-profile-store".to_string(),
            status,
            message: None,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn get(&self, player_id: PlayerId) -> Result<Option<PlayerProfile>, PortError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT player_id, preferences, games_played, games_won,
                   leaderboard_position, time_played, wallet,
                   created_at, updated_at
            FROM player_profiles
            WHERE player_id = $1
            "#,
        )
        .bind(player_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        row.map(|r| r.into_domain().map_err(PortError::from))
            .transpose()
    }

    async fn put(&self, profile: &PlayerProfile) -> Result<(), PortError> {
        let binds = binds_for(profile)?;

        sqlx::query(
            r#"
            INSERT INTO player_profiles
                (player_id, preferences, games_played, games_won,
                 leaderboard_position, time_played, wallet, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (player_id) DO UPDATE SET
                preferences = EXCLUDED.preferences,
                games_played = EXCLUDED.games_played,
                games_won = EXCLUDED.games_won,
                leaderboard_position = EXCLUDED.leaderboard_position,
                time_played = EXCLUDED.time_played,
                wallet = EXCLUDED.wallet,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(profile.player_id.as_uuid())
        .bind(&binds.preferences)
        .bind(binds.games_played)
        .bind(binds.games_won)
        .bind(binds.leaderboard_position)
        .bind(binds.time_played)
        .bind(profile.wallet)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        debug!(player_id = %profile.player_id, "Profile persisted");
        Ok(())
    }

    async fn delete(&self, player_id: PlayerId) -> Result<(), PortError> {
        sqlx::query("DELETE FROM player_profiles WHERE player_id = $1")
            .bind(player_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from)?;

        debug!(%player_id, "Profile deleted");
        Ok(())
    }

    async fn insert_if_absent(&self, profile: &PlayerProfile) -> Result<bool, PortError> {
        let binds = binds_for(profile)?;

        let result = sqlx::query(
            r#"
            INSERT INTO player_profiles
                (player_id, preferences, games_played, games_won,
                 leaderboard_position, time_played, wallet, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (player_id) DO NOTHING
            "#,
        )
        .bind(profile.player_id.as_uuid())
        .bind(&binds.preferences)
        .bind(binds.games_played)
        .bind(binds.games_won)
        .bind(binds.leaderboard_position)
        .bind(binds.time_played)
        .bind(profile.wallet)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        Ok(result.rows_affected() == 1)
    }
}
