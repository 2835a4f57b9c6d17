//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL implementation of the profile
//! store port using SQLx. The domain layer sees only the `ProfileStore`
//! trait; everything database-shaped (connection pooling, row mapping,
//! constraint-code translation) stays behind this crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, PostgresProfileStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/players")).await?;
//! let store = PostgresProfileStore::new(pool);
//! ```

pub mod adapters;
pub mod error;
pub mod pool;

pub use adapters::PostgresProfileStore;
pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
