//! Port adapters backed by PostgreSQL

pub mod profile;

pub use profile::PostgresProfileStore;
