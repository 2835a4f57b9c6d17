//! Core Kernel - Foundational types for the player profile service
//!
//! This crate provides the building blocks shared by the domain and
//! infrastructure layers:
//! - Strongly-typed identifiers
//! - Port abstractions and the unified port error taxonomy

pub mod identifiers;
pub mod ports;

pub use identifiers::PlayerId;
pub use ports::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
