//! Profile domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur in the profile domain
///
/// Each variant maps to a distinct, stable caller-visible category at the
/// API boundary. Infrastructure failures are carried in [`Store`] and must
/// surface as internal faults - they are never folded into [`NotFound`].
///
/// [`Store`]: ProfileError::Store
/// [`NotFound`]: ProfileError::NotFound
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The operation targets a profile that does not exist
    #[error("Profile not found")]
    NotFound,

    /// Attempted to create a profile that already exists
    #[error("Profile already exists")]
    AlreadyExists,

    /// A preference update was empty or contained a key outside the whitelist
    #[error("Invalid preference: {0}")]
    InvalidPreference(String),

    /// A wallet adjustment would drive the balance below zero
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// The preference mapping could not round-trip its storage representation
    #[error("Preference conversion failed: {0}")]
    Conversion(String),

    /// The underlying store failed
    #[error("Storage failure: {0}")]
    Store(PortError),
}

impl ProfileError {
    /// Creates an InvalidPreference error for a rejected key
    pub fn invalid_key(key: impl std::fmt::Display) -> Self {
        ProfileError::InvalidPreference(format!("Invalid preference: {}", key))
    }
}

impl From<PortError> for ProfileError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::Transformation { message } => ProfileError::Conversion(message),
            other => ProfileError::Store(other),
        }
    }
}
