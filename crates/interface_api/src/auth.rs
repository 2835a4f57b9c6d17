//! Token codec and authenticated principal
//!
//! Tokens are compact JWS strings signed with a pre-shared symmetric key
//! (HS256). The key, the expected issuer, and the token lifetime are
//! loaded once at startup and held by [`TokenCodec`] - there is no
//! ambient global signing state.
//!
//! Verification order: structure and signature first, then expiry with a
//! small clock-skew allowance, then an exact (case-sensitive) comparison
//! of the issuer claim against the configured issuer.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use core_kernel::PlayerId;

/// Allowed clock skew when checking token expiry, in seconds
pub const ALLOWED_CLOCK_SKEW_SECS: u64 = 1;

/// Roles a token may carry; the first authority in the token is the
/// principal's primary role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player,
    Admin,
}

impl Role {
    /// The role name as it appears in the token's authorities claim
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Player => "PLAYER",
            Role::Admin => "ADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLAYER" => Ok(Role::Player),
            "ADMIN" => Ok(Role::Admin),
            other => Err(AuthError::Malformed(format!("unknown role: {other}"))),
        }
    }
}

/// The authenticated identity for the duration of one call
///
/// A principal exists only if its token passed signature, issuer, and
/// expiry checks. It is installed into the request's extensions by the
/// authentication gate and dropped with the request - nothing persists
/// between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    /// The token subject, i.e. the player identity
    pub player_id: PlayerId,
    /// The primary role (first authority in the token)
    pub role: Role,
}

/// Auth errors
///
/// All variants are consumed inside the authentication gate and converted
/// to "no principal"; they never surface to callers as distinct errors.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Malformed token: {0}")]
    Malformed(String),
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Token expired")]
    Expired,
    #[error("Token issuer mismatch")]
    IssuerMismatch,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (player identity)
    pub sub: String,
    /// Display name of the player
    pub username: String,
    /// Role names, first element is the primary role
    pub authorities: Vec<String>,
    /// Issuer
    pub iss: String,
    /// Issued-at timestamp (seconds since epoch)
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    /// Builds the request-scoped principal from verified claims
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Malformed` if the subject is not a valid
    /// player identity or the authorities list is empty or unknown.
    pub fn principal(&self) -> Result<Principal, AuthError> {
        let player_id = self
            .sub
            .parse::<PlayerId>()
            .map_err(|e| AuthError::Malformed(format!("invalid subject: {e}")))?;

        let role = self
            .authorities
            .first()
            .ok_or_else(|| AuthError::Malformed("no authorities in token".to_string()))?
            .parse::<Role>()?;

        Ok(Principal { player_id, role })
    }
}

/// Encodes, decodes, and verifies signed tokens
///
/// Pure and stateless: verification performs no I/O and never blocks.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl_secs: u64,
}

impl TokenCodec {
    /// Creates a codec over a pre-shared symmetric key
    ///
    /// # Arguments
    ///
    /// * `secret` - HMAC signing key material
    /// * `issuer` - The exact issuer string tokens must carry
    /// * `ttl_secs` - Lifetime of issued tokens in seconds
    pub fn new(secret: &str, issuer: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            ttl_secs,
        }
    }

    /// Issues a signed token for an identity
    ///
    /// Used by the token-issuing collaborator and tests; request-serving
    /// paths only ever verify.
    pub fn issue(
        &self,
        player_id: PlayerId,
        username: &str,
        roles: &[Role],
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: player_id.to_string(),
            username: username.to_string(),
            authorities: roles.iter().map(|r| r.as_str().to_string()).collect(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs as i64)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Malformed(e.to_string()))
    }

    /// Verifies a token string and returns its claims
    ///
    /// # Errors
    ///
    /// * `Malformed` - the structure cannot be parsed
    /// * `InvalidSignature` - the signature does not match
    /// * `Expired` - expired beyond the allowed clock skew
    /// * `IssuerMismatch` - issuer differs from the configured one
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = ALLOWED_CLOCK_SKEW_SECS;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Malformed(e.to_string()),
            }
        })?;

        // issuer comparison is exact, including case
        if data.claims.iss != self.issuer {
            return Err(AuthError::IssuerMismatch);
        }

        Ok(data.claims)
    }
}
