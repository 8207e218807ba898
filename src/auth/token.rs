//! Token Service Module
//!
//! Issues and verifies signed, time-limited tokens binding a user identity
//! and role. Tokens are JWTs signed with HMAC-SHA256 over a shared secret.
//! The service holds no per-token state: verification is a pure function of
//! the token, the secret and the current time, and fails closed.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ServerError};
use crate::models::{Role, User};

// == Token Claims ==
/// Claim set carried by every issued token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id
    pub sub: i64,
    /// Username at issue time
    pub username: String,
    /// Role at issue time
    pub role: Role,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expires-at, seconds since the epoch
    pub exp: i64,
}

// == Token Service ==
/// Stateless token issuer/verifier.
#[derive(Debug, Clone)]
pub struct TokenService {
    secret: String,
    ttl_secs: u64,
}

impl TokenService {
    // == Constructor ==
    /// Creates a service signing with `secret` and issuing tokens valid for
    /// `ttl_secs` seconds.
    pub fn new(secret: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    // == Issue ==
    /// Issues a signed token for the given user.
    pub fn issue(&self, user: &User) -> Result<String> {
        debug!(user = %user.username, "issuing token");
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            iat: now,
            exp: now + self.ttl_secs as i64,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ServerError::Internal(format!("token encoding failed: {e}")))
    }

    // == Claims ==
    /// Decodes and validates a token, returning its claims.
    ///
    /// Any malformed token, bad signature or elapsed expiry yields
    /// `InvalidToken`, never a partial result.
    pub fn claims(&self, token: &str) -> Result<TokenClaims> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| {
            debug!(error = %e, "token verification failed");
            ServerError::InvalidToken
        })
    }

    // == Verify ==
    /// Returns true when the token decodes, its signature matches the
    /// secret and it has not expired.
    pub fn verify(&self, token: &str) -> bool {
        self.claims(token).is_ok()
    }
}
