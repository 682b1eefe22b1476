//! Bearer access tokens and rotating refresh tokens.
//!
//! Access tokens are short-lived HS256 JWTs that carry the user id and role,
//! so requests authenticate without a database round trip. Refresh tokens
//! are opaque random strings. Only their SHA-256 digest is stored in
//! `user_sessions`, and each one is exchanged at most once.

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use qna_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Seconds of clock skew tolerated when checking `exp`.
const EXPIRY_LEEWAY_SECS: u64 = 5;

/// Payload of an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: DbId,
    pub role: String,
    pub exp: i64,
}

/// Signs and verifies access tokens with keys derived once from the
/// configured secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = EXPIRY_LEEWAY_SECS;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            config.jwt_secret.as_bytes(),
            Duration::minutes(config.access_token_ttl_mins),
            Duration::days(config.refresh_token_ttl_days),
        )
    }

    /// Sign an access token for `user_id` that expires one access TTL after
    /// `now`.
    pub fn issue_access(&self, user_id: DbId, role: &str, now: Timestamp) -> AppResult<String> {
        let claims = AccessClaims {
            sub: user_id,
            role: role.to_string(),
            exp: (now + self.access_ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::InternalError(format!("Token signing failed: {e}")))
    }

    /// Check signature and expiry. Any failure means the bearer is
    /// unauthenticated, so the cause is only logged.
    pub fn verify(&self, token: &str) -> Option<AccessClaims> {
        match jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected access token");
                None
            }
        }
    }

    /// Value of `expires_in` in auth responses.
    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl.num_seconds()
    }

    /// When a refresh token issued at `now` stops being accepted.
    pub fn refresh_expires_at(&self, now: Timestamp) -> Timestamp {
        now + self.refresh_ttl
    }
}

/// A freshly minted refresh token. `plaintext` goes to the client once and
/// `digest` is what gets persisted.
#[derive(Debug)]
pub struct RefreshToken {
    pub plaintext: String,
    pub digest: String,
}

impl RefreshToken {
    pub fn generate() -> Self {
        let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let digest = Self::digest(&plaintext);
        Self { plaintext, digest }
    }

    /// Hex SHA-256 of a presented token, as stored in `user_sessions`.
    pub fn digest(raw: &str) -> String {
        format!("{:x}", Sha256::digest(raw.as_bytes()))
    }
}
