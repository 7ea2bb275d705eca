use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;
use crate::database::manager::DatabaseError;
use crate::database::models::Admin;

pub mod password;

pub use password::{hash_password, verify_password};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Correct credentials on a deactivated account. Distinct from
    /// InvalidCredentials so the UI can say so.
    #[error("account disabled")]
    AccountDisabled,

    #[error("session expired")]
    SessionExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("crypto error: {0}")]
    Crypto(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Session claims. `client_id` is the platform/tenant discriminator:
/// None is a platform owner, Some a tenant admin. The expiry window is
/// fixed from issuance and never refreshed on activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub client_id: Option<Uuid>,
    pub email: String,
    pub full_name: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn for_admin(admin: &Admin) -> Self {
        let now = Utc::now();
        let timeout = config::config().security.session_timeout_minutes;
        Self {
            sub: admin.id,
            client_id: admin.client_id,
            email: admin.email.clone(),
            full_name: admin.full_name.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(timeout)).timestamp(),
        }
    }

    pub fn is_platform_owner(&self) -> bool {
        self.client_id.is_none()
    }

    pub fn expires_in_secs(&self) -> i64 {
        self.exp - self.iat
    }
}

/// Fixed-window expiry check against the issuance time. Re-run on every
/// authenticated request in addition to the token's own exp validation.
pub fn session_expired(issued_at: i64, now: i64, timeout_minutes: i64) -> bool {
    now - issued_at > timeout_minutes * 60
}

pub fn generate_token(claims: &Claims) -> Result<String, AuthError> {
    let secret = &config::config().security.jwt_secret;
    generate_token_with_secret(claims, secret)
}

pub fn decode_token(token: &str) -> Result<Claims, AuthError> {
    let secret = &config::config().security.jwt_secret;
    decode_token_with_secret(token, secret)
}

pub fn generate_token_with_secret(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Crypto(e.to_string()))
}

pub fn decode_token_with_secret(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
        _ => AuthError::InvalidToken(e.to_string()),
    })?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn claims(client_id: Option<Uuid>) -> Claims {
        let now = Utc::now();
        Claims {
            sub: Uuid::new_v4(),
            client_id,
            email: "a@x.com".into(),
            full_name: None,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(30)).timestamp(),
        }
    }

    #[test]
    fn token_round_trips() {
        let claims = claims(Some(Uuid::new_v4()));
        let token = generate_token_with_secret(&claims, SECRET).unwrap();
        let decoded = decode_token_with_secret(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.client_id, claims.client_id);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = generate_token_with_secret(&claims(None), SECRET).unwrap();
        let err = decode_token_with_secret(&token, "other-secret").unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn expired_token_maps_to_session_expired() {
        // Expired well past the decoder's default 60s leeway
        let now = Utc::now();
        let stale = Claims {
            iat: (now - Duration::minutes(45)).timestamp(),
            exp: (now - Duration::minutes(15)).timestamp(),
            ..claims(None)
        };
        let token = generate_token_with_secret(&stale, SECRET).unwrap();
        let err = decode_token_with_secret(&token, SECRET).unwrap_err();
        assert!(matches!(err, AuthError::SessionExpired));
    }

    #[test]
    fn thirty_one_minutes_is_expired_twenty_nine_is_not() {
        let now = Utc::now().timestamp();
        let thirty_one_ago = now - 31 * 60;
        let twenty_nine_ago = now - 29 * 60;
        assert!(session_expired(thirty_one_ago, now, 30));
        assert!(!session_expired(twenty_nine_ago, now, 30));
    }

    #[test]
    fn empty_secret_is_refused() {
        let err = generate_token_with_secret(&claims(None), "").unwrap_err();
        assert!(matches!(err, AuthError::MissingSecret));
    }

    #[test]
    fn discriminator_survives_the_token() {
        let platform = claims(None);
        let token = generate_token_with_secret(&platform, SECRET).unwrap();
        assert!(decode_token_with_secret(&token, SECRET)
            .unwrap()
            .is_platform_owner());
    }
}
