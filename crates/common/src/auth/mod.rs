//! Authentication utilities
//!
//! Token issuance is delegated to the hosted auth provider; this module only
//! validates bearer tokens and exposes the current-user context to handlers.
//!
//! Provides:
//! - JWT validation (`JwtManager`)
//! - `AuthContext` axum extractor (populated by the gateway auth middleware)

use crate::errors::{AppError, Result};
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Extracted authentication context available to handlers
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Current user ID (row owner for every entity)
    pub user_id: Uuid,

    /// User email, when present in the token
    pub email: Option<String>,

    /// Request ID for tracing
    pub request_id: String,
}

/// JWT claims structure (subset of what the hosted provider issues)
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,

    /// User email
    #[serde(default)]
    pub email: Option<String>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// JWT token validator
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    /// Create a new JWT manager with the given secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Generate a token. Used by tests and local tooling; production tokens
    /// come from the hosted auth provider signed with the same secret.
    pub fn generate_token(&self, user_id: Uuid, email: Option<String>) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::hours(1);

        let claims = JwtClaims {
            sub: user_id.to_string(),
            email,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| AppError::Internal {
            message: format!("Failed to generate token: {}", e),
        })
    }

    /// Validate and decode a bearer token
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims> {
        decode::<JwtClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::ExpiredToken,
                _ => AppError::InvalidToken,
            })
    }

    /// Validate a token and build the handler-facing context
    pub fn authenticate(&self, token: &str, request_id: String) -> Result<AuthContext> {
        let claims = self.validate_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

        Ok(AuthContext {
            user_id,
            email: claims.email,
            request_id,
        })
    }
}

/// Extract the bearer token from an Authorization header value
pub fn extract_bearer(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Axum extractor for AuthContext.
///
/// The gateway auth middleware validates the token and inserts the context
/// into request extensions; missing context means the route skipped the
/// middleware.
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized {
                message: "Missing authentication context".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer("abc.def.ghi"), None);
        assert_eq!(extract_bearer("Basic abc"), None);
    }

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test_secret");
        let user_id = Uuid::new_v4();

        let token = manager
            .generate_token(user_id, Some("user@example.com".into()))
            .unwrap();
        let ctx = manager.authenticate(&token, "req-1".into()).unwrap();

        assert_eq!(ctx.user_id, user_id);
        assert_eq!(ctx.email.as_deref(), Some("user@example.com"));
        assert_eq!(ctx.request_id, "req-1");
    }

    #[test]
    fn test_invalid_token_rejected() {
        let manager = JwtManager::new("test_secret");
        let other = JwtManager::new("other_secret");

        let token = other.generate_token(Uuid::new_v4(), None).unwrap();
        let err = manager.validate_token(&token).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
