//! JWT authentication for reservation and payment endpoints.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::ApiError;

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id
    sub: u32,
    exp: i64,
    iat: i64,
}

/// Shared key material for issuing and validating session tokens.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    /// Issue a session token for a user.
    pub fn issue(&self, user_id: u32) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
            iat: now.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
    }

    fn verify(&self, token: &str) -> Result<u32, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims.sub)
    }
}

/// Authenticated user id, inserted into request extensions by
/// [`require_user`].
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub u32);

/// Middleware that requires a valid session token.
///
/// Expected header format: `Authorization: Bearer <token>`
pub async fn require_user(
    State(keys): State<JwtKeys>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let Some(auth) = auth_header else {
        return Err(ApiError::Unauthorized(
            "missing Authorization header, expected: Bearer <token>".into(),
        ));
    };
    let Some(token) = auth.strip_prefix("Bearer ") else {
        return Err(ApiError::Unauthorized(
            "invalid Authorization header format, expected: Bearer <token>".into(),
        ));
    };

    match keys.verify(token) {
        Ok(user_id) => {
            request.extensions_mut().insert(AuthUser(user_id));
            Ok(next.run(request).await)
        }
        Err(err) => {
            tracing::debug!("token rejected: {err}");
            Err(ApiError::Unauthorized("invalid or expired token".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_verify_back_to_the_user() {
        let keys = JwtKeys::new("test-secret");
        let token = keys.issue(7).unwrap();
        assert_eq!(keys.verify(&token).unwrap(), 7);
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let keys = JwtKeys::new("test-secret");
        let other = JwtKeys::new("other-secret");
        let token = other.issue(7).unwrap();
        assert!(keys.verify(&token).is_err());
    }
}
