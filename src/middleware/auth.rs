use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
}

/// Содержимое JWT. `exp` необязателен: токен отзывается удалением сессии.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

impl JwtClaims {
    pub fn encode(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    pub fn decode(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();

        jsonwebtoken::decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
    }
}

// Bearer JWT + живая сессия в БД
impl FromRequestParts<Arc<crate::AppState>> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let claims = JwtClaims::decode(token, &state.config.jwt.secret).map_err(|e| {
            tracing::debug!("rejected token: {}", e);
            StatusCode::UNAUTHORIZED
        })?;

        let has_session = state
            .sessions
            .has_session(claims.user_id, token)
            .await
            .map_err(|e| {
                tracing::error!("session lookup failed: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;

        if !has_session {
            return Err(StatusCode::UNAUTHORIZED);
        }

        Ok(AuthUser {
            user_id: claims.user_id,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn token_roundtrip_without_exp() {
        let claims = JwtClaims {
            user_id: 42,
            exp: None,
        };

        let token = claims.encode("secret").unwrap();

        assert_eq!(JwtClaims::decode(&token, "secret").unwrap(), claims);
    }

    #[test]
    fn token_with_wrong_secret() {
        let token = JwtClaims {
            user_id: 42,
            exp: None,
        }
        .encode("secret")
        .unwrap();

        assert!(JwtClaims::decode(&token, "another secret").is_err());
    }

    #[test]
    fn expired_token() {
        let token = JwtClaims {
            user_id: 42,
            exp: Some(1),
        }
        .encode("secret")
        .unwrap();

        assert!(JwtClaims::decode(&token, "secret").is_err());
    }
}
