use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::storage::User;

/// Global cached JwtService instance
static JWT_SERVICE: OnceLock<JwtService> = OnceLock::new();

/// Get the cached JwtService instance
///
/// Initialized once from the `[auth]` configuration section.
pub fn get_jwt_service() -> &'static JwtService {
    JWT_SERVICE.get_or_init(JwtService::from_config)
}

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id
    pub sub: String,
    pub username: String,
    pub is_staff: bool,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl SessionClaims {
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

/// JWT Service for generating and validating session tokens
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_minutes: u64,
}

impl JwtService {
    pub fn new(secret: &str, session_minutes: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            session_minutes,
        }
    }

    /// Create JwtService from config
    pub fn from_config() -> Self {
        let config = crate::config::get_config();

        // 如果 secret 为空则生成一个随机值
        let secret = if config.auth.jwt_secret.is_empty() {
            tracing::warn!(
                "auth.jwt_secret not configured, generating a random one; sessions will not survive a restart"
            );
            crate::utils::generate_secure_token(32)
        } else {
            config.auth.jwt_secret.clone()
        };

        Self::new(&secret, config.auth.session_minutes)
    }

    pub fn session_minutes(&self) -> u64 {
        self.session_minutes
    }

    pub fn generate_session_token(
        &self,
        user: &User,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            is_staff: user.is_staff,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.session_minutes as i64)).timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn validate_session_token(
        &self,
        token: &str,
    ) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_staff: bool) -> User {
        User {
            id: 12,
            username: "carol".to_string(),
            password_hash: String::new(),
            is_staff,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trip_keeps_identity() {
        let service = JwtService::new("test-secret", 10);
        let token = service.generate_session_token(&user(true)).unwrap();
        let claims = service.validate_session_token(&token).unwrap();
        assert_eq!(claims.user_id(), Some(12));
        assert_eq!(claims.username, "carol");
        assert!(claims.is_staff);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let issuer = JwtService::new("secret-a", 10);
        let verifier = JwtService::new("secret-b", 10);
        let token = issuer.generate_session_token(&user(false)).unwrap();
        assert!(verifier.validate_session_token(&token).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = JwtService::new("test-secret", 10);
        assert!(service.validate_session_token("not.a.token").is_err());
    }
}
