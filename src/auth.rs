//! Password hashing and JWT issue/verification.

use chrono::Utc;
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::ApiError;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Identity carried inside access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenData {
    pub id: i32,
    pub is_admin: bool,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    user: TokenData,
    kind: TokenKind,
    iat: i64,
    exp: i64,
}

/// A freshly issued access/refresh token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// Process-wide credential handling: bcrypt for passwords, HS256 JWTs for sessions.
pub struct Authenticator {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
    bcrypt_cost: u32,
}

impl Authenticator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.jwt_refresh_secret.as_bytes()),
            access_ttl_secs: config.access_ttl_secs,
            refresh_ttl_secs: config.refresh_ttl_secs,
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// Hashes on the blocking pool; bcrypt is deliberately slow.
    pub async fn hash_password(&self, password: String) -> Result<String, ApiError> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(ApiError::internal)?
            .map_err(ApiError::internal)
    }

    pub async fn verify_password(&self, password: String, hash: String) -> Result<bool, ApiError> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(ApiError::internal)?
            .map_err(ApiError::internal)
    }

    pub fn issue_tokens(&self, user: &TokenData) -> Result<TokenPair, ApiError> {
        Ok(TokenPair {
            token: self.sign(user, TokenKind::Access)?,
            refresh_token: self.sign(user, TokenKind::Refresh)?,
        })
    }

    /// Verifies a bearer token. Refresh tokens are not accepted here.
    pub fn verify_access(&self, token: &str) -> Result<TokenData, ApiError> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &self.access_decoding,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => ApiError::TokenExpired,
            _ => ApiError::InvalidAuthToken,
        })?;

        if data.claims.kind != TokenKind::Access {
            return Err(ApiError::InvalidAuthToken);
        }
        Ok(data.claims.user)
    }

    fn sign(&self, user: &TokenData, kind: TokenKind) -> Result<String, ApiError> {
        let (key, ttl) = match kind {
            TokenKind::Access => (&self.access_encoding, self.access_ttl_secs),
            TokenKind::Refresh => (&self.refresh_encoding, self.refresh_ttl_secs),
        };
        let now = Utc::now().timestamp();
        let claims = Claims { user: user.clone(), kind, iat: now, exp: now + ttl };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, key).map_err(ApiError::internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator(access_ttl_secs: i64) -> Authenticator {
        Authenticator::new(&AuthConfig {
            jwt_secret: "access-secret".to_owned(),
            jwt_refresh_secret: "refresh-secret".to_owned(),
            access_ttl_secs,
            refresh_ttl_secs: 3600,
            bcrypt_cost: 4,
        })
    }

    fn alice() -> TokenData {
        TokenData { id: 7, is_admin: false, email: "alice@example.com".to_owned(), name: None }
    }

    #[test]
    fn access_token_round_trips() {
        let auth = authenticator(3600);
        let pair = auth.issue_tokens(&alice()).unwrap();
        assert_eq!(auth.verify_access(&pair.token).unwrap(), alice());
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let auth = authenticator(3600);
        let pair = auth.issue_tokens(&alice()).unwrap();
        assert!(matches!(auth.verify_access(&pair.refresh_token), Err(ApiError::InvalidAuthToken)));
    }

    #[test]
    fn tampered_and_expired_tokens_are_rejected() {
        let auth = authenticator(3600);
        let mut token = auth.issue_tokens(&alice()).unwrap().token;
        token.push('x');
        assert!(matches!(auth.verify_access(&token), Err(ApiError::InvalidAuthToken)));

        let expired = authenticator(-3600);
        let token = expired.issue_tokens(&alice()).unwrap().token;
        assert!(matches!(expired.verify_access(&token), Err(ApiError::TokenExpired)));
    }

    #[tokio::test]
    async fn password_hash_verifies() {
        let auth = authenticator(3600);
        let hash = auth.hash_password("correct horse".to_owned()).await.unwrap();
        assert!(auth.verify_password("correct horse".to_owned(), hash.clone()).await.unwrap());
        assert!(!auth.verify_password("battery staple".to_owned(), hash).await.unwrap());
    }
}
