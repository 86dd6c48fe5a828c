//! JWT token handling

use crate::config::JwtConfig;
use crate::error::{AppError, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Authenticated caller, as embedded in a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
}

/// Token validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature is invalid")]
    SignatureInvalid,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token has expired")]
    Expired,
}

/// JWT token manager
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Expiry is checked against the caller-supplied instant, so the
    /// library's own clock-based check is disabled.
    fn validation(&self) -> Validation {
        let mut v = Validation::new(Algorithm::HS256);
        v.validate_exp = false;
        v.leeway = 0;
        v
    }

    /// Issue a signed token for `identity`, valid for the configured lifetime from `now`
    pub fn issue_token(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String> {
        let exp = now + Duration::seconds(self.config.token_ttl_secs);

        let claims = IdentityClaims {
            sub: identity.user_id.to_string(),
            username: identity.username.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        let header = Header::new(Algorithm::HS256);
        encode(&header, &claims, &self.encoding_key).map_err(|e| AppError::Internal(e.into()))
    }

    /// Verify a token and return the identity it carries
    pub fn validate_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> std::result::Result<Identity, TokenError> {
        let token_data = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::SignatureInvalid
                }
                _ => TokenError::Malformed(e.to_string()),
            })?;
        let claims = token_data.claims;

        if now.timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| TokenError::Malformed(format!("invalid subject: {}", claims.sub)))?;

        Ok(Identity {
            user_id,
            username: claims.username,
        })
    }
}
