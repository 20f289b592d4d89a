/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT generation and validation for user sessions.
 *
 * Tokens are HS256-signed and come in two flavours distinguished by the
 * `token_type` claim: short-lived `access` tokens for authenticating API
 * calls and long-lived `refresh` tokens for minting new access tokens.
 * Both carry the account's username, email and full name alongside the
 * standard `exp`/`iat`/`jti` claims.
 */

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::auth::users::User;
use crate::shared::AppConfig;

/// Which half of a token pair a JWT is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub token_type: TokenType,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Unique token id
    pub jti: String,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
}

impl Claims {
    fn new(
        token_type: TokenType,
        user_id: i64,
        username: String,
        email: String,
        full_name: String,
        lifetime: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            token_type,
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
            jti: uuid::Uuid::new_v4().simple().to_string(),
            user_id,
            username,
            email,
            full_name,
        }
    }

    /// Claims for `user`, valid for `lifetime` from now
    pub fn for_user(user: &User, token_type: TokenType, lifetime: Duration) -> Self {
        Self::new(
            token_type,
            user.id,
            user.username.clone(),
            user.email.clone(),
            user.full_name.clone(),
            lifetime,
        )
    }
}

/// An access/refresh token pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Token verification failure
#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed, or expired
    #[error("{0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Valid token of the other type
    #[error("expected {expected:?} token, got {actual:?}")]
    WrongType { expected: TokenType, actual: TokenType },
}

/// Signing keys plus token lifetimes
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys")
            .field("access_lifetime", &self.access_lifetime)
            .field("refresh_lifetime", &self.refresh_lifetime)
            .finish_non_exhaustive()
    }
}

impl JwtKeys {
    pub fn new(secret: &str, access_lifetime_secs: i64, refresh_lifetime_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_lifetime: Duration::seconds(access_lifetime_secs),
            refresh_lifetime: Duration::seconds(refresh_lifetime_secs),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.jwt_secret,
            config.access_token_lifetime_secs,
            config.refresh_token_lifetime_secs,
        )
    }

    fn lifetime(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => self.access_lifetime,
            TokenType::Refresh => self.refresh_lifetime,
        }
    }

    fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
    }

    /// Create a JWT of the given type for a user
    pub fn create_token(&self, user: &User, token_type: TokenType) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims::for_user(user, token_type, self.lifetime(token_type));
        self.sign(&claims)
    }

    /// Create an access and a refresh token for a user
    pub fn create_token_pair(&self, user: &User) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        Ok(TokenPair {
            access: self.create_token(user, TokenType::Access)?,
            refresh: self.create_token(user, TokenType::Refresh)?,
        })
    }

    /// Verify signature, expiry and token type
    pub fn verify_token(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.decoding, &validation)?.claims;
        if claims.token_type != expected {
            return Err(TokenError::WrongType {
                expected,
                actual: claims.token_type,
            });
        }
        Ok(claims)
    }

    /// Mint a new access token from a valid refresh token
    ///
    /// The identity claims are copied from the refresh token, so they reflect
    /// the account as it was when the pair was issued.
    pub fn refresh_access_token(&self, refresh: &str) -> Result<String, TokenError> {
        let claims = self.verify_token(refresh, TokenType::Refresh)?;
        let access = Claims::new(
            TokenType::Access,
            claims.user_id,
            claims.username,
            claims.email,
            claims.full_name,
            self.access_lifetime,
        );
        Ok(self.sign(&access)?)
    }
}
