//! Registration, login and bearer-token verification.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Issued tokens are valid for 30 days.
const TOKEN_TTL_DAYS: i64 = 30;

/// JWT payload. `sub` carries the user id as a decimal string.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// An authenticated user together with their bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

/// Service handling user accounts and HS256 bearer tokens.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: &str) -> Self {
        Self {
            users,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }

    /// Creates an account and signs the user in.
    ///
    /// Emails are stored lowercase so lookups are case-insensitive. A
    /// duplicate username or email surfaces as a 400 from the repository's
    /// unique constraints.
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<AuthenticatedUser, AppError> {
        let password_hash = hash_password(&password)?;

        let user = self
            .users
            .create(NewUser {
                username,
                email: email.to_lowercase(),
                password_hash,
            })
            .await?;

        let token = self.issue_token(user.id)?;
        Ok(AuthenticatedUser { user, token })
    }

    /// Verifies credentials and returns a fresh token.
    ///
    /// An unknown email and a wrong password produce the same error, so the
    /// response never reveals which part was wrong.
    pub async fn login(&self, email: String, password: String) -> Result<AuthenticatedUser, AppError> {
        let invalid = || AppError::unauthorized("Invalid email or password", json!({}));

        let user = self
            .users
            .find_by_email(&email.to_lowercase())
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(&password, &user.password_hash)? {
            return Err(invalid());
        }

        let token = self.issue_token(user.id)?;
        Ok(AuthenticatedUser { user, token })
    }

    /// Decodes a bearer token and returns the id of the user it names.
    ///
    /// The user must still exist; a token for a deleted account is rejected.
    pub async fn verify_token(&self, token: &str) -> Result<i64, AppError> {
        let invalid = || AppError::unauthorized("Invalid or expired token", json!({}));

        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| invalid())?;

        let user_id: i64 = data.claims.sub.parse().map_err(|_| invalid())?;

        self.users
            .find_by_id(user_id)
            .await?
            .map(|user| user.id)
            .ok_or_else(invalid)
    }

    fn issue_token(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal("Failed to sign token", json!({ "reason": e.to_string() })))
    }
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal("Failed to hash password", json!({ "reason": e.to_string() })))
}

fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::internal("Stored password hash is malformed", json!({ "reason": e.to_string() })))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
