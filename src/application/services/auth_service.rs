//! Account registration, login, and bearer token verification.

use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::password_hash::rand_core::OsRng;
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::ValidateEmail;

use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Token lifetime.
const TOKEN_TTL_HOURS: i64 = 24;

/// Minimum accepted password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// JWT claims carried by issued tokens.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Account id, stringified.
    sub: String,
    iat: i64,
    exp: i64,
}

/// Service for account auth: registration, login, and token verification.
///
/// Passwords are hashed with argon2id before storage; sessions are
/// stateless HS256 JWTs whose `sub` claim carries the account id.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_secret: String,
}

impl AuthService {
    /// Creates a new auth service.
    ///
    /// The `jwt_secret` signs and verifies all issued tokens; rotating it
    /// invalidates every outstanding session.
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: String) -> Self {
        Self { users, jwt_secret }
    }

    /// Registers a new account and returns it with a fresh token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed email or a password
    /// shorter than eight characters, and [`AppError::Conflict`] when the
    /// email is already registered.
    pub async fn register(&self, email: &str, password: &str) -> Result<(User, String), AppError> {
        if !email.validate_email() {
            return Err(AppError::bad_request(
                "Invalid email address",
                json!({ "email": email }),
            ));
        }

        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(
                "Password must be at least 8 characters",
                json!({ "provided_length": password.len() }),
            ));
        }

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(NewUser {
                email: email.to_ascii_lowercase(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                AppError::Conflict { .. } => AppError::conflict(
                    "Email already registered",
                    json!({ "email": email }),
                ),
                other => other,
            })?;

        let token = self.issue_token(user.id)?;
        Ok((user, token))
    }

    /// Authenticates credentials and returns a fresh token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown email or a wrong
    /// password; the two cases are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let invalid = || {
            AppError::unauthorized(
                "Invalid email or password",
                json!({}),
            )
        };

        let user = self
            .users
            .find_by_email(&email.to_ascii_lowercase())
            .await?
            .ok_or_else(invalid)?;

        verify_password(password, &user.password_hash).map_err(|_| invalid())?;

        self.issue_token(user.id)
    }

    /// Verifies a bearer token and returns the account id it was issued to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for a malformed, forged, or
    /// expired token.
    pub fn verify_token(&self, token: &str) -> Result<i64, AppError> {
        let invalid = || {
            AppError::unauthorized(
                "Invalid or expired token",
                json!({}),
            )
        };

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| invalid())?;

        data.claims.sub.parse::<i64>().map_err(|_| invalid())
    }

    /// Signs a token for the given account.
    fn issue_token(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::internal("Failed to sign token", json!({ "reason": e.to_string() })))
    }
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            AppError::internal("Failed to hash password", json!({ "reason": e.to_string() }))
        })
}

fn verify_password(password: &str, stored_hash: &str) -> Result<(), ()> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| ())?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;

    fn service(repo: MockUserRepository) -> AuthService {
        AuthService::new(Arc::new(repo), "test-jwt-secret".to_string())
    }

    fn stored_user(email: &str, password: &str) -> User {
        User::new(
            7,
            email.to_string(),
            hash_password(password).unwrap(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_register_returns_verifiable_token() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .withf(|n| n.email == "user@example.com" && n.password_hash.starts_with("$argon2"))
            .times(1)
            .returning(|n| Ok(User::new(7, n.email, n.password_hash, Utc::now())));

        let service = service(mock_repo);
        let (user, token) = service
            .register("user@example.com", "correct-horse")
            .await
            .unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(service.verify_token(&token).unwrap(), 7);
    }

    #[tokio::test]
    async fn test_register_lowercases_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .withf(|n| n.email == "user@example.com")
            .times(1)
            .returning(|n| Ok(User::new(1, n.email, n.password_hash, Utc::now())));

        let result = service(mock_repo)
            .register("User@Example.COM", "correct-horse")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let result = service(MockUserRepository::new())
            .register("not-an-email", "correct-horse")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let result = service(MockUserRepository::new())
            .register("user@example.com", "short")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflict() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", json!({}))));

        let result = service(mock_repo)
            .register("user@example.com", "correct-horse")
            .await;

        match result.unwrap_err() {
            AppError::Conflict { message, .. } => {
                assert!(message.contains("already registered"));
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "user@example.com")
            .times(1)
            .returning(|_| Ok(Some(stored_user("user@example.com", "correct-horse"))));

        let service = service(mock_repo);
        let token = service.login("user@example.com", "correct-horse").await.unwrap();

        assert_eq!(service.verify_token(&token).unwrap(), 7);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(stored_user("user@example.com", "correct-horse"))));

        let result = service(mock_repo)
            .login("user@example.com", "wrong-password")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_repo)
            .login("nobody@example.com", "correct-horse")
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_verify_token_rejects_garbage() {
        let service = service(MockUserRepository::new());
        assert!(service.verify_token("not.a.jwt").is_err());
    }

    #[test]
    fn test_verify_token_rejects_foreign_secret() {
        let issuer = AuthService::new(Arc::new(MockUserRepository::new()), "secret-a".to_string());
        let verifier = AuthService::new(Arc::new(MockUserRepository::new()), "secret-b".to_string());

        let token = issuer.issue_token(3).unwrap();

        assert!(issuer.verify_token(&token).is_ok());
        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_password_hashes_are_salted() {
        let h1 = hash_password("correct-horse").unwrap();
        let h2 = hash_password("correct-horse").unwrap();

        assert_ne!(h1, h2);
        assert!(verify_password("correct-horse", &h1).is_ok());
        assert!(verify_password("correct-horse", &h2).is_ok());
        assert!(verify_password("battery-staple", &h1).is_err());
    }
}
