//! Account entity for authenticated link owners.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// Only the argon2 hash of the password is ever stored.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: i64, email: String, password_hash: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            password_hash,
            created_at,
        }
    }
}

/// Input data for registering a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}
