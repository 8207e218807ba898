//! User Directory Module
//!
//! Read-only source of truth for credentials and roles. Passwords are kept
//! only as salted bcrypt hashes and checked with a one-way comparison.

use tracing::debug;

use crate::error::{Result, ServerError};
use crate::models::{Role, User};

// == User Directory ==
/// Fixed set of known users, constructed once at startup and passed by
/// handle into the dispatcher.
#[derive(Debug)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    // == Constructor ==
    /// Creates a directory over a pre-built user list.
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Creates the default directory with one admin and one plain user.
    ///
    /// Hashing happens at construction so plaintext passwords never live
    /// past startup.
    pub fn with_default_users() -> Result<Self> {
        let hash = |pw: &str| {
            bcrypt::hash(pw, bcrypt::DEFAULT_COST)
                .map_err(|e| ServerError::Internal(format!("password hashing failed: {e}")))
        };

        Ok(Self::new(vec![
            User {
                id: 1,
                username: "pepe".to_string(),
                password_hash: hash("pepe1234")?,
                role: Role::Admin,
            },
            User {
                id: 2,
                username: "ana".to_string(),
                password_hash: hash("ana1234")?,
                role: Role::User,
            },
        ]))
    }

    // == Find By Username ==
    /// Looks up a user by its unique username.
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|user| user.username == username)
    }

    // == Find By Id ==
    /// Looks up a user by numeric id.
    pub fn find_by_id(&self, id: i64) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    // == Verify Password ==
    /// One-way comparison of a candidate password against the stored hash.
    /// Any hashing error counts as a failed match.
    pub fn verify_password(&self, user: &User, password: &str) -> bool {
        match bcrypt::verify(password, &user.password_hash) {
            Ok(matched) => matched,
            Err(e) => {
                debug!(user = %user.username, error = %e, "password verification error");
                false
            }
        }
    }
}
