//! User Model Module
//!
//! Identity types served by the user directory and the login credentials DTO.

use serde::{Deserialize, Serialize};

// == Role ==
/// Permission level attached to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    User,
}

// == User ==
/// An identity from the user directory.
///
/// The password is stored as a salted one-way hash, never in the clear.
#[derive(Debug, Clone)]
pub struct User {
    /// Numeric identifier
    pub id: i64,
    /// Unique username
    pub username: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Permission level
    pub role: Role,
}

// == Credentials ==
/// Login payload carried in the content of a LOGIN request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
