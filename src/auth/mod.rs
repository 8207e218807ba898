//! Auth Module
//!
//! Token issuing/verification and the read-only user directory.

mod token;
mod users;

pub use token::{TokenClaims, TokenService};
pub use users::UserDirectory;
