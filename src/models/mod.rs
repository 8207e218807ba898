//! Domain and wire models for the record server
//!
//! This module defines the managed Record entity, the user/credential types,
//! and the DTOs serialized on the line-delimited JSON protocol.

pub mod protocol;
pub mod record;
pub mod user;

// Re-export commonly used types
pub use protocol::{Request, RequestType, Response, ResponseStatus};
pub use record::Record;
pub use user::{Credentials, Role, User};
