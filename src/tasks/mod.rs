//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL sweep: removes cache entries older than the TTL at fixed intervals

mod sweep;

pub use sweep::{spawn_sweep_task, SweepHandle};
