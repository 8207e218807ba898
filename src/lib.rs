//! Record Server - a record-management service over a persistent socket
//!
//! Speaks a line-delimited JSON request/response protocol, authenticates
//! clients with signed tokens, and fronts the record store with an in-memory
//! cache using TTL expiration and LRU eviction.

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod store;
pub mod tasks;

pub use config::Config;
pub use server::Dispatcher;
pub use tasks::spawn_sweep_task;
