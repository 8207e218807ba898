//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port the acceptor listens on
    pub server_port: u16,
    /// Maximum number of records the cache can hold
    pub cache_capacity: usize,
    /// Cache entry TTL in seconds
    pub cache_ttl: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// Symmetric secret used to sign tokens
    pub token_secret: String,
    /// Token lifetime in seconds
    pub token_ttl: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - TCP listen port (default: 3000)
    /// - `CACHE_CAPACITY` - Maximum cached records (default: 10)
    /// - `CACHE_TTL` - Cache entry TTL in seconds (default: 60)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `TOKEN_SECRET` - Token signing secret (default: a dev-only value)
    /// - `TOKEN_TTL` - Token lifetime in seconds (default: 300)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cache_capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            token_secret: env::var("TOKEN_SECRET")
                .unwrap_or_else(|_| "change-me-in-production".to_string()),
            token_ttl: env::var("TOKEN_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_capacity: 10,
            cache_ttl: 60,
            sweep_interval: 60,
            token_secret: "change-me-in-production".to_string(),
            token_ttl: 300,
        }
    }
}
