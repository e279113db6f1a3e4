//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// TTL applied to market-trends entries (one hour).
pub const DEFAULT_MARKET_TTL_MS: u64 = 3_600_000;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in milliseconds for every market-trends entry
    pub market_ttl_ms: u64,
    /// Seconds between expiry sweeps, 0 disables the sweep task
    pub sweep_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `MARKET_CACHE_TTL_MS` - Market cache TTL in ms (default: 3600000)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 0, disabled)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from any variable source. Unset or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_or(&lookup, "SERVER_PORT", defaults.server_port),
            market_ttl_ms: parse_or(&lookup, "MARKET_CACHE_TTL_MS", defaults.market_ttl_ms),
            sweep_interval: parse_or(&lookup, "SWEEP_INTERVAL", defaults.sweep_interval),
        }
    }

    /// Whether the periodic sweep should run.
    pub fn sweep_enabled(&self) -> bool {
        self.sweep_interval > 0
    }
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> T {
    lookup(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            market_ttl_ms: DEFAULT_MARKET_TTL_MS,
            sweep_interval: 0,
        }
    }
}
