//! Environment variable parsing utilities
//!
//! Small helpers so configuration loaders never need `unwrap()` on env lookups.

use std::str::FromStr;

/// Parse an environment variable with a default fallback
///
/// Missing and unparsable values both yield `default`.
pub fn parse_env_with_default<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parse a required environment variable
pub fn parse_env_required<T: FromStr>(key: &str) -> Result<T, String> {
    std::env::var(key)
        .map_err(|_| format!("Environment variable {} not found", key))?
        .parse()
        .map_err(|_| format!("Failed to parse environment variable {}", key))
}
