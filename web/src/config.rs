//! Configuration management for the todo server.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file in the working directory is honoured by the server binary.

use std::env;
use std::str::FromStr;
use todo::TodoLimits;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Host to bind to (`TODO_HOST`, default `0.0.0.0`)
    pub host: String,
    /// Port to bind to (`TODO_PORT`, default `8080`)
    pub port: u16,
    /// Default log filter when `RUST_LOG` is unset (`TODO_LOG_LEVEL`, default `info`)
    pub log_level: String,
    /// Title and description limits (`TODO_MAX_TITLE_CHARS`,
    /// `TODO_MAX_DESCRIPTION_CHARS`, default 100 and 500)
    pub limits: TodoLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Unset or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("TODO_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "TODO_PORT").unwrap_or(8080),
            log_level: lookup("TODO_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            limits: TodoLimits {
                max_title_chars: parsed(&lookup, "TODO_MAX_TITLE_CHARS")
                    .unwrap_or(TodoLimits::DEFAULT.max_title_chars),
                max_description_chars: parsed(&lookup, "TODO_MAX_DESCRIPTION_CHARS")
                    .unwrap_or(TodoLimits::DEFAULT.max_description_chars),
            },
        }
    }

    /// `host:port` to bind the listener to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Looks up `key` and parses it, ignoring surrounding whitespace.
fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|value| value.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.limits, TodoLimits::DEFAULT);
    }

    #[test]
    fn test_overrides() {
        let vars = HashMap::from([
            ("TODO_HOST", "127.0.0.1"),
            ("TODO_PORT", "3000"),
            ("TODO_LOG_LEVEL", "debug"),
            ("TODO_MAX_TITLE_CHARS", "20"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.limits.max_title_chars, 20);
        assert_eq!(config.limits.max_description_chars, 500);
    }

    #[test]
    fn test_port_and_limits_parse_independently() {
        let vars = HashMap::from([
            ("TODO_PORT", " 9000 "),
            ("TODO_MAX_TITLE_CHARS", "70000"),
            ("TODO_MAX_DESCRIPTION_CHARS", "1000"),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).map(ToString::to_string));

        assert_eq!(config.port, 9000);
        assert_eq!(config.limits.max_title_chars, 70_000);
        assert_eq!(config.limits.max_description_chars, 1000);
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = Config::from_lookup(|key| (key == "TODO_PORT").then(|| "eighty".to_string()));
        assert_eq!(config.port, 8080);
    }
}
