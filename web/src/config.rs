//! Configuration management for the Ticket Desk server.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use ticket_desk_core::environment::DEFAULT_MODERATOR_ID;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Ticket document configuration
    pub tickets: TicketsConfig,
    /// Cross-origin configuration
    pub cors: CorsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log filter (trace, debug, info, warn, error, or a full directive)
    pub log_level: String,
}

/// Ticket document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketsConfig {
    /// Path of the JSON document holding tickets and messages
    pub file: PathBuf,
    /// Write the document back after each resolve/remove (default: false)
    pub persist: bool,
    /// Identity recorded in `resolved_by`
    pub moderator_id: String,
    /// Page size of `GET /tickets` when no `limit` is given
    pub default_limit: usize,
}

/// Cross-origin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// The single origin allowed to call the API with credentials
    pub allowed_origin: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: lookup("PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5001),
                log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            },
            tickets: TicketsConfig {
                file: lookup("TICKETS_FILE")
                    .map_or_else(|| PathBuf::from("../data/awesome_tickets.json"), PathBuf::from),
                persist: lookup("TICKETS_PERSIST")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(false),
                moderator_id: lookup("MODERATOR_ID")
                    .unwrap_or_else(|| DEFAULT_MODERATOR_ID.to_string()),
                default_limit: lookup("TICKETS_DEFAULT_LIMIT")
                    .and_then(|s| s.parse().ok())
                    .filter(|limit| *limit > 0)
                    .unwrap_or(20),
            },
            cors: CorsConfig {
                allowed_origin: lookup("CORS_ORIGIN")
                    .unwrap_or_else(|| "http://localhost:3000".to_string()),
            },
        }
    }

    /// Address to bind the HTTP listener to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_original_deployment() {
        let config = config_from(&[]);

        assert_eq!(config.bind_address(), "0.0.0.0:5001");
        assert_eq!(config.tickets.file, PathBuf::from("../data/awesome_tickets.json"));
        assert!(!config.tickets.persist);
        assert_eq!(config.tickets.moderator_id, "moderator_id");
        assert_eq!(config.tickets.default_limit, 20);
        assert_eq!(config.cors.allowed_origin, "http://localhost:3000");
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("TICKETS_FILE", "/srv/tickets.json"),
            ("TICKETS_PERSIST", "true"),
            ("MODERATOR_ID", "mod-42"),
            ("CORS_ORIGIN", "https://desk.example.com"),
        ]);

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.tickets.file, PathBuf::from("/srv/tickets.json"));
        assert!(config.tickets.persist);
        assert_eq!(config.tickets.moderator_id, "mod-42");
        assert_eq!(config.cors.allowed_origin, "https://desk.example.com");
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("TICKETS_PERSIST", "maybe"),
            ("TICKETS_DEFAULT_LIMIT", "0"),
        ]);

        assert_eq!(config.server.port, 5001);
        assert!(!config.tickets.persist);
        assert_eq!(config.tickets.default_limit, 20);
    }
}
