//! Configuration module for the JIT access API.
//!
//! This module loads and validates application configuration from
//! environment variables, following the core's env-var contract (spec §6):
//! the core consumes only `RESOURCE_SCOPE`, `ACTIVATION_TIMEOUT`,
//! `JUSTIFICATION_PATTERN`/`JUSTIFICATION_HINT`, the `ACTIVATION_REQUEST_*`
//! bounds, `AVAILABLE_PROJECTS_QUERY`, and `RESOURCE_CATALOG`. Server and
//! logging settings are ambient and not named by the core spec.

use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub activation: ActivationConfig,
    pub justification: JustificationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

/// Activation-scoping and duration-bound configuration (spec §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationConfig {
    /// Organization/folder/project path this deployment manages.
    pub resource_scope: String,
    /// Maximum activation duration, in minutes (`ACTIVATION_TIMEOUT`, >= 5).
    pub max_activation_minutes: i64,
    /// Default activation duration offered to callers, in minutes. Must be
    /// `<= max_activation_minutes` (spec §6 `/metadata` invariant).
    pub default_activation_minutes: i64,
    pub max_roles_per_request: usize,
    /// MPA request token lifetime, in minutes (`ACTIVATION_REQUEST_TIMEOUT`,
    /// `<= max_activation_minutes`).
    pub request_token_minutes: i64,
    pub min_reviewers: usize,
    pub max_reviewers: usize,
    /// Resource-manager project search query, if the deployment wants the
    /// `ProjectSearch` discovery backend instead of `RoleRepository`.
    pub available_projects_query: Option<String>,
    /// `PolicyAnalyzer` or `AssetInventory` (spec §4.3 backend choice).
    pub resource_catalog: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JustificationConfig {
    pub pattern: String,
    pub hint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            activation: ActivationConfig::default(),
            justification: JustificationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: 30,
        }
    }
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            resource_scope: "projects/demo-project".to_string(),
            max_activation_minutes: 120,
            default_activation_minutes: 60,
            max_roles_per_request: 10,
            request_token_minutes: 60,
            min_reviewers: 1,
            max_reviewers: 10,
            available_projects_query: None,
            resource_catalog: "PolicyAnalyzer".to_string(),
        }
    }
}

impl Default for JustificationConfig {
    fn default() -> Self {
        Self {
            pattern: ".*".to_string(),
            hint: "Bug or case number".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = env::var("JIT_SERVER_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("JIT_SERVER_PORT") {
            if let Ok(port) = port.parse() {
                config.server.port = port;
            }
        }
        if let Ok(timeout) = env::var("JIT_SERVER_REQUEST_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout.parse() {
                config.server.request_timeout_secs = timeout;
            }
        }

        if let Ok(scope) = env::var("RESOURCE_SCOPE") {
            config.activation.resource_scope = scope;
        }
        if let Ok(timeout) = env::var("ACTIVATION_TIMEOUT") {
            if let Ok(minutes) = timeout.parse() {
                config.activation.max_activation_minutes = minutes;
            }
        }
        if let Ok(max_roles) = env::var("ACTIVATION_REQUEST_MAX_ROLES") {
            if let Ok(max_roles) = max_roles.parse() {
                config.activation.max_roles_per_request = max_roles;
            }
        }
        if let Ok(req_timeout) = env::var("ACTIVATION_REQUEST_TIMEOUT") {
            if let Ok(minutes) = req_timeout.parse() {
                config.activation.request_token_minutes = minutes;
            }
        }
        if let Ok(min_reviewers) = env::var("ACTIVATION_REQUEST_MIN_REVIEWERS") {
            if let Ok(n) = min_reviewers.parse() {
                config.activation.min_reviewers = n;
            }
        }
        if let Ok(max_reviewers) = env::var("ACTIVATION_REQUEST_MAX_REVIEWERS") {
            if let Ok(n) = max_reviewers.parse() {
                config.activation.max_reviewers = n;
            }
        }
        if let Ok(query) = env::var("AVAILABLE_PROJECTS_QUERY") {
            config.activation.available_projects_query = Some(query);
        }
        if let Ok(catalog) = env::var("RESOURCE_CATALOG") {
            config.activation.resource_catalog = catalog;
        }

        if let Ok(pattern) = env::var("JUSTIFICATION_PATTERN") {
            config.justification.pattern = pattern;
        }
        if let Ok(hint) = env::var("JUSTIFICATION_HINT") {
            config.justification.hint = hint;
        }

        if let Ok(level) = env::var("JIT_LOGGING_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = env::var("JIT_LOGGING_FORMAT") {
            config.logging.format = format;
        }

        config
    }

    /// Validate configuration invariants named in spec §6.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port cannot be 0".to_string());
        }
        if self.activation.max_activation_minutes < 5 {
            return Err("ACTIVATION_TIMEOUT must be >= 5 minutes".to_string());
        }
        if self.activation.default_activation_minutes > self.activation.max_activation_minutes {
            return Err("default activation duration cannot exceed ACTIVATION_TIMEOUT".to_string());
        }
        if self.activation.default_activation_minutes > 60 {
            return Err("default activation duration must be <= 60 minutes".to_string());
        }
        if self.activation.request_token_minutes > self.activation.max_activation_minutes {
            return Err(
                "ACTIVATION_REQUEST_TIMEOUT cannot exceed ACTIVATION_TIMEOUT".to_string(),
            );
        }
        if self.activation.min_reviewers == 0 {
            return Err("ACTIVATION_REQUEST_MIN_REVIEWERS must be >= 1".to_string());
        }
        if self.activation.min_reviewers > self.activation.max_reviewers {
            return Err(
                "ACTIVATION_REQUEST_MIN_REVIEWERS cannot exceed ACTIVATION_REQUEST_MAX_REVIEWERS"
                    .to_string(),
            );
        }
        if !["PolicyAnalyzer", "AssetInventory"].contains(&self.activation.resource_catalog.as_str())
        {
            return Err(
                "RESOURCE_CATALOG must be one of PolicyAnalyzer, AssetInventory".to_string(),
            );
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level '{}'. Valid values: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }
        let valid_formats = ["pretty", "json", "compact"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(format!(
                "Invalid log format '{}'. Valid values: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        Ok(())
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_activation_timeout_below_five_minutes() {
        let mut config = Config::default();
        config.activation.max_activation_minutes = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_request_timeout_above_activation_timeout() {
        let mut config = Config::default();
        config.activation.max_activation_minutes = 30;
        config.activation.request_token_minutes = 60;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_reviewer_bounds() {
        let mut config = Config::default();
        config.activation.min_reviewers = 5;
        config.activation.max_reviewers = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn server_address_formats_host_and_port() {
        let config = Config::default();
        assert_eq!(config.server_address(), "0.0.0.0:3000");
    }
}
