//! Configuration management for the soql-mcp server

use crate::{Result, SalesforceCredentials, SfdcError};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Main configuration for the soql-mcp server, loaded from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server name advertised to MCP clients
    pub server_name: String,

    /// Server version advertised to MCP clients
    pub server_version: String,

    /// Commit hash baked in at build time (empty for dev builds)
    pub commit: String,

    /// Build date baked in at build time (empty for dev builds)
    pub build_date: String,

    /// Path of the terms file served as an MCP resource
    pub resource_path: String,

    /// Enable debug behavior
    pub debug: bool,

    /// Default log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Salesforce credentials
    pub salesforce: SalesforceCredentials,
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            server_name: env_or_default("MCP_SERVER_NAME", "soql-mcp"),
            server_version: env_or_default("MCP_SERVER_VERSION", env!("CARGO_PKG_VERSION")),
            commit: env_or_default("MCP_COMMIT", ""),
            build_date: env_or_default("MCP_BUILD_DATE", ""),
            resource_path: env_or_default("MCP_RESOURCE_PATH", ""),
            debug: env_bool("MCP_DEBUG", false),
            log_level: env_or_default("MCP_LOG_LEVEL", "info"),
            salesforce: SalesforceCredentials::from_env(),
        }
    }

    /// Validate the local settings the server cannot start without.
    ///
    /// Salesforce credentials are deliberately not checked here; their
    /// absence surfaces as a configuration error on the first
    /// authentication attempt instead of preventing startup.
    pub fn validate(&self) -> Result<()> {
        if self.server_name.is_empty() {
            return Err(SfdcError::Config("server name cannot be empty".to_string()));
        }
        if self.server_version.is_empty() {
            return Err(SfdcError::Config(
                "server version cannot be empty".to_string(),
            ));
        }
        if self.resource_path.is_empty() {
            return Err(SfdcError::Config(
                "resource path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Non-secret configuration snapshot for the `debug` tool.
    pub fn summary(&self) -> String {
        let mut out = String::from("Server configuration information:\n");
        let _ = writeln!(out, "  Server name: {}", self.server_name);
        let _ = writeln!(out, "  Server version: {}", self.server_version);
        let _ = writeln!(out, "  Commit: {}", self.commit);
        let _ = writeln!(out, "  Build date: {}", self.build_date);
        let _ = writeln!(out, "  Resource path: {}", self.resource_path);
        let _ = writeln!(out, "  Debug mode: {}", self.debug);
        let _ = writeln!(out, "  Log level: {}", self.log_level);
        let _ = writeln!(out, "  Salesforce URL: {}", self.salesforce.login_url);
        let _ = writeln!(out, "  Salesforce client ID: {}", self.salesforce.client_id);
        let _ = writeln!(out, "  Salesforce username: {}", self.salesforce.username);
        out
    }
}

/// Value of an environment variable, or the default when unset or empty.
pub fn env_or_default(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => value.parse().unwrap_or(default),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ServerConfig {
        ServerConfig {
            server_name: "soql-mcp".to_string(),
            server_version: "0.2.0".to_string(),
            commit: String::new(),
            build_date: String::new(),
            resource_path: "/tmp/terms.json".to_string(),
            debug: false,
            log_level: "info".to_string(),
            salesforce: SalesforceCredentials::from_env(),
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn empty_resource_path_is_rejected() {
        let mut config = base_config();
        config.resource_path.clear();
        assert!(matches!(config.validate(), Err(SfdcError::Config(_))));
    }

    #[test]
    fn empty_server_name_is_rejected() {
        let mut config = base_config();
        config.server_name.clear();
        assert!(matches!(config.validate(), Err(SfdcError::Config(_))));
    }

    #[test]
    fn summary_never_contains_secrets() {
        let mut config = base_config();
        config.salesforce.password = "s3cret-password".to_string();
        config.salesforce.client_secret = "s3cret-client".to_string();
        config.salesforce.security_token = "s3cret-token".to_string();

        let summary = config.summary();
        assert!(!summary.contains("s3cret"));
        assert!(summary.contains("Server name: soql-mcp"));
    }
}
