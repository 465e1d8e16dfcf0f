//! Salesforce credential snapshot

use crate::{Result, SfdcError};
use serde::{Deserialize, Serialize};

/// Immutable credential set for the OAuth password-grant exchange.
///
/// All six fields must be non-empty before any authentication attempt is
/// made; a missing field is a configuration error and never reaches the
/// network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesforceCredentials {
    /// Auth endpoint base URL (login.salesforce.com or a sandbox host)
    pub login_url: String,
    /// Connected-app consumer key
    pub client_id: String,
    /// Connected-app consumer secret
    pub client_secret: String,
    pub username: String,
    pub password: String,
    /// Appended to the password in the token exchange
    pub security_token: String,
}

impl SalesforceCredentials {
    /// Load credentials from `SALESFORCE_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            login_url: crate::config::env_or_default(
                "SALESFORCE_URL",
                "https://login.salesforce.com",
            ),
            client_id: crate::config::env_or_default("SALESFORCE_CLIENT_ID", ""),
            client_secret: crate::config::env_or_default("SALESFORCE_CLIENT_SECRET", ""),
            username: crate::config::env_or_default("SALESFORCE_USERNAME", ""),
            password: crate::config::env_or_default("SALESFORCE_PASSWORD", ""),
            security_token: crate::config::env_or_default("SALESFORCE_SECURITY_TOKEN", ""),
        }
    }

    /// Check that every field required for the token exchange is present.
    pub fn validate(&self) -> Result<()> {
        let missing = [
            ("SALESFORCE_URL", &self.login_url),
            ("SALESFORCE_CLIENT_ID", &self.client_id),
            ("SALESFORCE_CLIENT_SECRET", &self.client_secret),
            ("SALESFORCE_USERNAME", &self.username),
            ("SALESFORCE_PASSWORD", &self.password),
            ("SALESFORCE_SECURITY_TOKEN", &self.security_token),
        ]
        .into_iter()
        .find(|(_, value)| value.is_empty());

        match missing {
            Some((name, _)) => Err(SfdcError::Config(format!("{name} is required"))),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> SalesforceCredentials {
        SalesforceCredentials {
            login_url: "https://login.salesforce.com".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            username: "user@example.com".to_string(),
            password: "hunter2".to_string(),
            security_token: "token".to_string(),
        }
    }

    #[test]
    fn complete_credentials_validate() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn each_missing_field_is_a_config_error() {
        let wipe: [fn(&mut SalesforceCredentials); 6] = [
            |c| c.login_url.clear(),
            |c| c.client_id.clear(),
            |c| c.client_secret.clear(),
            |c| c.username.clear(),
            |c| c.password.clear(),
            |c| c.security_token.clear(),
        ];

        for wipe_field in wipe {
            let mut creds = complete();
            wipe_field(&mut creds);
            match creds.validate() {
                Err(SfdcError::Config(msg)) => assert!(msg.ends_with("is required")),
                other => panic!("expected Config error, got {other:?}"),
            }
        }
    }
}
