//! OAuth password-grant token exchange

use crate::net::cancellable;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sfdc_mcp_shared::{OAuthErrorBody, Result, SalesforceCredentials, SfdcError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

const AUTH_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of a successful token exchange.
///
/// Immutable once created; a refresh produces a new `Session` rather than
/// mutating the old one.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque bearer token
    pub access_token: String,
    /// Base URL for data operations, assigned by the auth server
    pub instance_url: String,
    pub issued_at: DateTime<Utc>,
}

/// Successful token-exchange body. The response also carries `id`,
/// `token_type`, `issued_at` and `signature`, none of which this client
/// uses.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    instance_url: String,
}

/// Exchanges credentials for a short-lived [`Session`].
///
/// Stateless beyond the HTTP connection pool; the new session is returned
/// to the caller rather than stored anywhere.
pub struct Authenticator {
    http: reqwest::Client,
    credentials: SalesforceCredentials,
}

impl Authenticator {
    pub fn new(credentials: SalesforceCredentials) -> Self {
        Self::with_http(reqwest::Client::new(), credentials)
    }

    pub fn with_http(http: reqwest::Client, credentials: SalesforceCredentials) -> Self {
        Self { http, credentials }
    }

    /// Run the password-grant exchange against
    /// `<login_url>/services/oauth2/token`.
    ///
    /// Incomplete credentials fail with a configuration error before any
    /// network traffic.
    pub async fn authenticate(&self, cancel: &CancellationToken) -> Result<Session> {
        self.credentials.validate()?;

        let url = format!(
            "{}/services/oauth2/token",
            self.credentials.login_url.trim_end_matches('/')
        );
        // The security token rides along as a password suffix.
        let password = format!(
            "{}{}",
            self.credentials.password, self.credentials.security_token
        );
        let params = [
            ("grant_type", "password"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("username", self.credentials.username.as_str()),
            ("password", password.as_str()),
        ];

        debug!(username = %self.credentials.username, "requesting access token");

        let response = cancellable(
            self.http
                .post(&url)
                .form(&params)
                .timeout(AUTH_TIMEOUT)
                .send(),
            cancel,
            "authentication",
        )
        .await?;

        let status = response.status();
        let body = cancellable(response.text(), cancel, "authentication").await?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<OAuthErrorBody>(&body) {
                Ok(rejection) => SfdcError::Auth {
                    code: rejection.error,
                    description: rejection.error_description,
                },
                Err(_) => SfdcError::Auth {
                    code: format!("HTTP {}", status.as_u16()),
                    description: body,
                },
            });
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| SfdcError::Parse(format!("authentication response: {e}")))?;

        debug!(instance_url = %token.instance_url, "access token obtained");

        Ok(Session {
            access_token: token.access_token,
            instance_url: token.instance_url,
            issued_at: Utc::now(),
        })
    }
}
