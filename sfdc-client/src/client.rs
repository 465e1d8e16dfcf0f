//! Authenticated query/describe operations

use crate::auth::Session;
use crate::net::cancellable;
use sfdc_mcp_shared::{ApiErrorBody, DescribeResult, QueryResult, Result, SfdcError};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Salesforce REST API version all data requests are pinned to.
pub const API_VERSION: &str = "v57.0";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Handle for data operations against one Salesforce instance.
///
/// Handles obtained from [`crate::ClientManager`] always carry a session;
/// a client constructed without one fails every operation with
/// [`SfdcError::NotAuthenticated`] before touching the network.
#[derive(Clone, Debug)]
pub struct SalesforceClient {
    http: reqwest::Client,
    session: Option<Arc<Session>>,
}

impl SalesforceClient {
    /// A client with no session attached.
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            session: None,
        }
    }

    pub fn with_session(http: reqwest::Client, session: Arc<Session>) -> Self {
        Self {
            http,
            session: Some(session),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_deref()
    }

    /// Execute a SOQL statement.
    pub async fn query(&self, soql: &str, cancel: &CancellationToken) -> Result<QueryResult> {
        let session = self.require_session()?;
        let url = format!(
            "{}/services/data/{API_VERSION}/query",
            session.instance_url.trim_end_matches('/')
        );

        debug!(%soql, "executing query");

        let body = self
            .get(&url, &[("q", soql)], session, cancel, "query")
            .await?;

        serde_json::from_str(&body).map_err(|e| SfdcError::Parse(format!("query response: {e}")))
    }

    /// Fetch metadata for one object type.
    pub async fn describe(
        &self,
        object_name: &str,
        cancel: &CancellationToken,
    ) -> Result<DescribeResult> {
        let session = self.require_session()?;
        let url = format!(
            "{}/services/data/{API_VERSION}/sobjects/{object_name}/describe",
            session.instance_url.trim_end_matches('/')
        );

        debug!(object = %object_name, "describing object");

        let body = self.get(&url, &[], session, cancel, "describe").await?;

        serde_json::from_str(&body).map_err(|e| SfdcError::Parse(format!("describe response: {e}")))
    }

    fn require_session(&self) -> Result<&Session> {
        self.session.as_deref().ok_or(SfdcError::NotAuthenticated)
    }

    /// Bearer-authorized GET returning the raw body of a 2xx response;
    /// non-2xx responses are classified into [`SfdcError::Api`].
    async fn get(
        &self,
        url: &str,
        params: &[(&str, &str)],
        session: &Session,
        cancel: &CancellationToken,
        operation: &str,
    ) -> Result<String> {
        let response = cancellable(
            self.http
                .get(url)
                .query(params)
                .bearer_auth(&session.access_token)
                .timeout(REQUEST_TIMEOUT)
                .send(),
            cancel,
            operation,
        )
        .await?;

        let status = response.status();
        let body = cancellable(response.text(), cancel, operation).await?;

        if !status.is_success() {
            return Err(remote_error(status, body));
        }

        Ok(body)
    }
}

/// Classify a non-2xx data-operation response: a parseable error body
/// yields the first entry's code and message, anything else the raw status
/// and body text.
fn remote_error(status: reqwest::StatusCode, body: String) -> SfdcError {
    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) if !parsed.errors.is_empty() => {
            let first = &parsed.errors[0];
            SfdcError::Api {
                code: first.error_code.clone(),
                message: first.message.clone(),
            }
        }
        _ => SfdcError::Api {
            code: format!("HTTP {}", status.as_u16()),
            message: body,
        },
    }
}
