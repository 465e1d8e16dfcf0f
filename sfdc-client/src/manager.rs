//! Process-wide session cache
//!
//! Holds at most one live [`Session`] behind an exclusive lock and decides
//! when it is still usable versus must be refreshed. Constructed once at
//! process start and shared by `Arc` into every handler.

use crate::auth::{Authenticator, Session};
use crate::client::SalesforceClient;
use chrono::{DateTime, Duration, Utc};
use sfdc_mcp_shared::{Result, SalesforceCredentials};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Manages one shared session with lazy refresh.
///
/// A session counts as usable until 90% of the nominal token lifetime has
/// elapsed since the last successful authentication; past that margin the
/// next `get_client` call refreshes it. The refresh runs while the lock is
/// held, so concurrent callers block behind the single in-flight exchange
/// and then share its result instead of racing into duplicate refreshes.
///
/// Known limitation: the margin is a static guess. The token-exchange
/// response carries no lifetime field to read, so a remote-side shorter
/// lifetime can still let one request go out with an already-expired
/// token.
pub struct ClientManager {
    authenticator: Authenticator,
    http: reqwest::Client,
    token_lifetime: Duration,
    slot: Mutex<SessionSlot>,
}

#[derive(Default)]
struct SessionSlot {
    session: Option<Arc<Session>>,
    last_auth: Option<DateTime<Utc>>,
}

impl SessionSlot {
    /// The cached session, if one exists and has not crossed the refresh
    /// margin. The boundary is inclusive: a session exactly at the margin
    /// is still reused, only strictly older ones are refreshed.
    fn usable_session(&self, margin: Duration) -> Option<Arc<Session>> {
        let last_auth = self.last_auth?;
        if Utc::now() - last_auth > margin {
            return None;
        }
        self.session.clone()
    }

    fn store(&mut self, session: Arc<Session>) {
        self.session = Some(session);
        self.last_auth = Some(Utc::now());
    }

    fn clear(&mut self) {
        self.session = None;
        self.last_auth = None;
    }
}

impl ClientManager {
    /// Manager with the nominal Salesforce token lifetime of two hours.
    pub fn new(credentials: SalesforceCredentials) -> Self {
        Self::with_token_lifetime(credentials, Duration::hours(2))
    }

    /// Manager with an explicit nominal lifetime; tests shrink it to drive
    /// the refresh policy without waiting.
    pub fn with_token_lifetime(credentials: SalesforceCredentials, token_lifetime: Duration) -> Self {
        let http = reqwest::Client::new();
        Self {
            authenticator: Authenticator::with_http(http.clone(), credentials),
            http,
            token_lifetime,
            slot: Mutex::new(SessionSlot::default()),
        }
    }

    /// A client handle backed by a usable session, refreshing first when
    /// necessary.
    ///
    /// On a failed refresh the cache is left empty, the error goes back to
    /// the caller, and the next call re-attempts authentication from
    /// scratch.
    pub async fn get_client(&self, cancel: &CancellationToken) -> Result<SalesforceClient> {
        let mut slot = self.slot.lock().await;

        let session = match slot.usable_session(self.refresh_margin()) {
            Some(session) => session,
            None => {
                debug!("no usable session, running token exchange");
                slot.clear();
                let fresh = Arc::new(self.authenticator.authenticate(cancel).await?);
                slot.store(fresh.clone());
                info!(instance_url = %fresh.instance_url, "session established");
                fresh
            }
        };

        Ok(SalesforceClient::with_session(self.http.clone(), session))
    }

    /// Drop the cached session unconditionally; the remote token is not
    /// revoked. The next `get_client` call authenticates from scratch.
    pub async fn reset(&self) {
        let mut slot = self.slot.lock().await;
        slot.clear();
        debug!("session cache cleared");
    }

    fn refresh_margin(&self) -> Duration {
        self.token_lifetime * 9 / 10
    }
}
