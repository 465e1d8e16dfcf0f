//! Cancellation-aware await for outbound requests

use sfdc_mcp_shared::{Result, SfdcError};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Await a reqwest future unless the caller cancels first.
///
/// Caller cancellation maps to [`SfdcError::Cancelled`]; a per-request
/// timeout still arrives as [`SfdcError::Transport`] through reqwest, so
/// the two aborts stay distinguishable.
pub(crate) async fn cancellable<T>(
    future: impl Future<Output = std::result::Result<T, reqwest::Error>>,
    cancel: &CancellationToken,
    operation: &str,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SfdcError::Cancelled(format!("{operation} aborted by caller"))),
        result = future => Ok(result?),
    }
}
