//! Error types for the soql-mcp server

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SfdcError>;

/// Failure taxonomy for Salesforce operations.
///
/// `Config` never reaches the network; `Transport` covers connection and
/// timeout failures; `Cancelled` is caller cancellation, deliberately kept
/// apart from a per-request timeout so callers can tell the two aborts
/// apart.
#[derive(Error, Debug)]
pub enum SfdcError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request cancelled: {0}")]
    Cancelled(String),

    #[error("authentication failed: {code} - {description}")]
    Auth { code: String, description: String },

    #[error("API request failed: {code} - {message}")]
    Api { code: String, message: String },

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("not authenticated, no active session")]
    NotAuthenticated,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("MCP protocol error: {0}")]
    Mcp(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),
}

impl From<pulseengine_mcp_server::BackendError> for SfdcError {
    fn from(err: pulseengine_mcp_server::BackendError) -> Self {
        SfdcError::Mcp(err.to_string())
    }
}

impl From<SfdcError> for pulseengine_mcp_protocol::Error {
    fn from(err: SfdcError) -> Self {
        pulseengine_mcp_protocol::Error::internal_error(err.to_string())
    }
}
