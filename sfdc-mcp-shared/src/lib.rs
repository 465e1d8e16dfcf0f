//! Shared types and utilities for the soql-mcp Salesforce MCP server

pub mod config;
pub mod credentials;
pub mod error;
pub mod format;
pub mod types;

pub use config::ServerConfig;
pub use credentials::SalesforceCredentials;
pub use error::{Result, SfdcError};
pub use format::OutputFormat;
pub use types::{
    ApiError, ApiErrorBody, DescribeResult, FieldDescriptor, OAuthErrorBody, PicklistEntry,
    QueryResult,
};
