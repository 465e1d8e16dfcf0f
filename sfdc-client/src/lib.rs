//! Salesforce REST client - handles the token exchange, session reuse, and
//! the query/describe operations

pub mod auth;
pub mod client;
pub mod manager;
mod net;

pub use auth::{Authenticator, Session};
pub use client::{SalesforceClient, API_VERSION};
pub use manager::ClientManager;
