//! soql-mcp server
//!
//! Model Context Protocol server exposing Salesforce SOQL queries and
//! object metadata over the stdio transport.

use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

mod resources;
mod server;
mod tools;

use server::SoqlMcpServer;
use sfdc_mcp_shared::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();

    init_logging(&config.log_level);

    info!(server_name = %config.server_name, "Starting soql-mcp server");

    // Local misconfiguration the server cannot run without; Salesforce
    // credentials are checked lazily on the first tool call instead.
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let server = SoqlMcpServer::new(config);

    info!("soql-mcp server initialized, starting main loop");

    match server.run().await {
        Ok(_) => {
            info!("soql-mcp server shut down gracefully");
            Ok(())
        }
        Err(e) => {
            error!("soql-mcp server error: {}", e);
            Err(e.into())
        }
    }
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Stdout carries the MCP stdio transport, so logs go to stderr.
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global logging subscriber");
}
