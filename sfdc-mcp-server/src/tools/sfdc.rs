//! Salesforce query/describe tool provider

use pulseengine_mcp_protocol::{Content, Tool};
use serde_json::Value;
use sfdc_client::ClientManager;
use sfdc_mcp_shared::{format, OutputFormat, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Tool handlers backed by the shared session cache.
///
/// Remote failures never propagate as protocol errors; every error kind is
/// rendered as user-visible text.
pub struct SfdcToolProvider {
    client_manager: Arc<ClientManager>,
    cancel: CancellationToken,
}

impl SfdcToolProvider {
    pub fn new(client_manager: Arc<ClientManager>) -> Self {
        Self {
            client_manager,
            cancel: CancellationToken::new(),
        }
    }

    pub fn list_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: "query".to_string(),
                description: "Execute SOQL queries against Salesforce".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "soql": {
                            "type": "string",
                            "description": "The SOQL query to execute (e.g., SELECT Id, Name FROM Account LIMIT 10)"
                        },
                        "format": {
                            "type": "string",
                            "description": "Output format: 'json' or 'table' (default: json)"
                        }
                    },
                    "required": ["soql"]
                }),
                output_schema: None,
            },
            Tool {
                name: "describe".to_string(),
                description:
                    "Describe Salesforce objects to get their metadata, fields, and properties"
                        .to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "object": {
                            "type": "string",
                            "description": "The Salesforce object name to describe (e.g., Account, Contact, Opportunity)"
                        },
                        "format": {
                            "type": "string",
                            "description": "Output format: 'json' or 'table' (default: table)"
                        }
                    },
                    "required": ["object"]
                }),
                output_schema: None,
            },
        ]
    }

    pub async fn call_tool(&self, name: &str, args: Value) -> Result<Vec<Content>> {
        match name {
            "query" => self.query(&args).await,
            "describe" => self.describe(&args).await,
            _ => Ok(text(format!("Tool '{name}' not found"))),
        }
    }

    async fn query(&self, args: &Value) -> Result<Vec<Content>> {
        let Some(soql) = args.get("soql").and_then(|v| v.as_str()) else {
            return Ok(text("The soql parameter is required".to_string()));
        };
        let output = OutputFormat::parse_or(
            args.get("format").and_then(|v| v.as_str()),
            OutputFormat::Json,
        );

        let cancel = self.cancel.child_token();
        let client = match self.client_manager.get_client(&cancel).await {
            Ok(client) => client,
            Err(e) => {
                error!("Authentication failed: {}", e);
                return Ok(text(format!("Authentication failed: {e}")));
            }
        };

        match client.query(soql, &cancel).await {
            Ok(result) => {
                debug!(total_size = result.total_size, "query succeeded");
                let rendered = match output {
                    OutputFormat::Json => format::query_json(&result),
                    OutputFormat::Table => Ok(format::query_table(&result)),
                };
                Ok(text(rendered_or_report(rendered, "Query execution failed")))
            }
            Err(e) => {
                error!("Query execution failed: {}", e);
                Ok(text(format!("Query execution failed: {e}")))
            }
        }
    }

    async fn describe(&self, args: &Value) -> Result<Vec<Content>> {
        let Some(object) = args.get("object").and_then(|v| v.as_str()) else {
            return Ok(text("The object parameter is required".to_string()));
        };
        let output = OutputFormat::parse_or(
            args.get("format").and_then(|v| v.as_str()),
            OutputFormat::Table,
        );

        let cancel = self.cancel.child_token();
        let client = match self.client_manager.get_client(&cancel).await {
            Ok(client) => client,
            Err(e) => {
                error!("Authentication failed: {}", e);
                return Ok(text(format!("Authentication failed: {e}")));
            }
        };

        match client.describe(object, &cancel).await {
            Ok(result) => {
                debug!(fields = result.fields.len(), "describe succeeded");
                let rendered = match output {
                    OutputFormat::Json => format::describe_json(&result),
                    OutputFormat::Table => Ok(format::describe_table(&result)),
                };
                Ok(text(rendered_or_report(rendered, "Describe operation failed")))
            }
            Err(e) => {
                error!("Describe operation failed: {}", e);
                Ok(text(format!("Describe operation failed: {e}")))
            }
        }
    }
}

fn text(text: String) -> Vec<Content> {
    vec![Content::Text { text }]
}

/// Rendering failures surface as user-visible text like every other error
/// at the tool boundary, never as protocol errors.
fn rendered_or_report(rendered: Result<String>, context: &str) -> String {
    match rendered {
        Ok(rendered) => rendered,
        Err(e) => {
            error!("{}: {}", context, e);
            format!("{context}: {e}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatter_failure_is_reported_as_text() {
        let err = serde_json::from_str::<Value>("not json").unwrap_err();
        let message = rendered_or_report(Err(err.into()), "Query execution failed");
        assert!(message.starts_with("Query execution failed:"));
    }

    #[test]
    fn successful_rendering_passes_through() {
        let message = rendered_or_report(Ok("Total Records: 1".to_string()), "Query execution failed");
        assert_eq!(message, "Total Records: 1");
    }
}
