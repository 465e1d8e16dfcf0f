//! Tool providers for the soql-mcp server

use pulseengine_mcp_protocol::{Content, Tool};
use serde_json::Value;
use sfdc_client::ClientManager;
use sfdc_mcp_shared::{Result, ServerConfig, SfdcError};
use std::sync::Arc;
use tracing::{debug, error};

pub mod sfdc;

use sfdc::SfdcToolProvider;

pub struct ToolProvider {
    config: ServerConfig,
    sfdc_provider: SfdcToolProvider,
}

impl ToolProvider {
    pub fn new(client_manager: Arc<ClientManager>, config: ServerConfig) -> Self {
        let sfdc_provider = SfdcToolProvider::new(client_manager);

        Self {
            config,
            sfdc_provider,
        }
    }

    pub fn list_tools(&self) -> Vec<Tool> {
        let mut tools = self.list_system_tools();
        tools.extend(self.sfdc_provider.list_tools());

        debug!("Listed {} total tools", tools.len());
        tools
    }

    pub async fn call_tool(&self, name: &str, arguments: Option<Value>) -> Result<Vec<Content>> {
        debug!("Calling tool: {} with args: {:?}", name, arguments);

        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));

        match name {
            // System tools
            "debug" => Ok(self.debug_info()),
            "hello_world" => Ok(self.hello_world(&args)),

            // Salesforce tools
            "query" | "describe" => self.sfdc_provider.call_tool(name, args).await,

            _ => {
                error!("Unknown tool: {}", name);
                Err(SfdcError::InvalidOperation(format!(
                    "Tool '{}' not found",
                    name
                )))
            }
        }
    }

    fn list_system_tools(&self) -> Vec<Tool> {
        vec![
            Tool {
                name: "debug".to_string(),
                description: "Return server configuration information".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {},
                    "required": []
                }),
                output_schema: None,
            },
            Tool {
                name: "hello_world".to_string(),
                description: "Say hello to someone".to_string(),
                input_schema: serde_json::json!({
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Name of the person to greet"
                        }
                    },
                    "required": ["name"]
                }),
                output_schema: None,
            },
        ]
    }

    /// Configuration snapshot, no network call. Secrets never appear here.
    fn debug_info(&self) -> Vec<Content> {
        vec![Content::Text {
            text: self.config.summary(),
        }]
    }

    fn hello_world(&self, args: &Value) -> Vec<Content> {
        let text = match args.get("name").and_then(|v| v.as_str()) {
            Some(name) => format!("Hello, {}!", name),
            None => "The name parameter is required".to_string(),
        };
        vec![Content::Text { text }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfdc_mcp_shared::SalesforceCredentials;

    fn provider() -> ToolProvider {
        let config = ServerConfig {
            server_name: "soql-mcp".to_string(),
            server_version: "0.2.0".to_string(),
            commit: String::new(),
            build_date: String::new(),
            resource_path: "/tmp/terms.json".to_string(),
            debug: false,
            log_level: "info".to_string(),
            salesforce: SalesforceCredentials {
                login_url: "https://login.salesforce.com".to_string(),
                client_id: String::new(),
                client_secret: String::new(),
                username: String::new(),
                password: String::new(),
                security_token: String::new(),
            },
        };
        let manager = Arc::new(ClientManager::new(config.salesforce.clone()));
        ToolProvider::new(manager, config)
    }

    #[test]
    fn lists_all_four_tools() {
        let names: Vec<String> = provider().list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["debug", "hello_world", "query", "describe"]);
    }

    #[tokio::test]
    async fn unknown_tool_is_an_invalid_operation() {
        let result = provider().call_tool("create_account", None).await;
        assert!(matches!(result, Err(SfdcError::InvalidOperation(_))));
    }

    #[tokio::test]
    async fn debug_tool_reports_configuration_without_network() {
        let content = provider().call_tool("debug", None).await.unwrap();
        let Content::Text { text } = &content[0] else {
            panic!("expected text content");
        };
        assert!(text.contains("Server name: soql-mcp"));
    }

    #[tokio::test]
    async fn hello_world_greets() {
        let args = serde_json::json!({"name": "Ada"});
        let content = provider().call_tool("hello_world", Some(args)).await.unwrap();
        let Content::Text { text } = &content[0] else {
            panic!("expected text content");
        };
        assert_eq!(text, "Hello, Ada!");
    }

    #[tokio::test]
    async fn query_with_missing_credentials_reports_auth_failure_as_text() {
        let args = serde_json::json!({"soql": "SELECT Id FROM Account"});
        let content = provider().call_tool("query", Some(args)).await.unwrap();
        let Content::Text { text } = &content[0] else {
            panic!("expected text content");
        };
        assert!(text.starts_with("Authentication failed:"));
    }
}
