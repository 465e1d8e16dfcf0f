//! Main MCP server implementation using PulseEngine MCP framework

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use pulseengine_mcp_protocol::*;
use pulseengine_mcp_server::{McpBackend, McpServer, ServerConfig as McpServerConfig};

use sfdc_client::ClientManager;
use sfdc_mcp_shared::{Result, ServerConfig, SfdcError};

use crate::resources::ResourceProvider;
use crate::tools::ToolProvider;

pub struct SoqlMcpServer {
    config: ServerConfig,
    resource_provider: Arc<ResourceProvider>,
    tool_provider: Arc<ToolProvider>,
}

impl SoqlMcpServer {
    pub fn new(config: ServerConfig) -> Self {
        info!("Initializing soql-mcp server");

        // One session cache for the whole process, shared by every tool
        // call through the provider.
        let client_manager = Arc::new(ClientManager::new(config.salesforce.clone()));

        let resource_provider = Arc::new(ResourceProvider::new(config.clone()));
        let tool_provider = Arc::new(ToolProvider::new(client_manager, config.clone()));

        Self {
            config,
            resource_provider,
            tool_provider,
        }
    }

    pub async fn run(self) -> Result<()> {
        let backend = SoqlMcpBackend {
            inner: Arc::new(self),
        };

        // Create server with default config and stdio transport
        let server_config = McpServerConfig::default();
        let mut server = McpServer::new(backend, server_config)
            .await
            .map_err(|e| SfdcError::Mcp(format!("Failed to create server: {}", e)))?;

        info!("Starting MCP server with stdio transport");

        server
            .run()
            .await
            .map_err(|e| SfdcError::Mcp(format!("Server run error: {}", e)))
    }
}

#[derive(Clone)]
struct SoqlMcpBackend {
    inner: Arc<SoqlMcpServer>,
}

#[async_trait]
impl McpBackend for SoqlMcpBackend {
    type Config = ();
    type Error = SfdcError;

    async fn initialize(_: Self::Config) -> std::result::Result<Self, Self::Error> {
        Err(SfdcError::Config(
            "Use SoqlMcpServer::new() instead".to_string(),
        ))
    }

    fn get_server_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            server_info: Implementation {
                name: self.inner.config.server_name.clone(),
                version: self.inner.config.server_version.clone(),
            },
            capabilities: ServerCapabilities {
                resources: Some(ResourcesCapability {
                    subscribe: Some(false),
                    list_changed: Some(false),
                }),
                tools: Some(ToolsCapability { list_changed: None }),
                prompts: None,
                sampling: None,
                logging: None,
                elicitation: None,
            },
            instructions: Some(
                "Salesforce MCP server: execute SOQL queries and describe object metadata."
                    .to_string(),
            ),
        }
    }

    async fn health_check(&self) -> std::result::Result<(), Self::Error> {
        Ok(())
    }

    async fn list_tools(
        &self,
        _params: PaginatedRequestParam,
    ) -> std::result::Result<ListToolsResult, Self::Error> {
        debug!("Listing tools");

        let tools = self.inner.tool_provider.list_tools();

        debug!("Found {} tools", tools.len());
        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        params: CallToolRequestParam,
    ) -> std::result::Result<CallToolResult, Self::Error> {
        debug!("Calling tool: {}", params.name);

        let content = self
            .inner
            .tool_provider
            .call_tool(&params.name, params.arguments)
            .await?;

        debug!("Successfully called tool: {}", params.name);
        Ok(CallToolResult {
            content,
            is_error: Some(false),
            structured_content: None,
        })
    }

    async fn list_resources(
        &self,
        _params: PaginatedRequestParam,
    ) -> std::result::Result<ListResourcesResult, Self::Error> {
        debug!("Listing resources");

        let resources = self.inner.resource_provider.list_resources();

        debug!("Found {} resources", resources.len());
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        params: ReadResourceRequestParam,
    ) -> std::result::Result<ReadResourceResult, Self::Error> {
        debug!("Reading resource: {}", params.uri);

        let contents = self.inner.resource_provider.read_resource(&params.uri).await?;

        debug!("Successfully read resource: {}", params.uri);
        Ok(ReadResourceResult { contents })
    }

    async fn list_prompts(
        &self,
        _params: PaginatedRequestParam,
    ) -> std::result::Result<ListPromptsResult, Self::Error> {
        Ok(ListPromptsResult {
            prompts: vec![],
            next_cursor: None,
        })
    }

    async fn get_prompt(
        &self,
        _params: GetPromptRequestParam,
    ) -> std::result::Result<GetPromptResult, Self::Error> {
        Err(pulseengine_mcp_server::BackendError::not_supported("Prompts not supported").into())
    }
}
