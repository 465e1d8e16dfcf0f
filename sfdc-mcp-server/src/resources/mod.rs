//! Resource providers for the soql-mcp server

use pulseengine_mcp_protocol::{Resource, ResourceContents};
use sfdc_mcp_shared::{Result, ServerConfig, SfdcError};
use tracing::debug;

/// Serves the configured terms file as a static MCP resource.
pub struct ResourceProvider {
    config: ServerConfig,
}

impl ResourceProvider {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn list_resources(&self) -> Vec<Resource> {
        vec![Resource {
            uri: format!("file://{}", self.config.resource_path),
            name: "terms".to_string(),
            description: Some("Terms".to_string()),
            mime_type: Some("application/json".to_string()),
            annotations: None,
            raw: None,
        }]
    }

    pub async fn read_resource(&self, uri: &str) -> Result<Vec<ResourceContents>> {
        let parsed = url::Url::parse(uri)?;
        let file_path = parsed.path();
        debug!(path = %file_path, "reading resource file");

        // Only the configured terms file is served.
        if parsed.scheme() != "file" || file_path != self.config.resource_path {
            return Err(SfdcError::ResourceNotFound(uri.to_string()));
        }

        let text = tokio::fs::read_to_string(file_path).await?;

        Ok(vec![ResourceContents {
            uri: uri.to_string(),
            mime_type: Some("application/json".to_string()),
            text: Some(text),
            blob: None,
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfdc_mcp_shared::SalesforceCredentials;
    use std::io::Write as _;

    fn config_with_resource(path: &str) -> ServerConfig {
        ServerConfig {
            server_name: "soql-mcp".to_string(),
            server_version: "0.2.0".to_string(),
            commit: String::new(),
            build_date: String::new(),
            resource_path: path.to_string(),
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
        }
    }

    #[tokio::test]
    async fn serves_the_configured_terms_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"terms\": []}}").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let provider = ResourceProvider::new(config_with_resource(&path));

        let resources = provider.list_resources();
        assert_eq!(resources[0].uri, format!("file://{path}"));

        let contents = provider
            .read_resource(&format!("file://{path}"))
            .await
            .unwrap();
        let Some(text) = &contents[0].text else {
            panic!("expected text contents");
        };
        assert!(text.contains("terms"));
    }

    #[tokio::test]
    async fn unknown_uri_is_not_found() {
        let provider = ResourceProvider::new(config_with_resource("/tmp/terms.json"));
        let result = provider.read_resource("file:///etc/passwd").await;
        assert!(matches!(result, Err(SfdcError::ResourceNotFound(_))));
    }
}
