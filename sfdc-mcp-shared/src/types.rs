//! Salesforce REST API data model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of a SOQL query.
///
/// Records are heterogeneous by nature, so each one is kept as an ordered
/// mapping from field name to JSON value rather than a fixed shape. The
/// `attributes` key carried by every record is Salesforce metadata, not a
/// field, and is excluded from table rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(rename = "totalSize")]
    pub total_size: u64,
    pub done: bool,
    #[serde(default)]
    pub records: Vec<serde_json::Map<String, Value>>,
}

/// Object metadata returned by a describe call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeResult {
    pub name: String,
    pub label: String,
    #[serde(rename = "labelPlural")]
    pub label_plural: String,
    #[serde(rename = "keyPrefix")]
    pub key_prefix: Option<String>,
    #[serde(default)]
    pub createable: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub deletable: bool,
    #[serde(default)]
    pub queryable: bool,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

/// Metadata for a single object field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub length: i64,
    /// Salesforce reports nullability; a field is required when it is not
    /// nillable.
    #[serde(default)]
    pub nillable: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub updateable: bool,
    #[serde(default)]
    pub createable: bool,
    #[serde(rename = "defaultValue", default)]
    pub default_value: Value,
    #[serde(rename = "picklistValues", default)]
    pub picklist_values: Vec<PicklistEntry>,
}

impl FieldDescriptor {
    pub fn required(&self) -> bool {
        !self.nillable
    }
}

/// One entry of a picklist field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PicklistEntry {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub active: bool,
}

/// Error body of a rejected token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthErrorBody {
    pub error: String,
    #[serde(default)]
    pub error_description: String,
}

/// One entry of a data-operation error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "errorCode", default)]
    pub error_code: String,
}

/// Error body wrapper of a failed data operation.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<ApiError>,
}
