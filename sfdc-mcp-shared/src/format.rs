//! Renderers for query and describe results
//!
//! Two independent renderers per result type: a human-readable table and
//! pretty-printed JSON. Rendering never fails on empty results.

use crate::{DescribeResult, QueryResult, Result};
use serde_json::Value;
use std::fmt::Write as _;

/// Output format requested by a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    /// Parse a caller-supplied format, falling back to `default` for
    /// anything unrecognized rather than erroring.
    pub fn parse_or(value: Option<&str>, default: OutputFormat) -> OutputFormat {
        match value {
            Some("json") => OutputFormat::Json,
            Some("table") => OutputFormat::Table,
            _ => default,
        }
    }
}

/// Render a query result as a per-record block listing.
pub fn query_table(result: &QueryResult) -> String {
    if result.total_size == 0 {
        return "No records found.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "Total Records: {}", result.total_size);
    let _ = writeln!(out, "Records Returned: {}", result.records.len());
    let _ = writeln!(out, "{}", "-".repeat(50));

    for (i, record) in result.records.iter().enumerate() {
        let _ = writeln!(out, "Record {}:", i + 1);
        for (key, value) in record {
            // Skip Salesforce record metadata
            if key == "attributes" {
                continue;
            }
            let _ = writeln!(out, "  {}: {}", key, render_value(value));
        }
        let _ = writeln!(out, "{}", "-".repeat(30));
    }

    out
}

/// Render a query result as pretty-printed JSON.
pub fn query_json(result: &QueryResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Render object metadata as a summary header plus a fixed-width field
/// table.
pub fn describe_table(result: &DescribeResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Object: {} ({})", result.name, result.label);
    let _ = writeln!(out, "Plural Label: {}", result.label_plural);
    let _ = writeln!(
        out,
        "Key Prefix: {}",
        result.key_prefix.as_deref().unwrap_or("-")
    );
    let _ = writeln!(
        out,
        "Createable: {}  Updateable: {}  Deletable: {}  Queryable: {}",
        result.createable, result.updateable, result.deletable, result.queryable
    );
    let _ = writeln!(out, "Fields: {}", result.fields.len());
    let _ = writeln!(out, "{}", "-".repeat(90));

    if result.fields.is_empty() {
        let _ = writeln!(out, "No fields found.");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<30} {:<30} {:<12} {:>6} {:>8} {:>6}",
        "NAME", "LABEL", "TYPE", "LENGTH", "REQUIRED", "UNIQUE"
    );
    for field in &result.fields {
        let _ = writeln!(
            out,
            "{:<30} {:<30} {:<12} {:>6} {:>8} {:>6}",
            field.name,
            field.label,
            field.field_type,
            field.length,
            field.required(),
            field.unique
        );
    }

    out
}

/// Render object metadata as pretty-printed JSON.
pub fn describe_json(result: &DescribeResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Human-readable rendering of a record value: strings unquoted, anything
/// else in its canonical JSON form.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldDescriptor;
    use serde_json::json;

    fn record(pairs: &[(&str, Value)]) -> serde_json::Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn sample_query_result() -> QueryResult {
        QueryResult {
            total_size: 2,
            done: true,
            records: vec![
                record(&[
                    ("attributes", json!({"type": "Account"})),
                    ("Id", json!("001xx000003DGb1AAG")),
                    ("Name", json!("Acme")),
                    ("NumberOfEmployees", json!(120)),
                ]),
                record(&[
                    ("attributes", json!({"type": "Account"})),
                    ("Id", json!("001xx000003DGb2AAG")),
                    ("Name", json!("Globex")),
                    ("NumberOfEmployees", json!(null)),
                ]),
            ],
        }
    }

    #[test]
    fn empty_result_renders_no_records_literal() {
        let result = QueryResult {
            total_size: 0,
            done: true,
            records: vec![],
        };
        assert_eq!(query_table(&result), "No records found.");
    }

    #[test]
    fn table_skips_attributes_metadata() {
        let table = query_table(&sample_query_result());
        assert!(!table.contains("attributes"));
        assert!(table.contains("Record 1:"));
        assert!(table.contains("  Name: Acme"));
        assert!(table.contains("  NumberOfEmployees: 120"));
        assert!(table.contains("  NumberOfEmployees: null"));
    }

    #[test]
    fn table_reports_counts() {
        let table = query_table(&sample_query_result());
        assert!(table.starts_with("Total Records: 2\nRecords Returned: 2\n"));
    }

    #[test]
    fn json_round_trips_documented_fields() {
        let result = sample_query_result();
        let rendered = query_json(&result).unwrap();
        let parsed: QueryResult = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed.total_size, result.total_size);
        assert_eq!(parsed.done, result.done);
        assert_eq!(parsed.records.len(), result.records.len());
    }

    fn sample_describe_result() -> DescribeResult {
        DescribeResult {
            name: "Account".to_string(),
            label: "Account".to_string(),
            label_plural: "Accounts".to_string(),
            key_prefix: Some("001".to_string()),
            createable: true,
            updateable: true,
            deletable: false,
            queryable: true,
            fields: vec![FieldDescriptor {
                name: "Name".to_string(),
                label: "Account Name".to_string(),
                field_type: "string".to_string(),
                length: 255,
                nillable: false,
                unique: false,
                updateable: true,
                createable: true,
                default_value: Value::Null,
                picklist_values: vec![],
            }],
        }
    }

    #[test]
    fn describe_table_lists_fields() {
        let table = describe_table(&sample_describe_result());
        assert!(table.contains("Object: Account (Account)"));
        assert!(table.contains("Key Prefix: 001"));
        assert!(table.contains("NAME"));
        assert!(table.contains("Account Name"));
    }

    #[test]
    fn describe_table_with_no_fields_does_not_fail() {
        let mut result = sample_describe_result();
        result.fields.clear();
        let table = describe_table(&result);
        assert!(table.contains("No fields found."));
    }

    #[test]
    fn unknown_format_falls_back_to_default() {
        assert_eq!(
            OutputFormat::parse_or(Some("yaml"), OutputFormat::Json),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::parse_or(None, OutputFormat::Table),
            OutputFormat::Table
        );
        assert_eq!(
            OutputFormat::parse_or(Some("table"), OutputFormat::Json),
            OutputFormat::Table
        );
    }
}
