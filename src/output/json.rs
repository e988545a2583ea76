//! JSON output
//!
//! Everything printed with `--format json` is wrapped as `{data, meta}` so
//! scripts can tell which tofuref build produced it and when.

use chrono::Utc;
use serde::Serialize;

/// `{data, meta}` envelope
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    /// RFC 3339, UTC
    pub timestamp: String,

    /// tofuref version
    pub version: String,

    /// Row count, listings only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                count: None,
            },
        }
    }

    fn with_count(mut self, count: usize) -> Self {
        self.meta.count = Some(count);
        self
    }
}

/// A single value (document, snippet, cache report) as pretty JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

/// A listing as pretty JSON, with its row count in `meta`
pub fn format_rows<T: Serialize>(rows: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(rows).with_count(rows.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::ProviderJsonBuilder;
    use crate::models::display::{DocumentOutput, ProviderDisplay, ResourceDisplay};
    use crate::models::{Provider, ProviderId, Resource, ResourceKind};
    use serde_json::Value;

    fn parse(output: &str) -> Value {
        serde_json::from_str(output).unwrap()
    }

    #[test]
    fn test_provider_rows() {
        let provider =
            Provider::from_json(ProviderJsonBuilder::new("hashicorp", "aws").build()).unwrap();
        let rows = vec![ProviderDisplay::from(&provider)];

        let json = parse(&format_rows(&rows).unwrap());

        assert_eq!(json["data"][0]["name"], "hashicorp/aws");
        assert_eq!(json["meta"]["count"], 1);
        assert_eq!(json["meta"]["version"], env!("CARGO_PKG_VERSION"));
        assert!(json["meta"]["timestamp"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_no_resource_rows() {
        let rows: Vec<ResourceDisplay> = vec![];
        let json = parse(&format_rows(&rows).unwrap());

        assert_eq!(json["data"], Value::Array(vec![]));
        assert_eq!(json["meta"]["count"], 0);
    }

    #[test]
    fn test_resource_rows_keep_order() {
        let id = ProviderId::new("hashicorp", "aws");
        let resources = [
            Resource::new(id.clone(), "v5.0.0", ResourceKind::Resource, "instance"),
            Resource::new(id, "v5.0.0", ResourceKind::Datasource, "ami"),
        ];
        let rows: Vec<ResourceDisplay> = resources.iter().map(ResourceDisplay::from).collect();

        let json = parse(&format_rows(&rows).unwrap());

        assert_eq!(json["data"][0]["name"], "instance");
        assert_eq!(json["data"][1]["kind"], "datasource");
    }

    #[test]
    fn test_document_has_no_count() {
        let doc = DocumentOutput {
            provider: "hashicorp/aws".to_string(),
            version: "v5.0.0",
            kind: Some(ResourceKind::Datasource),
            name: Some("ami"),
            content: "# ami",
        };

        let json = parse(&format_json(&doc).unwrap());

        assert_eq!(json["data"]["name"], "ami");
        assert_eq!(json["data"]["content"], "# ami");
        assert!(json["meta"].get("count").is_none());
    }

    #[test]
    fn test_overview_document_omits_kind() {
        let doc = DocumentOutput {
            provider: "hashicorp/aws".to_string(),
            version: "v5.0.0",
            kind: None,
            name: None,
            content: "",
        };

        let json = parse(&format_json(&doc).unwrap());
        assert!(json["data"].get("kind").is_none());
        assert_eq!(json["data"]["content"], "");
    }
}
