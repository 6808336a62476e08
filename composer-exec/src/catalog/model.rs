use std::path::Path;

use composer_core::{OperationCatalogEntry, OperationParam};

use crate::catalog::error::CatalogError;
use crate::catalog::{loader, op_id};

/// A loaded OpenAPI document bound to the base URL its service is reached at.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OpenApiSpec {
    /// File path (or other origin) the document was loaded from.
    pub source: String,
    /// May be empty, in which case the document's `servers` are used.
    pub base_url: String,
    /// Parsed document as JSON (works for both JSON and YAML inputs).
    pub raw: serde_json::Value,
}

impl OpenApiSpec {
    pub fn load(path: impl AsRef<Path>, base_url: &str) -> Result<Self, CatalogError> {
        loader::load_openapi_file(path.as_ref(), base_url)
    }

    pub fn from_value(source: impl Into<String>, base_url: &str, raw: serde_json::Value) -> Self {
        Self {
            source: source.into(),
            base_url: base_url.to_string(),
            raw,
        }
    }

    /// Find the first operation carrying `operation_id`.
    pub fn find(&self, operation_id: &str) -> Option<ResolvedOperation> {
        op_id::find_operation_by_id(&self.raw, &self.base_url, operation_id)
    }

    pub fn operations(&self) -> Vec<ResolvedOperation> {
        op_id::list_operations(&self.raw, &self.base_url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedOperation {
    pub operation_id: String,
    /// Upper-case HTTP method.
    pub method: String,
    /// Path template exactly as written in the document.
    pub path: String,
    pub base_url: String,
    pub description: Option<String>,
    pub parameters: Vec<OperationParam>,
}

impl ResolvedOperation {
    pub fn into_entry(self, service: &str) -> OperationCatalogEntry {
        OperationCatalogEntry {
            service: service.to_string(),
            operation_id: self.operation_id,
            method: self.method,
            path: self.path,
            base_url: self.base_url,
            description: self.description,
            parameters: self.parameters,
        }
    }
}

pub(crate) fn method_keys() -> &'static [&'static str] {
    &[
        "get", "put", "post", "delete", "options", "head", "patch", "trace",
    ]
}
