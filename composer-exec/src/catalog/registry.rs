use std::collections::BTreeMap;
use std::path::Path;

use composer_core::OperationCatalogEntry;

use crate::catalog::error::CatalogError;
use crate::catalog::model::{OpenApiSpec, ResolvedOperation};

/// Service name to loaded OpenAPI document.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct SpecCatalog {
    specs: BTreeMap<String, OpenApiSpec>,
}

impl SpecCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any spec already registered under `service`.
    pub fn register(&mut self, service: impl Into<String>, spec: OpenApiSpec) {
        self.specs.insert(service.into(), spec);
    }

    pub fn load_service(
        &mut self,
        service: impl Into<String>,
        path: impl AsRef<Path>,
        base_url: &str,
    ) -> Result<(), CatalogError> {
        let spec = OpenApiSpec::load(path, base_url)?;
        self.register(service, spec);
        Ok(())
    }

    pub fn lookup(&self, service: &str) -> Result<&OpenApiSpec, CatalogError> {
        self.specs
            .get(service)
            .ok_or_else(|| CatalogError::UnknownService(service.to_string()))
    }

    pub fn resolve(
        &self,
        service: &str,
        operation_id: &str,
    ) -> Result<ResolvedOperation, CatalogError> {
        self.lookup(service)?
            .find(operation_id)
            .ok_or_else(|| CatalogError::OperationNotFound {
                service: service.to_string(),
                operation_id: operation_id.to_string(),
            })
    }

    /// Every operation of every service, sorted by (service, operationId).
    pub fn entries(&self) -> Vec<OperationCatalogEntry> {
        let mut out: Vec<OperationCatalogEntry> = self
            .specs
            .iter()
            .flat_map(|(service, spec)| {
                spec.operations()
                    .into_iter()
                    .map(move |op| op.into_entry(service))
            })
            .collect();
        out.sort_by(|a, b| (&a.service, &a.operation_id).cmp(&(&b.service, &b.operation_id)));
        out
    }

    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
