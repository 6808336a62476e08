use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("OpenAPI document not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{origin}: {message}")]
    Format { origin: String, message: String },
    #[error("operationId '{operation_id}' not found in service '{service}'")]
    OperationNotFound {
        service: String,
        operation_id: String,
    },
    #[error("unknown service '{0}'")]
    UnknownService(String),
}
