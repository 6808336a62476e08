//! Loading, indexing and resolving OpenAPI documents per named service.

mod error;
mod loader;
mod model;
mod op_id;
mod refs;
mod registry;
mod shape;

pub use error::CatalogError;
pub use loader::parse_openapi_str;
pub use model::{OpenApiSpec, ResolvedOperation};
pub use registry::SpecCatalog;
